use crate::validation::ValidationOptions;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 待导入 CSV 文件所在目录
    pub csv_folder: String,
    /// 试卷 TOML 输出目录
    pub output_folder: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 无法识别的题型是否视为错误
    pub strict_types: bool,
    /// 每个文件的导入结果以 JSON 行输出到 stdout
    pub json_report: bool,
    /// 出题人（显式传入，不从会话中读取）
    pub exam_author: Option<String>,
    // --- 试卷存储 API 配置 ---
    pub store_api_base_url: Option<String>,
    pub store_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_folder: "input_csv".to_string(),
            output_folder: "output_toml".to_string(),
            output_log_file: "import_log.txt".to_string(),
            verbose_logging: false,
            strict_types: false,
            json_report: false,
            exam_author: None,
            store_api_base_url: None,
            store_token: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            csv_folder: std::env::var("CSV_FOLDER").unwrap_or(default.csv_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            strict_types: std::env::var("STRICT_TYPES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.strict_types),
            json_report: std::env::var("JSON_REPORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.json_report),
            exam_author: std::env::var("EXAM_AUTHOR").ok().filter(|v| !v.trim().is_empty()).or(default.exam_author),
            store_api_base_url: std::env::var("STORE_API_BASE_URL").ok().filter(|v| !v.trim().is_empty()).or(default.store_api_base_url),
            store_token: std::env::var("STORE_TOKEN").unwrap_or(default.store_token),
        }
    }

    /// 当前配置对应的校验选项
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_types: self.strict_types,
        }
    }
}
