use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "exam_csv_import",
    version,
    about = "Parse and validate exam questions from CSV files, optionally saving them as exams."
)]
pub struct Cli {
    /// 要导入的 CSV 文件；为空时扫描 CSV_FOLDER
    pub files: Vec<PathBuf>,

    /// 校验通过后保存为试卷（标题取文件名）
    #[arg(long)]
    pub save: bool,

    /// 保存到 STORE_API_BASE_URL 而不是本地 TOML
    #[arg(long, requires = "save")]
    pub api: bool,

    /// 写出示例 CSV 模板后退出
    #[arg(long, value_name = "PATH")]
    pub sample: Option<PathBuf>,

    /// 无法识别的题型视为错误
    #[arg(long)]
    pub strict_types: bool,

    /// 以 JSON 行输出每个文件的导入结果
    #[arg(long)]
    pub json: bool,

    /// 试卷作者
    #[arg(long)]
    pub author: Option<String>,

    /// 详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖环境变量配置
    pub fn apply(&self, mut config: Config) -> Config {
        if self.strict_types {
            config.strict_types = true;
        }
        if self.json {
            config.json_report = true;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        if let Some(author) = &self.author {
            config.exam_author = Some(author.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["exam_csv_import", "--strict-types", "--author", "ms.lee", "a.csv"]);
        let config = cli.apply(Config::default());
        assert!(config.strict_types);
        assert_eq!(config.exam_author.as_deref(), Some("ms.lee"));
        assert_eq!(cli.files, vec![PathBuf::from("a.csv")]);
    }

    #[test]
    fn test_api_requires_save() {
        assert!(Cli::try_parse_from(["exam_csv_import", "--api"]).is_err());
        assert!(Cli::try_parse_from(["exam_csv_import", "--save", "--api"]).is_ok());
    }
}
