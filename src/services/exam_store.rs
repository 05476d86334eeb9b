//! 试卷存储 - 业务能力层
//!
//! 保存是外部协作方的职责，这里只定义接口和两种实现：
//! - `TomlExamStore`：写入本地 TOML 文件
//! - `ApiExamStore`：POST 到试卷存储 API

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, StoreError};
use crate::models::exam::Exam;

/// 保存回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// 文件路径或服务端返回的 ID
    pub location: String,
    pub question_count: usize,
}

/// 试卷存储
#[allow(async_fn_in_trait)]
pub trait ExamStore {
    async fn save(&self, exam: &Exam) -> AppResult<SaveReceipt>;
}

/// 本地 TOML 存储
pub struct TomlExamStore {
    output_folder: PathBuf,
}

impl TomlExamStore {
    pub fn new(output_folder: impl Into<PathBuf>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_folder)
    }

    fn path_for(&self, exam: &Exam) -> PathBuf {
        self.output_folder
            .join(format!("{}.toml", sanitize_file_name(&exam.title)))
    }
}

impl ExamStore for TomlExamStore {
    async fn save(&self, exam: &Exam) -> AppResult<SaveReceipt> {
        let content = toml::to_string_pretty(exam)?;
        let path = self.path_for(exam);

        tokio::fs::create_dir_all(&self.output_folder)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_folder.display().to_string(), e))?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("💾 试卷已保存: {}", path.display());

        Ok(SaveReceipt {
            location: path.display().to_string(),
            question_count: exam.questions.len(),
        })
    }
}

/// 试卷存储 API
pub struct ApiExamStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// API 响应
#[derive(Debug, serde::Deserialize)]
struct SaveResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    exam: &'a Exam,
}

impl ApiExamStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// 未配置 `STORE_API_BASE_URL` 时返回配置错误
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let base_url = config
            .store_api_base_url
            .clone()
            .ok_or_else(|| ConfigError::Missing {
                name: "STORE_API_BASE_URL".to_string(),
            })?;
        Ok(Self::new(base_url, config.store_token.clone()))
    }

    fn endpoint(&self) -> String {
        format!("{}/exams", self.base_url)
    }
}

impl ExamStore for ApiExamStore {
    async fn save(&self, exam: &Exam) -> AppResult<SaveReceipt> {
        let endpoint = self.endpoint();
        debug!("POST {} | 题目数: {}", endpoint, exam.questions.len());

        let response = self
            .client
            .post(&endpoint)
            .header("token", &self.token)
            .json(&SaveRequest { exam })
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let body: Option<SaveResponse> = response.json().await.ok();

        if !status.is_success() {
            return Err(StoreError::Rejected {
                endpoint,
                status: status.as_u16(),
                message: body.and_then(|b| b.message),
            }
            .into());
        }

        let location = body.and_then(|b| b.id).unwrap_or(endpoint);
        info!("💾 试卷已提交: {} ({})", exam.title, location);

        Ok(SaveReceipt {
            location,
            question_count: exam.questions.len(),
        })
    }
}

/// 运行时选择的存储后端
pub enum StoreBackend {
    Toml(TomlExamStore),
    Api(ApiExamStore),
}

impl ExamStore for StoreBackend {
    async fn save(&self, exam: &Exam) -> AppResult<SaveReceipt> {
        match self {
            StoreBackend::Toml(store) => store.save(exam).await,
            StoreBackend::Api(store) => store.save(exam).await,
        }
    }
}

/// 把试卷标题转为安全的文件名
fn sanitize_file_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "exam".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{OptionLabel, Question, QuestionType};

    fn exam(title: &str) -> Exam {
        let question = Question::new("Is the sky blue?", QuestionType::TrueFalse)
            .with_option(OptionLabel::A, "True")
            .with_option(OptionLabel::B, "False")
            .with_answers(["A"]);
        Exam::new(title, vec![question], Some("admin".to_string())).unwrap()
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Unit 1: A/B?"), "Unit 1_ A_B_");
        assert_eq!(sanitize_file_name("   "), "exam");
        assert_eq!(sanitize_file_name("地理测验"), "地理测验");
    }

    #[tokio::test]
    async fn test_toml_store_writes_readable_exam() {
        let dir = std::env::temp_dir().join(format!("exam_csv_import_store_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let store = TomlExamStore::new(&dir);

        let receipt = store.save(&exam("Weather")).await.unwrap();
        assert_eq!(receipt.question_count, 1);
        assert!(receipt.location.ends_with("Weather.toml"));

        let content = std::fs::read_to_string(dir.join("Weather.toml")).unwrap();
        let loaded: Exam = toml::from_str(&content).unwrap();
        assert_eq!(loaded.title, "Weather");
        assert_eq!(loaded.author.as_deref(), Some("admin"));
        assert_eq!(loaded.questions, exam("Weather").questions);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_api_store_requires_base_url() {
        let err = ApiExamStore::from_config(&Config::default()).err().unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_api_endpoint_trims_trailing_slash() {
        let store = ApiExamStore::new("http://localhost:8080/api/", "t");
        assert_eq!(store.endpoint(), "http://localhost:8080/api/exams");
    }
}
