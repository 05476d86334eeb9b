use thiserror::Error;

/// 应用程序错误类型
///
/// 只覆盖外围能力（文件、存储、手动组卷、配置）。
/// CSV 解析与校验本身从不返回错误，问题都以错误列表的形式报告。
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 试卷保存错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 手动组卷规则错误
    #[error("组卷错误: {0}")]
    Exam(#[from] ExamError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 试卷保存错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端拒绝保存
    #[error("API拒绝保存 ({endpoint}): status={status}, message={message:?}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
}

/// 手动组卷规则错误
///
/// 消息文本直接面向出题人。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    #[error("Question text is required.")]
    EmptyQuestionText,
    #[error("At least options A and B are required.")]
    MissingRequiredOptions,
    #[error("Please select at least one correct answer.")]
    NoCorrectAnswer,
    #[error("Exam title is required.")]
    EmptyTitle,
    #[error("Please add at least one question.")]
    NoQuestions,
    #[error("Question {id} not found.")]
    QuestionNotFound { id: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必要配置
    #[error("缺少配置项: {name}")]
    Missing { name: String },
}

// ========== 从常见错误类型转换 ==========

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Store(StoreError::TomlSerializeFailed(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Store(StoreError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
