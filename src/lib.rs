//! # Exam CSV Import
//!
//! 出题系统的 CSV 批量导入核心：把 CSV 文本解析为题目并按业务规则校验。
//!
//! ## 架构设计
//!
//! ### ① 核心层（纯函数，无 I/O）
//! - `csv/` - 行切分（`tokenizer`）与题目映射（`mapper`）
//! - `validation/` - 批量校验，一次给出完整错误列表
//!
//! ### ② 模型层（Models）
//! - `Question` / `QuestionType` / `OptionLabel` - 题目记录
//! - `Exam` / `ExamDraft` - 试卷与手动组卷
//! - `loaders/` - 读取 CSV 文件
//!
//! ### ③ 业务能力层（Services）
//! - `ImportService` - 一个文档的解析 + 校验
//! - `ExamStore` - 试卷保存（TOML 文件 / API）
//! - `sample` - 示例模板
//!
//! ### ④ 编排层
//! - `App` - 批量处理多个 CSV 文件并统计
//!
//! 数据流：文本 → Tokenizer → 字段行 → Mapper → 题目 → Validator → (是否通过, 错误列表)

pub mod app;
pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod validation;

// 重新导出常用类型
pub use app::{App, ImportStats};
pub use config::Config;
pub use csv::{parse_csv_content, parse_document, parse_line};
pub use error::{AppError, AppResult};
pub use models::{Exam, ExamDraft, OptionLabel, Question, QuestionType};
pub use validation::{validate_questions, ValidationOptions, ValidationResult, Validator};
