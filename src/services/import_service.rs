//! 导入服务 - 业务能力层
//!
//! 只负责“一个 CSV 文档 → 题目 + 错误列表”，不关心文件来源和保存。

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv::{parse_document, SkippedRow};
use crate::models::question::Question;
use crate::utils::logging::truncate_text;
use crate::validation::{ValidationOptions, ValidationResult, Validator};

/// 单个文档的导入结果
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// 校验通过时为全部题目，失败时为空，调用方不能拿去保存
    pub questions: Vec<Question>,
    pub validation: ValidationResult,
    /// 被静默丢弃的行（仅提示）
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.validation.errors
    }

    /// 丢弃行的提示信息
    pub fn warnings(&self) -> Vec<String> {
        self.skipped.iter().map(ToString::to_string).collect()
    }
}

/// 导入服务
pub struct ImportService {
    validator: Validator,
    verbose_logging: bool,
}

impl ImportService {
    pub fn new(options: ValidationOptions, verbose_logging: bool) -> Self {
        Self {
            validator: Validator::new(options),
            verbose_logging,
        }
    }

    /// 解析并校验一个 CSV 文档
    pub fn import(&self, content: &str) -> ImportReport {
        let doc = parse_document(content);
        debug!(
            "表头: {:?} | 解析出 {} 道题 | 丢弃 {} 行",
            doc.headers,
            doc.questions.len(),
            doc.skipped.len()
        );

        for skipped in &doc.skipped {
            warn!("⚠️ {}", skipped);
        }

        let validation = self.validator.validate(&doc.questions);

        if validation.is_valid {
            info!("✓ 解析成功，共 {} 道题", doc.questions.len());
            if self.verbose_logging {
                self.log_preview(&doc.questions);
            }
            ImportReport {
                questions: doc.questions,
                validation,
                skipped: doc.skipped,
            }
        } else {
            ImportReport {
                questions: Vec::new(),
                validation,
                skipped: doc.skipped,
            }
        }
    }

    /// 预览题目及正确选项
    fn log_preview(&self, questions: &[Question]) {
        for (i, question) in questions.iter().enumerate() {
            info!(
                "  {}. [{}] {}",
                i + 1,
                question.question_type,
                truncate_text(&question.question_text, 80)
            );
            for label in question.populated_options() {
                let mark = if question.is_correct(label) { "✔" } else { " " };
                info!(
                    "     {} {}: {}",
                    mark,
                    label,
                    question.option(label).unwrap_or_default()
                );
            }
        }
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(ValidationOptions::default(), false)
    }
}
