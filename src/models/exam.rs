//! 试卷与手动组卷
//!
//! `ExamDraft` 对应“手动出题”路径：逐题录入、删除、勾选正确答案，
//! 最后带上标题生成 `Exam`。CSV 导入路径直接用 `Exam::new`。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::ExamError;
use crate::models::question::{OptionLabel, Question, QuestionType};

/// 判断题默认选项
const TRUE_LABEL: &str = "True";
const FALSE_LABEL: &str = "False";

/// 题目附图（只用于预览，不参与校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 手动录入的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftQuestion {
    /// 本地唯一 ID，仅用于删除和预览
    pub id: String,
    pub question: Question,
    pub image: Option<QuestionImage>,
}

/// 试卷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
    pub created_at: DateTime<Local>,
    pub questions: Vec<Question>,
}

impl Exam {
    /// 创建试卷；作者由调用方显式传入
    pub fn new(
        title: impl Into<String>,
        questions: Vec<Question>,
        author: Option<String>,
    ) -> Result<Self, ExamError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ExamError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }

        Ok(Self {
            title,
            author,
            created_at: Local::now(),
            questions,
        })
    }
}

/// 手动组卷草稿
#[derive(Debug, Clone)]
pub struct ExamDraft {
    title: String,
    questions: Vec<DraftQuestion>,
    current: Question,
    current_image: Option<QuestionImage>,
    next_id: u64,
}

impl Default for ExamDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            questions: Vec::new(),
            current: blank_question(),
            current_image: None,
            next_id: 1,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 已添加的题目
    pub fn questions(&self) -> &[DraftQuestion] {
        &self.questions
    }

    /// 正在编辑的题目
    pub fn current(&self) -> &Question {
        &self.current
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.current.question_text = text.into();
    }

    pub fn set_option(&mut self, label: OptionLabel, text: impl Into<String>) {
        *self.current.option_mut(label) = Some(text.into());
    }

    /// 切换题型会清空已选答案；切到判断题时为空的 A/B 填入 True/False
    pub fn set_type(&mut self, question_type: QuestionType) {
        self.current.question_type = question_type;
        self.current.correct_answers.clear();

        if question_type == QuestionType::TrueFalse {
            for (label, default) in [(OptionLabel::A, TRUE_LABEL), (OptionLabel::B, FALSE_LABEL)] {
                let slot = self.current.option_mut(label);
                if slot.as_deref().map_or(true, str::is_empty) {
                    *slot = Some(default.to_string());
                }
            }
        }
    }

    /// 勾选或取消正确答案
    ///
    /// 单选题勾选时替换原答案；其他题型增删且不重复。
    pub fn set_correct(&mut self, label: OptionLabel, checked: bool) {
        let answers = &mut self.current.correct_answers;
        let letter = label.as_str();

        if self.current.question_type == QuestionType::Single {
            *answers = if checked { vec![letter.to_string()] } else { Vec::new() };
        } else if checked {
            if !answers.iter().any(|a| a == letter) {
                answers.push(letter.to_string());
            }
        } else {
            answers.retain(|a| a != letter);
        }
    }

    pub fn attach_image(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.current_image = Some(QuestionImage {
            file_name: file_name.into(),
            bytes,
        });
    }

    /// 把正在编辑的题目加入草稿，返回其 ID
    pub fn add_current(&mut self) -> Result<String, ExamError> {
        if self.current.question_text.trim().is_empty() {
            return Err(ExamError::EmptyQuestionText);
        }
        if !self.current.is_populated(OptionLabel::A) || !self.current.is_populated(OptionLabel::B) {
            return Err(ExamError::MissingRequiredOptions);
        }
        if self.current.correct_answers.is_empty() {
            return Err(ExamError::NoCorrectAnswer);
        }

        let id = format!("q-{}", self.next_id);
        self.next_id += 1;

        let question = std::mem::replace(&mut self.current, blank_question());
        self.questions.push(DraftQuestion {
            id: id.clone(),
            question,
            image: self.current_image.take(),
        });

        Ok(id)
    }

    /// 按 ID 删除题目
    pub fn remove(&mut self, id: &str) -> Result<DraftQuestion, ExamError> {
        let pos = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| ExamError::QuestionNotFound { id: id.to_string() })?;
        Ok(self.questions.remove(pos))
    }

    /// 生成试卷，成功后草稿被清空
    pub fn finish(&mut self, author: Option<String>) -> Result<Exam, ExamError> {
        if self.title.trim().is_empty() {
            return Err(ExamError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }

        let questions = self.questions.iter().map(|q| q.question.clone()).collect();
        let exam = Exam::new(self.title.clone(), questions, author)?;
        *self = Self {
            next_id: self.next_id,
            ..Self::new()
        };
        Ok(exam)
    }
}

/// 新题目默认单选，A-D 为空字符串
fn blank_question() -> Question {
    let mut question = Question::new("", QuestionType::Single);
    for label in OptionLabel::ALL {
        *question.option_mut(label) = Some(String::new());
    }
    question
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_questions;

    fn filled_draft() -> ExamDraft {
        let mut draft = ExamDraft::new();
        draft.set_question_text("What is the capital of India?");
        draft.set_option(OptionLabel::A, "Mumbai");
        draft.set_option(OptionLabel::B, "Delhi");
        draft.set_correct(OptionLabel::B, true);
        draft
    }

    #[test]
    fn test_add_requires_text_options_and_answer() {
        let mut draft = ExamDraft::new();
        assert_eq!(draft.add_current(), Err(ExamError::EmptyQuestionText));

        draft.set_question_text("Q?");
        draft.set_option(OptionLabel::A, "x");
        assert_eq!(draft.add_current(), Err(ExamError::MissingRequiredOptions));

        draft.set_option(OptionLabel::B, "y");
        assert_eq!(draft.add_current(), Err(ExamError::NoCorrectAnswer));

        draft.set_correct(OptionLabel::A, true);
        assert_eq!(draft.add_current(), Ok("q-1".to_string()));
        assert_eq!(draft.questions().len(), 1);
        assert!(draft.current().question_text.is_empty());
    }

    #[test]
    fn test_single_choice_toggle_replaces_answer() {
        let mut draft = filled_draft();
        draft.set_correct(OptionLabel::A, true);
        assert_eq!(draft.current().correct_answers, vec!["A"]);
        draft.set_correct(OptionLabel::A, false);
        assert!(draft.current().correct_answers.is_empty());
    }

    #[test]
    fn test_multiple_choice_toggle_adds_and_removes() {
        let mut draft = filled_draft();
        draft.set_type(QuestionType::Multiple);
        assert!(draft.current().correct_answers.is_empty());

        draft.set_correct(OptionLabel::A, true);
        draft.set_correct(OptionLabel::B, true);
        draft.set_correct(OptionLabel::A, true);
        assert_eq!(draft.current().correct_answers, vec!["A", "B"]);

        draft.set_correct(OptionLabel::A, false);
        assert_eq!(draft.current().correct_answers, vec!["B"]);
    }

    #[test]
    fn test_true_false_fills_default_options() {
        let mut draft = ExamDraft::new();
        draft.set_option(OptionLabel::A, "Yes");
        draft.set_type(QuestionType::TrueFalse);
        assert_eq!(draft.current().option_a.as_deref(), Some("Yes"));
        assert_eq!(draft.current().option_b.as_deref(), Some("False"));
    }

    #[test]
    fn test_remove_by_id() {
        let mut draft = filled_draft();
        let first = draft.add_current().unwrap();
        let mut second_draft = filled_draft();
        std::mem::swap(&mut draft.current, &mut second_draft.current);
        let second = draft.add_current().unwrap();
        assert_ne!(first, second);

        let removed = draft.remove(&first).unwrap();
        assert_eq!(removed.id, first);
        assert_eq!(draft.questions().len(), 1);
        assert_eq!(
            draft.remove(&first),
            Err(ExamError::QuestionNotFound { id: first })
        );
    }

    #[test]
    fn test_image_is_attached_to_added_question_only() {
        let mut draft = filled_draft();
        draft.attach_image("map.png", vec![0x89, 0x50]);
        draft.add_current().unwrap();
        assert_eq!(
            draft.questions()[0].image.as_ref().map(|i| i.file_name.as_str()),
            Some("map.png")
        );
        assert!(draft.current_image.is_none());
    }

    #[test]
    fn test_finish_checks_title_and_questions() {
        let mut draft = ExamDraft::new();
        assert_eq!(draft.finish(None).unwrap_err(), ExamError::EmptyTitle);

        draft.set_title("Geography");
        assert_eq!(draft.finish(None).unwrap_err(), ExamError::NoQuestions);

        let mut draft = filled_draft();
        draft.set_title("  Geography ");
        draft.add_current().unwrap();
        let exam = draft.finish(Some("instructor@example.com".to_string())).unwrap();

        assert_eq!(exam.title, "Geography");
        assert_eq!(exam.author.as_deref(), Some("instructor@example.com"));
        assert_eq!(exam.questions.len(), 1);
        assert!(draft.questions().is_empty());
        assert!(draft.title().is_empty());
    }

    #[test]
    fn test_manual_questions_pass_validation() {
        let mut draft = filled_draft();
        draft.add_current().unwrap();

        draft.set_question_text("The Earth is flat");
        draft.set_type(QuestionType::TrueFalse);
        draft.set_correct(OptionLabel::B, true);
        draft.add_current().unwrap();

        draft.set_title("Mixed");
        let exam = draft.finish(None).unwrap();
        let result = validate_questions(&exam.questions);
        assert!(result.is_valid, "{:?}", result.errors);
    }
}
