//! 题目批量校验
//!
//! 对每道题执行全部规则，不短路，一次性给出完整错误列表。
//! 校验本身从不失败，任何数据问题都体现为错误信息。

use serde::Serialize;

use crate::models::question::{OptionLabel, Question, QuestionType};

pub const NO_VALID_QUESTIONS: &str = "No valid questions found in CSV";

/// 校验选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// 把 CSV 中无法识别的题型字面量当作错误，而不是静默回退为单选
    pub strict_types: bool,
}

/// 校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// 题目校验器
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// 严格模式：报告无法识别的题型
    pub fn strict() -> Self {
        Self::new(ValidationOptions { strict_types: true })
    }

    /// 校验一批题目
    pub fn validate(&self, questions: &[Question]) -> ValidationResult {
        if questions.is_empty() {
            return ValidationResult::from_errors(vec![NO_VALID_QUESTIONS.to_string()]);
        }

        let mut errors = Vec::new();
        for (index, question) in questions.iter().enumerate() {
            let row = question.source_row.unwrap_or(index + 2);
            self.check_question(question, row, &mut errors);
        }

        ValidationResult::from_errors(errors)
    }

    fn check_question(&self, question: &Question, row: usize, errors: &mut Vec<String>) {
        if question.question_text.is_empty() {
            errors.push(format!("Row {}: Question text is required", row));
        }

        if self.options.strict_types {
            if let Some(literal) = &question.unrecognized_type {
                errors.push(format!(
                    "Row {}: Invalid question type '{}'. Must be {}",
                    row,
                    literal,
                    allowed_type_list()
                ));
            }
        }

        if !question.is_populated(OptionLabel::A) || !question.is_populated(OptionLabel::B) {
            errors.push(format!(
                "Row {}: Questions must have at least optionA and optionB",
                row
            ));
        }

        if question.correct_answers.is_empty() {
            errors.push(format!(
                "Row {}: At least one correct answer is required",
                row
            ));
        }

        if question.question_type == QuestionType::Single && question.correct_answers.len() > 1 {
            errors.push(format!(
                "Row {}: Single-choice questions can only have one correct answer",
                row
            ));
        }

        let invalid: Vec<&str> = question
            .correct_answers
            .iter()
            .map(String::as_str)
            .filter(|answer| {
                !OptionLabel::from_answer(answer).is_some_and(|label| question.is_populated(label))
            })
            .collect();
        if !invalid.is_empty() {
            errors.push(format!(
                "Row {}: Invalid correct answers: {}",
                row,
                invalid.join(", ")
            ));
        }
    }
}

/// `'true-false', 'single', or 'multiple'`
fn allowed_type_list() -> String {
    let quoted: Vec<String> = QuestionType::ALL
        .iter()
        .map(|t| format!("'{}'", t.literal()))
        .collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

/// 使用默认（宽松）选项校验
pub fn validate_questions(questions: &[Question]) -> ValidationResult {
    Validator::default().validate(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv_content;

    fn question(t: QuestionType, a: &str, b: &str, answers: &[&str]) -> Question {
        Question::new("What?", t)
            .with_option(OptionLabel::A, a)
            .with_option(OptionLabel::B, b)
            .with_answers(answers.iter().copied())
    }

    #[test]
    fn test_whitespace_question_text_is_not_empty() {
        let mut q = question(QuestionType::Single, "x", "y", &["A"]);
        q.question_text = "   ".to_string();
        assert!(validate_questions(&[q.clone()]).is_valid);

        q.question_text.clear();
        assert_eq!(
            validate_questions(&[q]).errors,
            vec!["Row 2: Question text is required"]
        );
    }

    #[test]
    fn test_empty_batch_has_single_error() {
        let result = validate_questions(&[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("No valid questions found"));
    }

    #[test]
    fn test_sample_document_is_valid() {
        let questions = parse_csv_content(
            "question,type,optionA,optionB,optionC,optionD,correctAnswers
Is the sky blue?,true-false,True,False,,,A
Which of these are fruits?,multiple,Apple,Car,Orange,Train,A|C",
        );
        let result = validate_questions(&questions);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_single_with_two_answers() {
        let result = validate_questions(&[question(QuestionType::Single, "x", "y", &["A", "B"])]);
        assert_eq!(
            result.errors,
            vec!["Row 2: Single-choice questions can only have one correct answer"]
        );
    }

    #[test]
    fn test_single_with_two_answers_keeps_other_checks() {
        let q = question(QuestionType::Single, "x", "y", &["A", "C"]);
        let result = validate_questions(&[q]);
        assert_eq!(
            result.errors,
            vec![
                "Row 2: Single-choice questions can only have one correct answer",
                "Row 2: Invalid correct answers: C",
            ]
        );
    }

    #[test]
    fn test_missing_option_b_for_every_type() {
        for t in QuestionType::ALL {
            let result = validate_questions(&[question(t, "X", "", &["A"])]);
            assert!(!result.is_valid);
            assert!(
                result.errors.iter().any(|e| e.contains("optionB")),
                "{:?}: {:?}",
                t,
                result.errors
            );
        }
    }

    #[test]
    fn test_answer_referencing_empty_slot() {
        let q = question(QuestionType::Multiple, "x", "y", &["A", "C"]).with_option(OptionLabel::C, "");
        let result = validate_questions(&[q]);
        assert_eq!(result.errors, vec!["Row 2: Invalid correct answers: C"]);
    }

    #[test]
    fn test_unknown_letters_are_invalid_answers() {
        let q = question(QuestionType::Multiple, "x", "y", &["E", "a", "B"]);
        let result = validate_questions(&[q]);
        assert_eq!(result.errors, vec!["Row 2: Invalid correct answers: E, a"]);
    }

    #[test]
    fn test_all_checks_run_without_short_circuit() {
        let mut q = question(QuestionType::Single, "", "", &[]);
        q.question_text.clear();
        let result = validate_questions(&[q]);
        assert_eq!(
            result.errors,
            vec![
                "Row 2: Question text is required",
                "Row 2: Questions must have at least optionA and optionB",
                "Row 2: At least one correct answer is required",
            ]
        );
    }

    #[test]
    fn test_row_numbers_follow_batch_position_without_source_row() {
        let good = question(QuestionType::Single, "x", "y", &["A"]);
        let bad = question(QuestionType::Single, "x", "y", &["D"]);
        let result = validate_questions(&[good, bad.clone(), bad]);
        assert_eq!(
            result.errors,
            vec![
                "Row 3: Invalid correct answers: D",
                "Row 4: Invalid correct answers: D",
            ]
        );
    }

    #[test]
    fn test_row_numbers_follow_document_lines() {
        let questions = parse_csv_content(
            "question,type,optionA,optionB,correctAnswers
Short row,single
Q?,single,x,y,C",
        );
        let result = validate_questions(&questions);
        assert_eq!(result.errors, vec!["Row 3: Invalid correct answers: C"]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let batch = vec![
            question(QuestionType::Single, "x", "", &["A", "B"]),
            question(QuestionType::TrueFalse, "True", "False", &["A"]),
        ];
        let first = validate_questions(&batch);
        let second = validate_questions(&batch);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strict_mode_reports_unrecognized_type() {
        let questions = parse_csv_content(
            "question,type,optionA,optionB,correctAnswers
Is it?,boolean,True,False,A",
        );

        assert!(validate_questions(&questions).is_valid);

        let result = Validator::strict().validate(&questions);
        assert_eq!(
            result.errors,
            vec!["Row 2: Invalid question type 'boolean'. Must be 'true-false', 'single', or 'multiple'"]
        );
    }
}
