use serde::{Deserialize, Serialize};

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionType {
    /// 判断题
    #[serde(rename = "true-false")]
    TrueFalse,
    /// 单选题
    #[default]
    #[serde(rename = "single")]
    Single,
    /// 多选题
    #[serde(rename = "multiple")]
    Multiple,
}

impl QuestionType {
    /// 全部题型，按 CSV 字面量顺序
    pub const ALL: [QuestionType; 3] = [
        QuestionType::TrueFalse,
        QuestionType::Single,
        QuestionType::Multiple,
    ];

    /// CSV 中使用的字面量
    pub fn literal(self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "true-false",
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
        }
    }

    /// 从字面量解析题型（精确匹配，区分大小写）
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "true-false" => Some(QuestionType::TrueFalse),
            "single" => Some(QuestionType::Single),
            "multiple" => Some(QuestionType::Multiple),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal())
    }
}

/// 选项标签 A-D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    /// 解析答案中的选项字母（精确匹配大写字母）
    pub fn from_answer(s: &str) -> Option<Self> {
        match s {
            "A" => Some(OptionLabel::A),
            "B" => Some(OptionLabel::B),
            "C" => Some(OptionLabel::C),
            "D" => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 题目记录
///
/// 由 CSV 映射或手动录入产生，校验前可以暂时不满足业务约束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub question_text: String,

    #[serde(rename = "type", default)]
    pub question_type: QuestionType,

    #[serde(rename = "optionA", default, skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(rename = "optionB", default, skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(rename = "optionC", default, skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(rename = "optionD", default, skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,

    #[serde(rename = "correctAnswers", default)]
    pub correct_answers: Vec<String>,

    /// 来源行号（表头为第 1 行）
    #[serde(skip)]
    pub source_row: Option<usize>,

    /// CSV 中出现但无法识别的题型字面量
    #[serde(skip)]
    pub unrecognized_type: Option<String>,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            question_text: String::new(),
            question_type: QuestionType::Single,
            option_a: None,
            option_b: None,
            option_c: None,
            option_d: None,
            correct_answers: Vec::new(),
            source_row: None,
            unrecognized_type: None,
        }
    }
}

impl Question {
    /// 创建指定题干和题型的空题目
    pub fn new(question_text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            question_text: question_text.into(),
            question_type,
            ..Default::default()
        }
    }

    /// 获取选项槽位的原始值
    pub fn option(&self, label: OptionLabel) -> Option<&str> {
        match label {
            OptionLabel::A => self.option_a.as_deref(),
            OptionLabel::B => self.option_b.as_deref(),
            OptionLabel::C => self.option_c.as_deref(),
            OptionLabel::D => self.option_d.as_deref(),
        }
    }

    /// 获取选项槽位的可变引用
    pub fn option_mut(&mut self, label: OptionLabel) -> &mut Option<String> {
        match label {
            OptionLabel::A => &mut self.option_a,
            OptionLabel::B => &mut self.option_b,
            OptionLabel::C => &mut self.option_c,
            OptionLabel::D => &mut self.option_d,
        }
    }

    /// 设置选项内容
    pub fn with_option(mut self, label: OptionLabel, text: impl Into<String>) -> Self {
        *self.option_mut(label) = Some(text.into());
        self
    }

    /// 设置正确答案
    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.correct_answers = answers.into_iter().map(Into::into).collect();
        self
    }

    /// 槽位是否有非空内容
    pub fn is_populated(&self, label: OptionLabel) -> bool {
        self.option(label).is_some_and(|s| !s.is_empty())
    }

    /// 已填写的选项标签
    pub fn populated_options(&self) -> Vec<OptionLabel> {
        OptionLabel::ALL
            .into_iter()
            .filter(|label| self.is_populated(*label))
            .collect()
    }

    /// 某个选项是否被标记为正确答案
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct_answers.iter().any(|a| a == label.as_str())
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview = crate::utils::logging::truncate_text(&self.question_text, 80);
        write!(
            f,
            "{} [{}] 答案: {}",
            preview,
            self.question_type,
            self.correct_answers.join("|")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_literals() {
        for t in QuestionType::ALL {
            assert_eq!(QuestionType::from_literal(t.literal()), Some(t));
        }
        assert_eq!(QuestionType::from_literal("Single"), None);
        assert_eq!(QuestionType::from_literal("boolean"), None);
        assert_eq!(QuestionType::default(), QuestionType::Single);
    }

    #[test]
    fn test_populated_options_ignores_empty_slots() {
        let q = Question::new("Q", QuestionType::Single)
            .with_option(OptionLabel::A, "x")
            .with_option(OptionLabel::B, "")
            .with_option(OptionLabel::D, "y");

        assert_eq!(q.populated_options(), vec![OptionLabel::A, OptionLabel::D]);
        assert!(!q.is_populated(OptionLabel::C));
    }

    #[test]
    fn test_serialize_uses_csv_field_names() {
        let q = Question::new("Is the sky blue?", QuestionType::TrueFalse)
            .with_option(OptionLabel::A, "True")
            .with_option(OptionLabel::B, "False")
            .with_answers(["A"]);

        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["question"], "Is the sky blue?");
        assert_eq!(json["type"], "true-false");
        assert_eq!(json["optionA"], "True");
        assert!(json.get("optionC").is_none());
        assert_eq!(json["correctAnswers"], serde_json::json!(["A"]));
        assert!(json.get("source_row").is_none());
    }
}
