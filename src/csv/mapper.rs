//! CSV 行 → 题目记录
//!
//! 按位置把表头与字段配对。无法识别的表头直接忽略。

use phf::phf_map;
use serde::Serialize;
use tracing::debug;

use crate::csv::tokenizer::parse_line;
use crate::models::question::{OptionLabel, Question, QuestionType};

/// 可识别的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Question,
    Type,
    Option(OptionLabel),
    CorrectAnswers,
}

/// 小写表头 → 列
static COLUMNS: phf::Map<&'static str, Column> = phf_map! {
    "question" => Column::Question,
    "type" => Column::Type,
    "optiona" => Column::Option(OptionLabel::A),
    "optionb" => Column::Option(OptionLabel::B),
    "optionc" => Column::Option(OptionLabel::C),
    "optiond" => Column::Option(OptionLabel::D),
    "correctanswers" => Column::CorrectAnswers,
};

impl Column {
    /// 按表头查找列（不区分大小写）
    pub fn from_header(header: &str) -> Option<Self> {
        COLUMNS.get(header.trim().to_lowercase().as_str()).copied()
    }
}

/// 被丢弃的数据行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 文档中的行号（表头为第 1 行）
    pub row: usize,
    pub reason: SkipReason,
}

/// 丢弃原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// 字段数少于表头
    TooFewFields { found: usize, expected: usize },
    /// 缺少题干或正确答案
    MissingQuestionOrAnswers,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            SkipReason::TooFewFields { found, expected } => write!(
                f,
                "Row {}: skipped, found {} fields but the header has {}",
                self.row, found, expected
            ),
            SkipReason::MissingQuestionOrAnswers => write!(
                f,
                "Row {}: skipped, question text or correct answers missing",
                self.row
            ),
        }
    }
}

/// 整个文档的解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// 小写并去除空白后的表头
    pub headers: Vec<String>,
    pub questions: Vec<Question>,
    /// 诊断用，不影响校验结果
    pub skipped: Vec<SkippedRow>,
}

/// 题目映射器
///
/// 持有已解析的表头，可以逐行映射，适合流式处理大文件。
#[derive(Debug, Clone)]
pub struct QuestionMapper {
    headers: Vec<String>,
    columns: Vec<Option<Column>>,
}

impl QuestionMapper {
    /// 从表头行创建映射器
    ///
    /// 表头只按逗号切分，不识别引号。
    pub fn from_header_line(line: &str) -> Self {
        Self::new(line.split(',').map(str::to_string).collect())
    }

    pub fn new(headers: Vec<String>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let columns = headers.iter().map(|h| Column::from_header(h)).collect();
        Self { headers, columns }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 把一行字段映射为题目
    ///
    /// 返回 `Err` 表示该行被丢弃以及原因；`row` 为文档行号。
    pub fn map_row(&self, fields: &[String], row: usize) -> Result<Question, SkipReason> {
        if fields.len() < self.headers.len() {
            return Err(SkipReason::TooFewFields {
                found: fields.len(),
                expected: self.headers.len(),
            });
        }

        let mut question = Question {
            source_row: Some(row),
            ..Default::default()
        };

        for (column, value) in self.columns.iter().zip(fields) {
            let Some(column) = column else { continue };
            let value = value.trim();

            match column {
                Column::Question => question.question_text = value.to_string(),
                Column::Type => match QuestionType::from_literal(value) {
                    Some(t) => {
                        question.question_type = t;
                        question.unrecognized_type = None;
                    }
                    None if !value.is_empty() => {
                        question.unrecognized_type = Some(value.to_string());
                    }
                    None => {}
                },
                Column::Option(label) => *question.option_mut(*label) = Some(value.to_string()),
                Column::CorrectAnswers => question.correct_answers = split_answers(value),
            }
        }

        if question.question_text.is_empty() || question.correct_answers.is_empty() {
            return Err(SkipReason::MissingQuestionOrAnswers);
        }

        Ok(question)
    }

    /// 把已切分的数据行映射为题目列表，不满足条件的行静默丢弃
    pub fn map_rows(&self, rows: &[Vec<String>]) -> Vec<Question> {
        rows.iter()
            .enumerate()
            .filter_map(|(idx, fields)| self.map_row(fields, idx + 2).ok())
            .collect()
    }
}

/// 解析 `A|C` 形式的答案列表：按 `|` 切分、去空白、去掉空片段，保留顺序和重复项
pub fn split_answers(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解析整个 CSV 文档
pub fn parse_document(content: &str) -> ParsedDocument {
    let mut lines = content.trim().split('\n');
    let header_line = lines.next().unwrap_or_default();
    let mapper = QuestionMapper::from_header_line(header_line);

    let mut doc = ParsedDocument {
        headers: mapper.headers().to_vec(),
        ..Default::default()
    };

    for (idx, line) in lines.enumerate() {
        let row = idx + 2;
        let fields = parse_line(line);

        match mapper.map_row(&fields, row) {
            Ok(question) => doc.questions.push(question),
            Err(_) if line.trim().is_empty() => {}
            Err(reason) => {
                debug!("第 {} 行被丢弃: {:?}", row, reason);
                doc.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    doc
}

/// 解析 CSV 文本为题目列表
pub fn parse_csv_content(content: &str) -> Vec<Question> {
    parse_document(content).questions
}
