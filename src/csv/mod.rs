//! CSV 导入核心
//!
//! 文本 → 行切分（`tokenizer`）→ 题目映射（`mapper`）。
//! 纯函数，不做任何 I/O。

pub mod mapper;
pub mod tokenizer;

pub use mapper::{
    parse_csv_content, parse_document, split_answers, Column, ParsedDocument, QuestionMapper,
    SkipReason, SkippedRow,
};
pub use tokenizer::parse_line;
