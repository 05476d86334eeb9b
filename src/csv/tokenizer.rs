//! CSV 行切分
//!
//! 只支持一种简化的引号规则：
//! - 行首或逗号后紧跟的 `"` 进入引号模式
//! - 引号模式中遇到的下一个 `"` 退出引号模式
//! - 引号模式中的逗号按普通字符处理
//!
//! 不支持转义引号，格式错误时不报错，继续把字符累积到当前字段。

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// 把一行 CSV 文本切分为去除首尾空白的字段列表
///
/// 空行返回只包含一个空字符串的列表。
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut prev: Option<char> = None;

    for ch in line.chars() {
        let opens_quote = ch == QUOTE && matches!(prev, None | Some(DELIMITER));

        if opens_quote {
            in_quotes = true;
        } else if ch == QUOTE && in_quotes {
            in_quotes = false;
        } else if ch == DELIMITER && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }

        prev = Some(ch);
    }

    fields.push(current.trim().to_string());
    fields
}
