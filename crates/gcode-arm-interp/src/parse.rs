//! 行解析
//!
//! 一行先被完整解析和校验，再交给解释器执行。任何一个数值词非法，
//! 整行都被拒绝，行内的值一个也不会被应用。
//!
//! 词法规则：
//!
//! - `;` 及其后的内容是注释
//! - 词之间以任意空白分隔
//! - 词的首字符是代码字母（大小写不敏感），其余部分是数值
//! - `G`/`M` 的数值是非负整数，`X`/`Y`/`Z`/`R`/`F` 的数值是有限实数，`F` 还必须 > 0

use crate::error::{InterpreterError, Result};
use gcode_arm_robot::{Axis, MotionMode};

/// 注释起始符
pub const COMMENT_DELIMITER: char = ';';

/// 一个已解析的词
#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    /// G0/G1/G2/G3/G28
    Motion {
        /// G 代码编号
        code: u32,
        /// 对应的运动模式
        mode: MotionMode,
    },
    /// M3（true）/ M5（false）
    Spindle(bool),
    /// X/Y/Z/R
    Axis(Axis, f64),
    /// F
    Feed(f64),
    /// 不支持的词（宽松模式下跳过）
    Unsupported(String),
}

impl Word {
    /// 是否为 G28 回零
    pub fn is_home(&self) -> bool {
        matches!(self, Word::Motion { code: 28, .. })
    }
}

/// 一行的解析结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLine {
    /// 去掉注释并修剪后的文本
    pub text: String,
    /// 按出现顺序排列的词
    pub words: Vec<Word>,
}

impl ParsedLine {
    /// 去掉注释后是否为空
    pub fn is_blank(&self) -> bool {
        self.words.is_empty()
    }

    /// 本行生效的运动模式（多个 G 词时取最后一个）
    pub fn motion(&self) -> Option<MotionMode> {
        self.words.iter().rev().find_map(|w| match w {
            Word::Motion { mode, .. } => Some(*mode),
            _ => None,
        })
    }

    /// 本行是否包含 G28
    pub fn homes(&self) -> bool {
        self.words.iter().any(Word::is_home)
    }

    /// 被跳过的词
    pub fn unsupported(&self) -> impl Iterator<Item = &str> {
        self.words.iter().filter_map(|w| match w {
            Word::Unsupported(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

/// 去掉注释并修剪空白
pub fn strip_comment(line: &str) -> &str {
    line.split(COMMENT_DELIMITER).next().unwrap_or("").trim()
}

/// 解析一行
///
/// # 错误
///
/// - `InterpreterError::Parse`: 数值词非法（如 `X12abc`、`F0`、`Ginf`）
/// - `InterpreterError::UnsupportedWord`: 严格模式下遇到不支持的词
pub fn parse_line(line: &str, strict: bool) -> Result<ParsedLine> {
    let text = strip_comment(line);
    let mut words = Vec::new();

    for raw in text.split_whitespace() {
        let word = parse_word(text, raw)?;
        if strict && let Word::Unsupported(w) = &word {
            return Err(InterpreterError::UnsupportedWord {
                line: text.to_string(),
                word: w.clone(),
            });
        }
        words.push(word);
    }

    Ok(ParsedLine {
        text: text.to_string(),
        words,
    })
}

fn parse_word(line: &str, raw: &str) -> Result<Word> {
    let mut chars = raw.chars();
    let Some(letter) = chars.next() else {
        return Ok(Word::Unsupported(raw.to_string()));
    };
    let value = chars.as_str();

    let parse_error = |reason: &str| InterpreterError::Parse {
        line: line.to_string(),
        word: raw.to_string(),
        reason: reason.to_string(),
    };

    let word = match letter.to_ascii_uppercase() {
        'G' => {
            let code = parse_code(value).ok_or_else(|| parse_error("has no valid G-code number"))?;
            match MotionMode::from_g_code(code) {
                Some(mode) => Word::Motion { code, mode },
                None => Word::Unsupported(raw.to_string()),
            }
        },
        'M' => {
            let code = parse_code(value).ok_or_else(|| parse_error("has no valid M-code number"))?;
            match code {
                3 => Word::Spindle(true),
                5 => Word::Spindle(false),
                _ => Word::Unsupported(raw.to_string()),
            }
        },
        'F' => {
            let feed = parse_real(value).ok_or_else(|| parse_error("is not a valid number"))?;
            if feed <= 0.0 {
                return Err(parse_error("must be a positive feed rate"));
            }
            Word::Feed(feed)
        },
        other => match Axis::from_letter(other) {
            Some(axis) => {
                let v = parse_real(value).ok_or_else(|| parse_error("is not a valid number"))?;
                Word::Axis(axis, v)
            },
            None => Word::Unsupported(raw.to_string()),
        },
    };
    Ok(word)
}

/// 非负整数代码（`G01` 与 `G1` 等价）
fn parse_code(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// 有限实数（拒绝 `inf`、`NaN`）
fn parse_real(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
