//! Lexer 错误类型
//!
//! 提供结构化的词法错误信息，包含错误类型、位置和详细消息。
//! 词法错误对整个运行是致命的。

use super::core::SourcePosition;
use super::scanner::{ErrorKind, LexError};

/// 词法错误，包含结构化信息
#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    /// 错误类型
    pub kind: ErrorKind,
    /// 错误发生的位置
    pub position: SourcePosition,
    /// 详细错误消息
    pub message: String,
}

impl LexerError {
    /// 在指定位置创建错误
    pub fn at(kind: ErrorKind, position: SourcePosition) -> Self {
        let message = Self::format_message(&kind);
        Self {
            kind,
            position,
            message,
        }
    }

    /// 获取行号（1-based）
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 获取列号（1-based）
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// 格式化错误消息
    fn format_message(kind: &ErrorKind) -> String {
        match kind {
            ErrorKind::InvalidChar(ch) => format!("Invalid character '{}'", ch),
            ErrorKind::UnterminatedString => "EOL while scanning string literal".to_string(),
            ErrorKind::UnterminatedTripleString => "EOF in multi-line string".to_string(),
            ErrorKind::InconsistentDedent => {
                "unindent does not match any outer indentation level".to_string()
            }
            ErrorKind::UnexpectedEof => "EOF in multi-line statement".to_string(),
        }
    }
}

impl From<LexError> for LexerError {
    fn from(e: LexError) -> Self {
        Self::at(e.kind, e.position)
    }
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}] {}",
            self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for LexerError {}
