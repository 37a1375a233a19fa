//! Lexer 主入口
//!
//! 包装 PythonScanner 与 CharStream，按需产出 token。
//!
//! # 示例
//!
//! ```rust
//! use pyfuscate_core::kit::lexer::{Lexer, PyTokenKind};
//!
//! let tokens = pyfuscate_core::kit::lexer::tokenize("x = 1\n").unwrap();
//! assert_eq!(tokens[0].kind, PyTokenKind::Name);
//!
//! let mut lexer = Lexer::new("pass\n");
//! assert_eq!(lexer.next_token().unwrap().unwrap().text, "pass");
//! ```

use crate::kit::lexer::error::LexerError;
use crate::kit::lexer::types::PyToken;
use crate::kit::lexer::{CharStream, PythonScanner, ScanResult, Scanner};

use tracing::{debug, trace, warn};

/// Python 源码词法分析器
pub struct Lexer {
    scanner: PythonScanner,
    stream: CharStream,
    /// 已结束（EOF 或错误），之后不再产出 token
    done: bool,
}

impl Lexer {
    /// 从完整源文本创建 Lexer
    pub fn new(source: &str) -> Self {
        trace!(target: "pyfuscate::lexer", "Creating new Lexer for {} bytes", source.len());
        Self {
            scanner: PythonScanner::new(),
            stream: CharStream::new(source),
            done: false,
        }
    }

    /// 获取下一个 Token
    ///
    /// `Ok(None)` 表示 ENDMARKER 之后输入已耗尽；词法错误是致命的，
    /// 返回错误后 Lexer 不再产出任何 token。
    pub fn next_token(&mut self) -> Result<Option<PyToken>, LexerError> {
        if self.done {
            return Ok(None);
        }

        match self.scanner.next_token(&mut self.stream) {
            ScanResult::Token(token) => {
                debug!(target: "pyfuscate::lexer",
                    kind = token.kind.name(),
                    text = ?token.text,
                    line = token.span.start.line,
                    column = token.span.start.column,
                    "Produced token"
                );
                Ok(Some(token))
            }
            ScanResult::Eof => {
                trace!(target: "pyfuscate::lexer", "Reached EOF");
                self.done = true;
                Ok(None)
            }
            ScanResult::Error(e) => {
                self.done = true;
                let err = LexerError::from(e);
                warn!(target: "pyfuscate::lexer", "Lex error encountered: {}", err);
                Err(err)
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<PyToken, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// 一次性切分整个源文本
pub fn tokenize(source: &str) -> Result<Vec<PyToken>, LexerError> {
    Lexer::new(source).collect()
}
