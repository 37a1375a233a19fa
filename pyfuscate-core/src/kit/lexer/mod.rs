//! Python Lexer
//!
//! 设计目标：
//! - 与标准 tokenize 模块的 token 分类和 INDENT/DEDENT 语义一致
//! - 统一 Scanner trait，扫描器与字符流分离
//! - 精准位置追踪，错误可定位到行列

pub mod core;
pub mod error;
pub mod lexer;
pub mod python;
pub mod scanner;
pub mod types;

pub use core::{CharStream, SourcePosition, SourceSpan};
pub use error::LexerError;
pub use lexer::{tokenize, Lexer};
pub use python::PythonScanner;
pub use scanner::{ErrorKind, LexError, ScanResult, Scanner, Token as ScannerToken};
pub use types::{PyToken, PyTokenKind};
