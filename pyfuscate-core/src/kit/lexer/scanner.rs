//! Scanner trait 定义
//!
//! 词法分析器需实现此 trait

use super::core::{CharStream, SourcePosition, SourceSpan};

/// 词法扫描器 trait
pub trait Scanner {
    /// Token 类型
    type TokenKind: Clone + PartialEq + std::fmt::Debug;

    /// 创建新扫描器
    fn new() -> Self;

    /// 扫描下一个 token
    ///
    /// 这是核心方法，驱动字符流并生成 token
    fn next_token(&mut self, stream: &mut CharStream) -> ScanResult<Token<Self::TokenKind>>;
}

/// Token 结构
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    pub kind: K,
    pub span: SourceSpan,
    /// 原始文本
    pub text: String,
}

impl<K> Token<K> {
    /// 创建新 token
    pub fn new(kind: K, span: SourceSpan, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    /// 获取 token 的起始位置
    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    /// 获取 token 的结束位置
    pub fn end(&self) -> SourcePosition {
        self.span.end
    }

    /// 起始行号（1-based）
    pub fn line(&self) -> usize {
        self.span.start.line
    }
}

/// 扫描结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanResult<T> {
    /// 成功扫描到 token
    Token(T),
    /// 流已结束
    Eof,
    /// 扫描错误
    Error(LexError),
}

impl<T> ScanResult<T> {
    /// 将 token 类型映射为另一种类型
    pub fn map_kind<U, F>(self, f: F) -> ScanResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ScanResult::Token(t) => ScanResult::Token(f(t)),
            ScanResult::Eof => ScanResult::Eof,
            ScanResult::Error(e) => ScanResult::Error(e),
        }
    }
}

/// 词法错误
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: ErrorKind,
    pub position: SourcePosition,
}

impl LexError {
    pub fn new(kind: ErrorKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }
}

/// 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// 非法字符
    InvalidChar(char),
    /// 单引号字符串在行尾未闭合
    UnterminatedString,
    /// 三引号字符串在文件末尾未闭合
    UnterminatedTripleString,
    /// 缩进减少后与任何外层缩进都不匹配
    InconsistentDedent,
    /// 多行语句（括号或续行符）中遇到文件结束
    UnexpectedEof,
}

/// 辅助函数：检查字符是否为标识符起始字符
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// 辅助函数：检查字符是否为标识符延续字符
pub fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Token 构建器
pub struct TokenBuilder<K> {
    kind: K,
    start: SourcePosition,
}

impl<K> TokenBuilder<K> {
    pub fn new(kind: K, start: SourcePosition) -> Self {
        Self { kind, start }
    }

    pub fn build(self, end: SourcePosition, text: impl Into<String>) -> Token<K> {
        Token::new(self.kind, SourceSpan::range(self.start, end), text)
    }
}
