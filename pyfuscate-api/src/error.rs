//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。

use serde::Serialize;
use thiserror::Error;

/// 词法错误（结构化）
pub use pyfuscate_core::kit::lexer::LexerError;

/// 清单错误
pub use pyfuscate_core::obfuscate::ManifestError;

/// Pyfuscate 错误类型
#[derive(Error, Debug)]
pub enum PyfuscateError {
    /// 配置错误（输入文件缺失或不可读等），发生在处理开始之前
    #[error("{0}")]
    Config(String),

    /// 词法分析错误（结构化），终止整个运行
    #[error("{0}")]
    Lexer(#[from] LexerError),

    /// 清单加载错误
    #[error("{0}")]
    Manifest(#[from] ManifestError),

    /// 输出写入错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PyfuscateError {
    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            PyfuscateError::Lexer(e) => Some(e.line()),
            _ => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            PyfuscateError::Lexer(e) => Some(e.column()),
            _ => None,
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            PyfuscateError::Config(_) => "config",
            PyfuscateError::Lexer(_) => "lexer",
            PyfuscateError::Manifest(_) => "manifest",
            PyfuscateError::Io(_) => "io",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    ///
    /// # Example
    /// ```ignore
    /// match obfuscate(source, &config) {
    ///     Err(e) => {
    ///         let report = e.to_report();
    ///         eprintln!("{}", report);
    ///         let json = report.to_json();
    ///     }
    ///     Ok(_) => {}
    /// }
    /// ```
    pub fn to_report(&self) -> ErrorReport {
        let error_kind = match self {
            PyfuscateError::Config(_) => "ConfigError".to_string(),
            PyfuscateError::Lexer(e) => format!("{:?}", e.kind),
            PyfuscateError::Manifest(ManifestError::Io { .. }) => "ManifestIo".to_string(),
            PyfuscateError::Manifest(ManifestError::Parse(_)) => "ManifestParse".to_string(),
            PyfuscateError::Io(e) => format!("{:?}", e.kind()),
        };
        let message = match self {
            PyfuscateError::Lexer(e) => e.message.clone(),
            other => other.to_string(),
        };

        ErrorReport {
            phase: self.phase(),
            line: self.line(),
            column: self.column(),
            error_kind,
            message,
        }
    }
}

/// 结构化错误报告
///
/// 上层应用（CLI、编辑器插件）可以根据自己的需求格式化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: config, lexer, manifest, io
    pub phase: &'static str,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}
