//! 标识符混淆引擎
//!
//! - `manifest`: 预生成的 Python 环境词汇
//! - `vocabulary`: 已知名字集合
//! - `scope`: 缩进栈
//! - `dotted`: 限定名解析
//! - `rename`: 重命名表
//! - `driver`: 逻辑行驱动

pub mod dotted;
pub mod driver;
pub mod manifest;
pub mod rename;
pub mod scope;
pub mod vocabulary;

pub use dotted::{resolve_dotted, DottedName};
pub use driver::Obfuscator;
pub use manifest::{Manifest, ManifestError};
pub use rename::{generated_name, NameShape, RenameTable};
pub use scope::IndentStack;
pub use vocabulary::{ImportWarning, KnownNames};

use serde::Serialize;

/// 一次运行的摘要
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObfuscateSummary {
    /// 写出的逻辑行数（不含首行）
    pub lines_written: usize,
    /// 被重命名的不同名字数
    pub renamed: usize,
    /// 运行结束时的已知名字数
    pub known_names: usize,
    /// 下一个可用计数值
    pub next_counter: u64,
    /// 模块加载失败
    pub warnings: Vec<ImportWarning>,
}
