//! 词法分析基础设施：字符流与位置

pub mod position;
pub mod stream;

pub use position::{SourcePosition, SourceSpan};
pub use stream::CharStream;
