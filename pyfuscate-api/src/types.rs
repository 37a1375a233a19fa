//! API 类型定义
//!
//! 改写的输出类型。

use pyfuscate_core::ObfuscateSummary;

/// 改写输出
#[derive(Debug, Clone)]
pub struct ObfuscateOutput {
    /// 改写后的源码（含首行）
    pub text: String,
    /// 运行摘要
    pub summary: ObfuscateSummary,
}
