//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use pyfuscate_core::obfuscate::{Manifest, ObfuscateSummary, Obfuscator};
use pyfuscate_core::{tokenize, RenameConfig, VocabularyConfig};

/// 测试用选项
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub start_counter: u64,
    pub preserve_names: Vec<String>,
    pub header: Option<String>,
}

impl Options {
    pub fn counter(start_counter: u64) -> Self {
        Self {
            start_counter,
            ..Default::default()
        }
    }

    pub fn preserve(names: &[&str]) -> Self {
        Self {
            preserve_names: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// 完整流程：词法分析 + 改写，返回输出文本和摘要
///
/// # Example
/// ```
/// let (out, _) = obfuscate_source("x = 1\n", &Options::default()).unwrap();
/// assert_eq!(out, "name0x0 = 1 \n");
/// ```
pub fn obfuscate_source(code: &str, options: &Options) -> Result<(String, ObfuscateSummary), String> {
    let tokens = tokenize(code).map_err(|e| format!("Lexer error: {}", e))?;

    let rename = RenameConfig {
        start_counter: options.start_counter,
        ..Default::default()
    };
    let vocabulary = VocabularyConfig {
        preserve_names: options.preserve_names.clone(),
        ..Default::default()
    };
    let manifest = Manifest::bundled().map_err(|e| e.to_string())?;

    let mut engine = Obfuscator::new(Vec::new(), manifest, &rename, &vocabulary);
    if let Some(header) = &options.header {
        engine
            .write_header(header)
            .map_err(|e| format!("IO error: {}", e))?;
    }
    for token in tokens {
        engine.push(token).map_err(|e| format!("IO error: {}", e))?;
    }
    let (sink, summary) = engine.finish().map_err(|e| format!("IO error: {}", e))?;
    let text = String::from_utf8(sink).map_err(|e| e.to_string())?;
    Ok((text, summary))
}

/// 使用默认选项改写，只返回文本
pub fn obfuscate(code: &str) -> String {
    obfuscate_source(code, &Options::default())
        .expect("obfuscation should succeed")
        .0
}

/// 提取文本中所有生成名（`name0x…`、`_name0x…`、`__name0x…`）
pub fn generated_names(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| word.trim_start_matches('_').starts_with("name0x"))
        .map(str::to_string)
        .collect()
}
