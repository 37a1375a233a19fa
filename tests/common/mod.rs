//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use pyfuscate::{obfuscate, ObfuscateOutput, RunConfig};
use tempfile::TempDir;

/// 在临时目录中写入一个源文件
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// 写入文件并返回其路径
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(contents.as_bytes()).expect("write file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// 使用默认配置改写
pub fn run_default(code: &str) -> ObfuscateOutput {
    obfuscate(code, &RunConfig::default()).expect("obfuscation should succeed")
}

/// 去掉首行后的输出行
pub fn body_lines(text: &str) -> Vec<String> {
    text.lines().skip(1).map(str::to_string).collect()
}
