//! CLI 配置
//!
//! 包含 CLI 特有的配置：日志配置和项目配置文件

use std::path::{Path, PathBuf};

use pyfuscate_config::{LogLevel, Phase};
use serde::Deserialize;
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub lexer: Option<Level>,
    pub vocabulary: Option<Level>,
    pub driver: Option<Level>,
    pub api: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::with_global(LogLevel::Warn)
    }
}

impl LogConfig {
    /// 所有阶段使用同一级别
    pub fn with_global(level: LogLevel) -> Self {
        Self {
            global: to_tracing_level(level),
            lexer: None,
            vocabulary: None,
            driver: None,
            api: None,
        }
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "pyfuscate::lexer" => self.lexer.unwrap_or(self.global),
            "pyfuscate::vocabulary" => self.vocabulary.unwrap_or(self.global),
            "pyfuscate::driver" => self.driver.unwrap_or(self.global),
            "pyfuscate::api" => self.api.unwrap_or(self.global),
            _ => self.global,
        }
    }

    /// Get log level for a processing phase
    pub fn level_for_phase(&self, phase: Phase) -> Level {
        self.level_for(&phase.target())
    }
}

pub fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// 项目配置文件（JSON），字段与命令行选项对应
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectFile {
    /// 计数器起始值
    pub count: Option<u64>,
    /// 保留名
    pub preserve_names: Vec<String>,
    /// 额外的禁止展开路径
    pub deny: Vec<String>,
    /// 用户清单（相对配置文件所在目录）
    pub manifest: Option<PathBuf>,
    /// 输出首行
    pub header: Option<String>,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    pub log_level: Option<String>,
}

/// Read and parse the project file
pub fn read_project_file(path: &Path) -> Result<ProjectFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {}", path.display(), e))?;

    let mut project: ProjectFile = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse config '{}': {}", path.display(), e))?;

    // manifest 路径相对配置文件所在目录
    if let Some(manifest) = project.manifest.take() {
        project.manifest = Some(resolve_relative(path, &manifest));
    }
    Ok(project)
}

/// Resolve a path relative to the config file directory
fn resolve_relative(config_path: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    base_dir.join(target)
}
