//! API 层配置
//!
//! 包含运行配置 RunConfig 和全局单例（供 CLI 使用）

use once_cell::sync::OnceCell;
use pyfuscate_config::{OutputConfig, RenameConfig, VocabularyConfig};

use crate::error::PyfuscateError;

/// Run configuration
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Rename table settings
    pub rename: RenameConfig,
    /// Known-name vocabulary settings
    pub vocabulary: VocabularyConfig,
    /// Output settings
    pub output: OutputConfig,
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (call once before any operation)
pub fn init(config: RunConfig) -> Result<(), PyfuscateError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| PyfuscateError::Config("configuration already initialized".to_string()))
}

/// Get global config reference, falling back to defaults if never initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}
