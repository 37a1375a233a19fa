//! Pyfuscate Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Pyfuscate crates.

use serde::Deserialize;
use std::path::PathBuf;

/// Default interpreter line written ahead of the rewritten source
pub const DEFAULT_HEADER: &str = "#!/usr/bin/python";

/// Default receiver identifier (conventional first parameter of methods)
pub const DEFAULT_RECEIVER: &str = "self";

/// Configuration for the rename table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Initial counter value for generated names
    pub start_counter: u64,
    /// Identifier that clears the "known chain" flag inside dotted names
    pub receiver_name: String,
}

/// Configuration for the known-name vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Extra names that must never be renamed
    pub preserve_names: Vec<String>,
    /// Qualified names skipped during expansion (added to the manifest's list)
    pub deny_list: Vec<String>,
    /// Additional manifest merged over the bundled one
    pub manifest_path: Option<PathBuf>,
}

/// Configuration for emitted output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// First line of the output, written verbatim
    pub header: String,
}

/// Log verbosity shared by the CLI and project files
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name; `silent` maps to `Error`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Processing phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Vocabulary,
    Driver,
    Api,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Vocabulary => "vocabulary",
            Phase::Driver => "driver",
            Phase::Api => "api",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("pyfuscate::{}", self.as_str())
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            start_counter: 0,
            receiver_name: DEFAULT_RECEIVER.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
        }
    }
}
