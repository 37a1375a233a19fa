//! Pyfuscate API - Run orchestration layer
//!
//! Provides the unified obfuscation interface, including:
//! - Run flow orchestration (manifest, tokenizer, engine, sink)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (PyfuscateError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `obfuscate(source, &config)` API.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use pyfuscate_core::kit::lexer::Lexer;
use pyfuscate_core::obfuscate::{Manifest, ManifestError, Obfuscator};
use tracing::{debug, info};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export config types from pyfuscate_config
pub use pyfuscate_config::{LogLevel, OutputConfig, Phase, RenameConfig, VocabularyConfig};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{ErrorReport, LexerError, PyfuscateError};
pub use types::ObfuscateOutput;

// Re-export core types
pub use pyfuscate_config;
pub use pyfuscate_core;
pub use pyfuscate_core::{ImportWarning, ObfuscateSummary};

/// Load the vocabulary manifest: the bundled one, merged with the user file if configured
pub fn load_manifest(config: &VocabularyConfig) -> Result<Arc<Manifest>, PyfuscateError> {
    let bundled = Manifest::bundled()?;
    let path = match &config.manifest_path {
        Some(path) => path,
        None => return Ok(bundled),
    };

    let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;
    let extra = Manifest::from_json(&text)?;

    let mut merged = (*bundled).clone();
    merged.merge(extra);
    info!(target: "pyfuscate::api", path = %path.display(), "Merged user manifest");
    Ok(Arc::new(merged))
}

/// Obfuscate with explicit configuration, writing into `sink`
///
/// The header line is written first; tokens are streamed so output produced
/// before a lexer error stays in the sink.
pub fn obfuscate_to<W: Write>(
    source: &str,
    sink: W,
    config: &RunConfig,
) -> Result<(W, ObfuscateSummary), PyfuscateError> {
    info!(target: "pyfuscate::api", "Starting obfuscation");

    let manifest = load_manifest(&config.vocabulary)?;
    let mut engine = Obfuscator::new(sink, manifest, &config.rename, &config.vocabulary);
    debug!(target: "pyfuscate::api",
        known_names = engine.vocabulary().len(),
        "Vocabulary ready"
    );

    engine.write_header(&config.output.header)?;
    for token in Lexer::new(source) {
        engine.push(token?)?;
    }
    let (sink, summary) = engine.finish()?;

    info!(target: "pyfuscate::api",
        lines = summary.lines_written,
        renamed = summary.renamed,
        warnings = summary.warnings.len(),
        "Obfuscation completed"
    );
    Ok((sink, summary))
}

/// Obfuscate with explicit configuration, returning the rewritten text
///
/// This is the recommended API for library users.
pub fn obfuscate(source: &str, config: &RunConfig) -> Result<ObfuscateOutput, PyfuscateError> {
    let (bytes, summary) = obfuscate_to(source, Vec::new(), config)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| PyfuscateError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(ObfuscateOutput { text, summary })
}

/// Read and validate the input file before any processing begins
pub fn read_input(path: &Path) -> Result<String, PyfuscateError> {
    fs::read_to_string(path).map_err(|e| {
        debug!(target: "pyfuscate::api", path = %path.display(), error = %e, "Unreadable input");
        PyfuscateError::Config(format!(
            "the file '{}' specified with -f is not able to be read",
            path.display()
        ))
    })
}

/// Obfuscate a file into `sink`
pub fn obfuscate_file<W: Write>(
    path: &Path,
    sink: W,
    config: &RunConfig,
) -> Result<(W, ObfuscateSummary), PyfuscateError> {
    let source = read_input(path)?;
    info!(target: "pyfuscate::api", path = %path.display(), bytes = source.len(), "Read input");
    obfuscate_to(&source, sink, config)
}

// ==================== Global config API ====================

/// Obfuscate using the global config (defaults if never initialized)
pub fn quick_obfuscate(source: &str) -> Result<ObfuscateOutput, PyfuscateError> {
    obfuscate(source, get_config())
}
