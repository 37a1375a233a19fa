//! Pyfuscate Core - Python tokenizer and identifier obfuscation engine (pure logic, no file IO)
//!
//! Reads source from memory and writes rewritten lines to any `std::io::Write`.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod kit;
pub mod obfuscate;

// Re-export common types
pub use kit::lexer::{tokenize, Lexer, LexerError, PyToken, PyTokenKind};
pub use obfuscate::{
    ImportWarning, KnownNames, Manifest, ManifestError, ObfuscateSummary, Obfuscator,
    RenameTable,
};

// Re-export config types from pyfuscate-config
pub use pyfuscate_config::{OutputConfig, Phase, RenameConfig, VocabularyConfig};
