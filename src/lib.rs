//! Pyfuscate - identifier obfuscator for Python source
//!
//! Replaces user-defined identifiers with opaque generated names while keeping
//! keywords, builtins, builtin-type members and imported module vocabulary intact.
//!
//! # Architecture
//!
//! ```text
//! pyfuscate-config/  - Configuration data (no logic)
//! pyfuscate-core/    - Tokenizer and obfuscation engine (no file IO)
//! pyfuscate-api/     - Orchestration, errors, global config
//! pyfuscate-cli/     - The `pyfuscate` binary
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pyfuscate::{obfuscate, RunConfig};
//!
//! let output = obfuscate("import os\nx = 1\n", &RunConfig::default()).unwrap();
//! assert_eq!(output.text, "#!/usr/bin/python\nimport os \nname0x0 = 1 \n");
//! ```

pub use pyfuscate_api::*;
