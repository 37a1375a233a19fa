//! Pyfuscate CLI - Command line interface
//!
//! Reads one Python file, writes the obfuscated source to stdout or a file.
//! Options may also come from a JSON project file; command-line flags win.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

mod config;
mod logging;
mod platform;

use crate::config::{read_project_file, LogConfig, ProjectFile};
use crate::logging::LogFormat;
use crate::platform::print_error_with_source;
use pyfuscate_api::{
    init_config, obfuscate_to, read_input, LogLevel, ObfuscateSummary, PyfuscateError, RunConfig,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "pyfuscate",
    about = "Rename private identifiers in Python source",
    version
)]
struct Cli {
    /// Starting value for the name counter
    #[arg(short = 'c', long = "count", value_name = "N")]
    count: Option<u64>,

    /// Space-delimited list of names to preserve
    #[arg(short = 'p', long = "preserve-names", value_name = "NAMES")]
    preserve_names: Option<String>,

    /// The FILE to be used as input for the obfuscator
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// The FILE to write the obfuscated output to [default: stdout]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Extra vocabulary manifest merged over the bundled one
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Qualified name to skip during vocabulary expansion (repeatable)
    #[arg(long = "deny", value_name = "NAME")]
    deny: Vec<String>,

    /// JSON project file with default options
    #[arg(long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();

    // Read the project file, if any
    let project = match &cli.config {
        Some(path) => match read_project_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {}", e);
                process::exit(1);
            }
        },
        None => ProjectFile::default(),
    };

    let level = match resolve_log_level(&cli, &project) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };
    logging::init(&LogConfig::with_global(level), cli.log_format);

    let run_config = build_run_config(&cli, project);
    debug!(target: "pyfuscate::cli", ?run_config, "Resolved configuration");

    // Initialize API config (global singleton for convenience)
    if let Err(e) = init_config(run_config.clone()) {
        debug!(target: "pyfuscate::cli", "{}", e);
    }

    // Validate the input before any processing
    let source = match read_input(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            print_error_with_source(&e, "");
            process::exit(1);
        }
    };

    match run(&cli, &source, &run_config) {
        Ok(summary) => {
            for warning in &summary.warnings {
                eprintln!("{}", warning);
            }
            info!(target: "pyfuscate::cli",
                lines = summary.lines_written,
                renamed = summary.renamed,
                next_counter = summary.next_counter,
                "Done"
            );
        }
        Err(e) => {
            print_error_with_source(&e, &source);
            process::exit(1);
        }
    }
}

/// Obfuscate into the selected output
fn run(cli: &Cli, source: &str, config: &RunConfig) -> Result<ObfuscateSummary, PyfuscateError> {
    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let (mut sink, summary) = obfuscate_to(source, BufWriter::new(sink), config)?;
    sink.flush()?;
    Ok(summary)
}

/// Flag first, then project file, then `warn`
fn resolve_log_level(cli: &Cli, project: &ProjectFile) -> Result<LogLevel, String> {
    match cli.log_level.as_deref().or(project.log_level.as_deref()) {
        Some(s) => LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{}'", s)),
        None => Ok(LogLevel::Warn),
    }
}

/// Build run configuration; command-line flags win over the project file
fn build_run_config(cli: &Cli, project: ProjectFile) -> RunConfig {
    let mut config = RunConfig::default();

    config.rename.start_counter = cli.count.or(project.count).unwrap_or(0);

    config.vocabulary.preserve_names = match &cli.preserve_names {
        Some(names) => names.split_whitespace().map(str::to_string).collect(),
        None => project.preserve_names,
    };
    config.vocabulary.deny_list = project.deny;
    config.vocabulary.deny_list.extend(cli.deny.iter().cloned());
    config.vocabulary.manifest_path = cli.manifest.clone().or(project.manifest);

    if let Some(header) = project.header {
        config.output.header = header;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pyfuscate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["pyfuscate", "-c", "3"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "-f", "in.py", "-o", "out.py", "-c", "16", "-p", "widget  gadget", "--deny", "a.b",
            "--deny", "c.d",
        ]);
        let config = build_run_config(&cli, ProjectFile::default());

        assert_eq!(config.rename.start_counter, 16);
        assert_eq!(config.vocabulary.preserve_names, vec!["widget", "gadget"]);
        assert_eq!(config.vocabulary.deny_list, vec!["a.b", "c.d"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.py")));
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_flags_win_over_project_file() {
        let cli = parse(&["--file", "in.py", "--count", "2", "--log-level", "debug"]);
        let project = ProjectFile {
            count: Some(9),
            preserve_names: vec!["widget".to_string()],
            deny: vec!["x.y".to_string()],
            header: Some("#!/usr/bin/env python3".to_string()),
            log_level: Some("error".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_log_level(&cli, &project), Ok(LogLevel::Debug));

        let config = build_run_config(&cli, project);
        assert_eq!(config.rename.start_counter, 2);
        assert_eq!(config.vocabulary.preserve_names, vec!["widget"]);
        assert_eq!(config.vocabulary.deny_list, vec!["x.y"]);
        assert_eq!(config.output.header, "#!/usr/bin/env python3");
    }

    #[test]
    fn test_log_level_defaults_and_errors() {
        let cli = parse(&["-f", "in.py"]);
        assert_eq!(resolve_log_level(&cli, &ProjectFile::default()), Ok(LogLevel::Warn));

        let cli = parse(&["-f", "in.py", "--log-level", "loud"]);
        assert!(resolve_log_level(&cli, &ProjectFile::default()).is_err());
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.py");
        let cli = parse(&["-f", "in.py", "-o", out.to_str().unwrap()]);

        let summary = run(&cli, "import os\nx = 1\n", &RunConfig::default()).unwrap();
        assert_eq!(summary.lines_written, 2);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "#!/usr/bin/python\nimport os \nname0x0 = 1 \n"
        );
    }
}
