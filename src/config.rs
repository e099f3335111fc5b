//! Command-line configuration.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::error::{ReportError, SeedError};
use crate::logging::{LogTarget, TracingConfig};
use crate::model::optics::CatRef;
use crate::model::{default_cat, load_seed};
use crate::pipeline::{JsonLinesReporter, LogReporter, RenderMode, Reporter};

/// Where settled records are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportSink {
    /// `tracing` info events
    #[default]
    Log,
    /// JSON lines on stdout
    Stdout,
    /// JSON lines appended to `--report-file`
    File,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "makeshift-vet",
    version,
    about = "Edit a cat's injury record in the terminal",
    long_about = "Edit a cat's weight and mark injured body parts. Every settled change \
                  is reported as a JSON document."
)]
pub struct Cli {
    /// JSON seed record (defaults to the built-in cat)
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Report sink for settled records
    #[arg(long, value_enum, default_value_t = ReportSink::Log)]
    pub report: ReportSink,

    /// File for `--report file`
    #[arg(long, value_name = "PATH", required_if_eq("report", "file"))]
    pub report_file: Option<PathBuf>,

    /// Render mode
    #[arg(long, value_enum, default_value_t = RenderMode::Fullscreen)]
    pub mode: RenderMode,

    /// Render once as plain text and exit
    #[arg(long)]
    pub print: bool,

    /// Write logs to this file (interactive modes log nowhere otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The seed record, or the built-in cat.
    pub fn load_cat(&self) -> Result<CatRef, SeedError> {
        match &self.seed {
            Some(path) => load_seed(path),
            None => Ok(default_cat()),
        }
    }

    pub fn reporter(&self) -> Result<Box<dyn Reporter>, ReportError> {
        Ok(match self.report {
            ReportSink::Log => Box::new(LogReporter),
            ReportSink::Stdout => Box::new(JsonLinesReporter::new(io::stdout())),
            ReportSink::File => {
                let path = self.report_file.as_ref().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "--report file needs --report-file")
                })?;
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Box::new(JsonLinesReporter::new(file))
            }
        })
    }

    pub fn tracing_config(&self) -> TracingConfig {
        let target = match (&self.log_file, self.print) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        };
        TracingConfig {
            target,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["makeshift-vet"]);
        assert_eq!(cli.report, ReportSink::Log);
        assert_eq!(cli.mode, RenderMode::Fullscreen);
        assert!(!cli.print);
        assert_eq!(cli.tracing_config().target, LogTarget::Off);
        assert_eq!(cli.load_cat().unwrap().info.name, "Whiskers");
    }

    #[test]
    fn test_print_mode_logs_to_stderr() {
        let cli = Cli::parse_from(["makeshift-vet", "--print", "-vv"]);
        let config = cli.tracing_config();
        assert_eq!(config.target, LogTarget::Stderr);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_report_file_required() {
        assert!(Cli::try_parse_from(["makeshift-vet", "--report", "file"]).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");
        let cli = Cli::try_parse_from([
            "makeshift-vet",
            "--report",
            "file",
            "--report-file",
            path.to_str().unwrap(),
            "--mode",
            "inline",
        ])
        .unwrap();
        assert_eq!(cli.mode, RenderMode::Inline);

        let reporter = cli.reporter().unwrap();
        reporter.report(&default_cat()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
    }

    #[test]
    fn test_missing_seed_is_io_error() {
        let cli = Cli::parse_from(["makeshift-vet", "--seed", "/nonexistent/cat.json"]);
        assert!(matches!(cli.load_cat(), Err(SeedError::Io { .. })));
    }
}
