//! Tracing setup.
//!
//! Interactive modes own the terminal, so log lines go to a file or
//! nowhere. Print mode logs to stderr.
//!
//! ```text
//! RUST_LOG=makeshift_vet=trace makeshift-vet --log-file vet.log
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Where log lines go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    #[default]
    Off,
}

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub target: LogTarget,
    /// 0: info, 1: debug, 2+: trace (for this crate; others stay at warn)
    pub verbose: u8,
}

impl TracingConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    pub fn default_directives(&self) -> &'static str {
        match self.verbose {
            0 => "warn,makeshift_vet=info",
            1 => "warn,makeshift_vet=debug",
            _ => "warn,makeshift_vet=trace",
        }
    }
}

/// Install the global subscriber. A second call fails with
/// [`LoggingError::Init`].
pub fn init_tracing(config: &TracingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let result = match &config.target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.verbose > 0)
            .with_writer(std::io::stderr)
            .compact()
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Io {
                    path: path.clone(),
                    source,
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .try_init()
        }
    };

    result.map_err(|err| LoggingError::Init(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directives() {
        let mut config = TracingConfig::default();
        assert_eq!(config.default_directives(), "warn,makeshift_vet=info");
        config.verbose = 1;
        assert_eq!(config.default_directives(), "warn,makeshift_vet=debug");
        config.verbose = 5;
        assert_eq!(config.default_directives(), "warn,makeshift_vet=trace");
    }

    #[test]
    fn test_off_installs_nothing() {
        assert!(init_tracing(&TracingConfig::default()).is_ok());
    }

    #[test]
    fn test_unopenable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TracingConfig {
            target: LogTarget::File(dir.path().join("missing").join("vet.log")),
            verbose: 0,
        };
        assert!(matches!(init_tracing(&config), Err(LoggingError::Io { .. })));
    }
}
