use rustyline::error::ReadlineError;
use scan_config::ConfigError;
use thiserror::Error;

/// Failures that end the shell rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
