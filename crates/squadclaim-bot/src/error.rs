//! Application-wide error types using thiserror.

use squadclaim_common::ClaimError;
use squadclaim_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Error raised by the claim crates.
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input line was not a valid host message.
    #[error("Invalid message on line {line}: {source}")]
    Decode {
        /// 1-based input line number.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
