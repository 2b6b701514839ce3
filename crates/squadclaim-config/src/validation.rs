//! Custom field validators and the validation entry point.

use crate::schema::Config;
use squadclaim_common::{ClaimError, Result};
use validator::ValidationError;

/// Validate the chat command prefix (a single word, no leading `!`)
pub fn validate_command_prefix(prefix: &str) -> std::result::Result<(), ValidationError> {
    if prefix.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("command_prefix_whitespace"));
    }

    if prefix.starts_with('!') {
        return Err(ValidationError::new("command_prefix_bang"));
    }

    Ok(())
}

/// Validate an IANA timezone name
pub fn validate_timezone(timezone: &str) -> std::result::Result<(), ValidationError> {
    if timezone.trim().is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    match timezone.trim().parse::<chrono_tz::Tz>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("unknown_timezone")),
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, flattening field errors into one message.
    pub fn validate(config: &Config) -> Result<()> {
        config
            .validate_all()
            .map_err(|errors| ClaimError::config(errors.to_string()))
    }
}
