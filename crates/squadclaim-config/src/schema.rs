//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use squadclaim_common::{parse_clock_zone, seconds_to_duration, ClockZone, LoggingConfig};
use std::time::Duration;
use validator::{Validate, ValidationErrors};

/// Main configuration structure for the squad claim bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Claim command configuration.
    #[validate]
    pub claim: ClaimConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Options of the claim command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClaimConfig {
    /// Chat command that triggers the claim engine (without the `!`).
    #[validate(length(min = 1, message = "Command prefix cannot be empty"))]
    #[validate(custom = "crate::validation::validate_command_prefix")]
    pub command_prefix: String,

    /// Only squad leaders (and admins) may use the command.
    pub only_squad_leader: bool,

    /// Cooldown between admin invocations, 0 disables.
    #[validate(range(min = 0.0, message = "Admin cooldown cannot be negative"))]
    pub admin_cooldown_seconds: f64,

    /// Cooldown between player invocations, 0 disables.
    #[validate(range(min = 0.0, message = "Player cooldown cannot be negative"))]
    pub player_cooldown_seconds: f64,

    /// Delay between consecutive reply batches.
    #[validate(range(min = 0.0, max = 60.0, message = "Batch delay must be between 0 and 60 seconds"))]
    pub batch_delay_seconds: f64,

    /// Maximum number of lines per reply batch.
    #[validate(range(min = 1, max = 50, message = "Chunk size must be between 1 and 50"))]
    pub chunk_size: usize,

    /// How many times help and squad output are shown.
    #[validate(range(min = 1, max = 5, message = "Repeat count must be between 1 and 5"))]
    pub repeat_count: u32,

    /// Delay between repetitions of the same output.
    #[validate(range(min = 0.0, max = 60.0, message = "Repeat delay must be between 0 and 60 seconds"))]
    pub repeat_delay_seconds: f64,

    /// Delay before reporting squad ids that were not found.
    #[validate(range(min = 0.0, max = 60.0, message = "Missing report delay must be between 0 and 60 seconds"))]
    pub missing_report_delay_seconds: f64,

    /// IANA timezone for creation times, host local time when unset.
    #[validate(custom = "crate::validation::validate_timezone")]
    pub display_timezone: Option<String>,

    /// Log raw events and keep stale squads instead of pruning them.
    pub debug: bool,
}

impl Config {
    /// Validates the whole configuration tree.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()
    }
}

impl ClaimConfig {
    /// Cooldown window for the given caller role.
    pub fn cooldown_for(&self, is_admin: bool) -> Duration {
        if is_admin {
            seconds_to_duration(self.admin_cooldown_seconds)
        } else {
            seconds_to_duration(self.player_cooldown_seconds)
        }
    }

    /// Delay between reply batches.
    pub fn batch_delay(&self) -> Duration {
        seconds_to_duration(self.batch_delay_seconds)
    }

    /// Delay between repetitions.
    pub fn repeat_delay(&self) -> Duration {
        seconds_to_duration(self.repeat_delay_seconds)
    }

    /// Delay before the missing-ids report.
    pub fn missing_report_delay(&self) -> Duration {
        seconds_to_duration(self.missing_report_delay_seconds)
    }

    /// Zone used to render creation times.
    ///
    /// An unparseable zone falls back to local time; `validate_all` rejects
    /// such configs before they get here.
    pub fn clock_zone(&self) -> ClockZone {
        parse_clock_zone(self.display_timezone.as_deref()).unwrap_or_default()
    }
}
