//! Default values for every configuration section.

use crate::schema::{ClaimConfig, Config};
use squadclaim_common::LoggingConfig;

/// Default chat command.
pub const DEFAULT_COMMAND_PREFIX: &str = "claim";

/// Default number of lines per reply batch.
pub const DEFAULT_CHUNK_SIZE: usize = 5;

impl Default for Config {
    fn default() -> Self {
        Self {
            claim: ClaimConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            only_squad_leader: false,
            admin_cooldown_seconds: 3.0,
            player_cooldown_seconds: 5.0,
            batch_delay_seconds: 0.5,
            chunk_size: DEFAULT_CHUNK_SIZE,
            repeat_count: 2,
            repeat_delay_seconds: 5.0,
            missing_report_delay_seconds: 6.0,
            display_timezone: None,
            debug: false,
        }
    }
}
