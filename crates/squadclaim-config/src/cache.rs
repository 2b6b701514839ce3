//! Live claim settings behind an atomic swap.

use crate::schema::Config;
use crate::validation::ConfigValidator;
use arc_swap::ArcSwap;
use squadclaim_common::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Current configuration, replaced as a whole.
///
/// A claim command takes one snapshot when it starts and keeps it until its
/// last reply, so an update never changes the cooldown window or pagination
/// of a command already in flight.
#[derive(Debug)]
pub struct ConfigCache {
    current: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a cache holding `config`.
    pub fn new(config: Config) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Chat command word the claim plugin listens on.
    pub fn command_prefix(&self) -> String {
        self.current.load().claim.command_prefix.clone()
    }

    /// Validates `config` and makes it current.
    ///
    /// An invalid configuration is refused and the current one stays active.
    /// A new command prefix only applies once the plugin is mounted again.
    pub fn update(&self, config: Config) -> Result<()> {
        ConfigValidator::validate(&config)?;

        let previous = self.current.swap(Arc::new(config));
        let prefix = self.command_prefix();
        if previous.claim.command_prefix != prefix {
            warn!(
                old = %previous.claim.command_prefix,
                new = %prefix,
                "Command prefix changed, remount the claim plugin to listen on it"
            );
        }

        info!("Configuration updated");
        Ok(())
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
