//! Cooldown system for rate limiting command usage per player

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use squadclaim_common::PlayerId;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// Errors that can occur during cooldown operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CooldownError {
    /// The player used the command too recently.
    #[error("Player {player} is on cooldown (remaining: {}s)", .remaining.as_secs())]
    PlayerOnCooldown {
        /// The throttled player.
        player: PlayerId,
        /// Time until the player may invoke again.
        remaining: Duration,
    },
}

impl CooldownError {
    /// Remaining wait, rounded up to whole seconds for display.
    pub fn remaining_seconds(&self) -> u64 {
        match self {
            Self::PlayerOnCooldown { remaining, .. } => {
                u64::try_from(remaining.as_millis().div_ceil(1000)).unwrap_or(u64::MAX)
            }
        }
    }
}

/// Per-player throttle on command invocations.
///
/// Only accepted invocations are recorded; a rejected attempt does not push
/// the player's window further out.
#[derive(Debug, Default)]
pub struct CooldownGate {
    /// Last accepted invocation per player
    last_used: DashMap<PlayerId, Instant>,
}

impl CooldownGate {
    /// Create a new cooldown gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the invocation and record `now`, or report the remaining wait.
    ///
    /// A zero `window` never rejects. Check and record happen under the same
    /// entry lock, so two overlapping invocations by one player cannot both pass.
    pub fn try_acquire(&self, player: &PlayerId, window: Duration, now: Instant) -> Result<(), CooldownError> {
        match self.last_used.entry(player.clone()) {
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if !window.is_zero() && elapsed < window {
                    return Err(CooldownError::PlayerOnCooldown {
                        player: player.clone(),
                        remaining: window - elapsed,
                    });
                }
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
            }
        }

        debug!("Applied cooldown for player {}", player);
        Ok(())
    }

    /// Forget the cooldown of a single player
    pub fn clear_player(&self, player: &PlayerId) {
        if self.last_used.remove(player).is_some() {
            debug!("Cleared cooldown for player {}", player);
        }
    }

    /// Get the number of tracked players
    pub fn active_cooldowns(&self) -> usize {
        self.last_used.len()
    }

    /// Forget every recorded invocation
    pub fn reset(&self) {
        self.last_used.clear();
        debug!("Cleared all cooldowns");
    }
}
