//! Resolution of free-text team selectors to a team.

use crate::host::RosterPlayer;
use squadclaim_common::TeamId;
use thiserror::Error;

/// Number of leading characters of a faction token that are matched.
pub const FACTION_PREFIX_LEN: usize = 4;

/// Selector for the caller's opposing team.
pub const OTHER_TEAM: &str = "other";

/// Selector for the caller's own team.
pub const OWN_TEAM: &str = "own";

/// Team resolution failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No connected player has a role starting with the prefix.
    #[error("Faction not found or no players in team: {prefix}")]
    FactionNotFound {
        /// The faction prefix that was searched for.
        prefix: String,
    },
}

/// Maps team selectors (`own`, `other`, faction tags) to team ids.
pub struct TeamResolver;

impl TeamResolver {
    /// Whether resolving `token` reads the player roster.
    pub fn needs_roster(token: &str) -> bool {
        !matches!(token.to_lowercase().as_str(), OTHER_TEAM | OWN_TEAM)
    }

    /// Resolve `token` for a caller on `caller_team`.
    ///
    /// Faction tokens are cut to their first four characters and matched
    /// case-insensitively against the start of each player's role; the first
    /// matching player in roster order decides the team.
    pub fn resolve(token: &str, caller_team: TeamId, roster: &[RosterPlayer]) -> Result<TeamId, ResolveError> {
        let token = token.to_lowercase();

        match token.as_str() {
            OTHER_TEAM => return Ok(caller_team.opposite()),
            OWN_TEAM => return Ok(caller_team),
            _ => {}
        }

        let prefix: String = token.chars().take(FACTION_PREFIX_LEN).collect();

        roster
            .iter()
            .find(|player| player.role.to_lowercase().starts_with(&prefix))
            .map(|player| player.team_id)
            .ok_or(ResolveError::FactionNotFound { prefix })
    }
}
