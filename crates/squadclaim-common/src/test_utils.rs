//! Test utilities and shared test helpers for the squadclaim workspace.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use crate::{PlayerId, SquadId, TeamId, Timestamp};
use chrono::{TimeZone, Utc};
use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        // another test harness may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Test fixture for creating a timestamp on a fixed day (2024-01-01 UTC).
pub fn clock(hour: u32, min: u32, sec: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, min, sec).unwrap()
}

/// Server-side identifiers used as fixtures.
pub mod server_fixtures {
    use super::*;

    /// A fixed player id derived from a small number.
    pub fn player(n: u64) -> PlayerId {
        PlayerId(format!("7656119{:010}", n))
    }

    /// Create multiple distinct player ids.
    pub fn players(count: usize) -> Vec<PlayerId> {
        (0..count as u64).map(player).collect()
    }

    /// Shorthand for a squad id.
    pub fn squad(n: u32) -> SquadId {
        SquadId(n)
    }

    /// Both teams, for table-driven tests.
    pub fn teams() -> [TeamId; 2] {
        TeamId::ALL
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
claim:
  command_prefix: "claim"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "claim:\n",
            "  command_prefix: \"squads\"\n",
            "  only_squad_leader: true\n",
            "  admin_cooldown_seconds: 1\n",
            "  player_cooldown_seconds: 10\n",
            "  batch_delay_seconds: 0.25\n",
            "  chunk_size: 4\n",
            "  repeat_count: 1\n",
            "  repeat_delay_seconds: 2\n",
            "  missing_report_delay_seconds: 3\n",
            "  display_timezone: \"Europe/Berlin\"\n",
            "  debug: false\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json_format: true\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::{SquadId, TeamId};
    use proptest::prelude::*;

    /// Strategy for generating team ids.
    pub fn team_id_strategy() -> impl Strategy<Value = TeamId> {
        prop_oneof![Just(TeamId::One), Just(TeamId::Two)]
    }

    /// Strategy for generating realistic squad numbers.
    pub fn squad_id_strategy() -> impl Strategy<Value = SquadId> {
        (1u32..=50u32).prop_map(SquadId)
    }

    /// Strategy for server-generated default squad names.
    pub fn default_squad_name_strategy() -> impl Strategy<Value = String> {
        (1u32..=50u32, 1usize..=3usize).prop_map(|(n, spaces)| format!("Squad{}{}", " ".repeat(spaces), n))
    }

    /// Strategy for player-chosen squad names.
    pub fn custom_squad_name_strategy() -> impl Strategy<Value = String> {
        r"[A-Za-z][A-Za-z0-9 _\-]{0,20}"
            .prop_filter("must not look like a default name", |s| !s.starts_with("Squad"))
    }
}
