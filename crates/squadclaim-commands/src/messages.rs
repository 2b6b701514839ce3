//! Texts sent to players.

/// Why an invocation was refused.
///
/// Rejections are answered with a single private warning to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The caller used the command too recently.
    OnCooldown {
        /// Whole seconds left, rounded up.
        remaining_seconds: u64,
    },
    /// Squad-leader restriction is active and the caller does not lead a squad.
    SquadLeaderOnly,
    /// A non-admin used a team selector.
    AdminOnly,
    /// A non-numeric squad id was given.
    InvalidSquadId,
    /// Fewer than two distinct squad ids were given.
    TooFewIds,
    /// Fewer than two of the given squad ids are claimed.
    TooFewExisting,
    /// The faction prefix matched no connected player.
    FactionNotFound {
        /// The four-character prefix that was searched for.
        prefix: String,
    },
}

fn help_hint(command_prefix: &str) -> String {
    format!(" \nFor help use -> !{command_prefix} help")
}

impl Rejection {
    /// Warning text for the caller.
    pub fn message(&self, command_prefix: &str) -> String {
        match self {
            Self::OnCooldown { remaining_seconds } => {
                format!("Please wait {remaining_seconds}s before using !{command_prefix} again.")
            }
            Self::SquadLeaderOnly => "Only squad leaders can use this command.".to_string(),
            Self::AdminOnly => {
                format!("Only admins can check squads of other teams.{}", help_hint(command_prefix))
            }
            Self::InvalidSquadId => format!("Invalid squad ID provided.{}", help_hint(command_prefix)),
            Self::TooFewIds => format!("Please provide at least two squad IDs.{}", help_hint(command_prefix)),
            Self::TooFewExisting => "Please provide at least two existing squad IDs.".to_string(),
            Self::FactionNotFound { prefix } => format!("Faction not found or no players in team: {prefix}"),
        }
    }
}

/// Report of requested squad ids without a claim.
///
/// `team_selector` is the token the caller typed, `None` for their own team.
pub fn missing_ids_message(team_selector: Option<&str>, missing: &[String]) -> String {
    let team = match team_selector {
        Some(token) => format!("team: {token}"),
        None => "your team".to_string(),
    };
    format!("Custom Squad IDs not found in {team}: {}", missing.join(", "))
}

/// The two help messages (usage, then examples) for the caller's role.
pub fn help_messages(command_prefix: &str, is_admin: bool) -> [String; 2] {
    let prefix = format!("!{command_prefix}");

    if is_admin {
        [
            [
                format!("{prefix} id1 id2 [id3 ...] - compare X squads"),
                format!("{prefix} team id1 id2 [id3 ...] - compare X squads of a team"),
                format!("{prefix} other id1 id2 [id3 ...] - compare X squads of the opposite team"),
            ]
            .join("\n \n"),
            [
                "Examples:".to_string(),
                format!("{prefix} 1 3"),
                format!("{prefix} rgf 1 3"),
                format!("{prefix} wpmc 1 3 4"),
                format!("{prefix} other 1 3"),
                format!("{prefix} other 1 3 4"),
            ]
            .join("\n"),
        ]
    } else {
        [
            format!("{prefix} id1 id2 [id3 ...] - compare X squads"),
            [
                "Examples:".to_string(),
                format!("{prefix} 1 3"),
                format!("{prefix} 1 3 5"),
                format!("{prefix} 1 3 4 5"),
            ]
            .join("\n"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages_are_distinct() {
        let rejections = [
            Rejection::OnCooldown { remaining_seconds: 3 },
            Rejection::SquadLeaderOnly,
            Rejection::AdminOnly,
            Rejection::InvalidSquadId,
            Rejection::TooFewIds,
            Rejection::TooFewExisting,
            Rejection::FactionNotFound {
                prefix: "insu".to_string(),
            },
        ];

        let messages: Vec<String> = rejections.iter().map(|r| r.message("claim")).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_messages_use_command_prefix() {
        assert_eq!(
            Rejection::OnCooldown { remaining_seconds: 5 }.message("squads"),
            "Please wait 5s before using !squads again."
        );
        assert_eq!(
            Rejection::TooFewIds.message("claim"),
            "Please provide at least two squad IDs. \nFor help use -> !claim help"
        );
    }

    #[test]
    fn test_missing_ids_message() {
        let missing = vec!["4".to_string(), "9".to_string()];
        assert_eq!(
            missing_ids_message(None, &missing),
            "Custom Squad IDs not found in your team: 4, 9"
        );
        assert_eq!(
            missing_ids_message(Some("rgf"), &missing),
            "Custom Squad IDs not found in team: rgf: 4, 9"
        );
    }

    #[test]
    fn test_help_depends_on_role() {
        let [usage, examples] = help_messages("claim", false);
        assert_eq!(usage, "!claim id1 id2 [id3 ...] - compare X squads");
        assert!(examples.starts_with("Examples:\n!claim 1 3"));
        assert!(!examples.contains("other"));

        let [usage, examples] = help_messages("claim", true);
        assert!(usage.contains("!claim other id1 id2"));
        assert!(examples.contains("!claim rgf 1 3"));
    }
}
