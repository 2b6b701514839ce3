//! Classification of claim command arguments.
//!
//! The grammar, applied to the lower-cased whitespace-separated tokens:
//!
//! 1. `help` as first token asks for help.
//! 2. A non-numeric first token is a team selector. Without further tokens
//!    the team is listed, otherwise the remaining (numeric) tokens are compared.
//! 3. Two or more numeric tokens compare squads of the caller's team.
//! 4. Anything else lists the caller's team.

use thiserror::Error;

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Show usage.
    Help,
    /// List all claims of a team.
    List,
    /// Compare the creation order of specific squads.
    Compare,
}

/// A classified command, not yet resolved against the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// What the caller asked for.
    pub kind: CommandKind,
    /// Team selector token, `None` for the caller's own team.
    pub team_selector: Option<String>,
    /// Squad id tokens in the order given.
    pub squad_ids: Vec<String>,
}

impl ParsedCommand {
    /// Squad id tokens with duplicates removed, first occurrence kept.
    pub fn unique_squad_ids(&self) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::with_capacity(self.squad_ids.len());
        for id in &self.squad_ids {
            if !unique.contains(&id.as_str()) {
                unique.push(id);
            }
        }
        unique
    }
}

/// Command parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token after the team selector is not a number.
    #[error("Invalid squad ID '{token}'")]
    InvalidSquadId {
        /// The offending token.
        token: String,
        /// Selector given before it, if any.
        team_selector: Option<String>,
    },
}

/// Whether `token` reads as a number.
///
/// Deliberately loose: decimals and exponents such as `1.5` or `1e2` count,
/// `inf` and `nan` do not.
pub fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Stateless command classifier.
pub struct CommandParser;

impl CommandParser {
    /// Classify the text typed after the command word.
    pub fn parse(message: &str) -> Result<ParsedCommand, ParseError> {
        let message = message.to_lowercase();
        let tokens: Vec<String> = message.split_whitespace().map(str::to_string).collect();

        let Some(first) = tokens.first() else {
            return Ok(ParsedCommand {
                kind: CommandKind::List,
                team_selector: None,
                squad_ids: Vec::new(),
            });
        };

        if first == "help" {
            return Ok(ParsedCommand {
                kind: CommandKind::Help,
                team_selector: None,
                squad_ids: Vec::new(),
            });
        }

        if !is_numeric(first) {
            let team_selector = first.clone();
            let squad_ids = tokens[1..].to_vec();

            if let Some(token) = squad_ids.iter().find(|token| !is_numeric(token)) {
                return Err(ParseError::InvalidSquadId {
                    token: token.clone(),
                    team_selector: Some(team_selector),
                });
            }

            let kind = if squad_ids.is_empty() {
                CommandKind::List
            } else {
                CommandKind::Compare
            };

            return Ok(ParsedCommand {
                kind,
                team_selector: Some(team_selector),
                squad_ids,
            });
        }

        if let Some(token) = tokens.iter().find(|token| !is_numeric(token)) {
            return Err(ParseError::InvalidSquadId {
                token: token.clone(),
                team_selector: None,
            });
        }

        let kind = if tokens.len() >= 2 {
            CommandKind::Compare
        } else {
            CommandKind::List
        };

        Ok(ParsedCommand {
            kind,
            team_selector: None,
            squad_ids: if kind == CommandKind::Compare { tokens } else { Vec::new() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(message: &str) -> ParsedCommand {
        CommandParser::parse(message).unwrap()
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("3"));
        assert!(is_numeric("03"));
        assert!(is_numeric("1.5"));
        assert!(is_numeric("1e2"));
        assert!(!is_numeric("rgf"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("nan"));
        assert!(!is_numeric("3a"));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse("help").kind, CommandKind::Help);
        assert_eq!(parse("  HELP me").kind, CommandKind::Help);
    }

    #[test]
    fn test_empty_lists_own_team() {
        let command = parse("   ");
        assert_eq!(command.kind, CommandKind::List);
        assert_eq!(command.team_selector, None);
        assert!(command.squad_ids.is_empty());
    }

    #[test]
    fn test_single_number_lists_own_team() {
        let command = parse("3");
        assert_eq!(command.kind, CommandKind::List);
        assert_eq!(command.team_selector, None);
    }

    #[test]
    fn test_numbers_compare_own_team() {
        let command = parse("3 5 7");
        assert_eq!(command.kind, CommandKind::Compare);
        assert_eq!(command.team_selector, None);
        assert_eq!(command.squad_ids, vec!["3", "5", "7"]);
    }

    #[test]
    fn test_selector_alone_lists_team() {
        let command = parse("RGF");
        assert_eq!(command.kind, CommandKind::List);
        assert_eq!(command.team_selector.as_deref(), Some("rgf"));
    }

    #[test]
    fn test_selector_with_numbers_compares_team() {
        let command = parse("other 1 3");
        assert_eq!(command.kind, CommandKind::Compare);
        assert_eq!(command.team_selector.as_deref(), Some("other"));
        assert_eq!(command.squad_ids, vec!["1", "3"]);

        // a single id still means compare; the engine rejects it for being too few
        let command = parse("wpmc 4");
        assert_eq!(command.kind, CommandKind::Compare);
        assert_eq!(command.squad_ids, vec!["4"]);
    }

    #[test]
    fn test_non_numeric_after_selector() {
        assert_eq!(
            CommandParser::parse("rgf 1 two"),
            Err(ParseError::InvalidSquadId {
                token: "two".to_string(),
                team_selector: Some("rgf".to_string())
            })
        );
    }

    #[test]
    fn test_non_numeric_after_number() {
        assert!(matches!(
            CommandParser::parse("1 x"),
            Err(ParseError::InvalidSquadId { team_selector: None, .. })
        ));
    }

    #[test]
    fn test_loose_numbers_are_accepted() {
        let command = parse("1e2 3.5");
        assert_eq!(command.kind, CommandKind::Compare);
        assert_eq!(command.squad_ids, vec!["1e2", "3.5"]);
    }

    #[test]
    fn test_unique_squad_ids_keep_first_occurrence() {
        let command = parse("5 3 5 3 1");
        assert_eq!(command.unique_squad_ids(), vec!["5", "3", "1"]);
    }
}
