//! Tests for the core type definitions in squadclaim-common.
//!
//! This test suite covers:
//! - Newtype wrappers implementing expected traits (Display, Debug, Serialize, Deserialize)
//! - Team id conversions rejecting anything but the two server teams
//! - Squad id token resolution

use std::collections::HashMap;
use squadclaim_common::types::*;

#[cfg(test)]
mod team_id_tests {
    use super::*;

    #[test]
    fn test_team_id_opposite_is_involution() {
        for team in TeamId::ALL {
            assert_ne!(team.opposite(), team);
            assert_eq!(team.opposite().opposite(), team);
        }
    }

    #[test]
    fn test_team_id_index_matches_slot_order() {
        assert_eq!(TeamId::One.index(), 0);
        assert_eq!(TeamId::Two.index(), 1);
    }

    #[test]
    fn test_team_id_conversion() {
        assert_eq!(TeamId::try_from(1u8), Ok(TeamId::One));
        assert_eq!(TeamId::try_from(2u8), Ok(TeamId::Two));
        assert!(TeamId::try_from(0u8).is_err());
        assert!(TeamId::try_from(3u8).is_err());
        assert_eq!(u8::from(TeamId::Two), 2);
    }

    #[test]
    fn test_team_id_serialization() {
        let serialized = serde_json::to_string(&TeamId::Two).unwrap();
        assert_eq!(serialized, "2");

        let deserialized: TeamId = serde_json::from_str("1").unwrap();
        assert_eq!(deserialized, TeamId::One);

        assert!(serde_json::from_str::<TeamId>("3").is_err());
    }

    #[test]
    fn test_team_id_from_numeric_string() {
        assert_eq!(serde_json::from_str::<TeamId>("\"2\"").unwrap(), TeamId::Two);
        assert!(serde_json::from_str::<TeamId>("\"3\"").is_err());
        assert!(serde_json::from_str::<TeamId>("\"one\"").is_err());
    }
}

#[cfg(test)]
mod newtype_trait_tests {
    use super::*;

    #[test]
    fn test_squad_id_implements_expected_traits() {
        let squad_id = SquadId(7);

        assert_eq!(format!("{:?}", squad_id), "SquadId(7)");
        assert_eq!(format!("{}", squad_id), "7");

        let mut map = HashMap::new();
        map.insert(squad_id, "Alpha");
        assert_eq!(map.get(&SquadId(7)), Some(&"Alpha"));
    }

    #[test]
    fn test_squad_id_serialization() {
        let serialized = serde_json::to_string(&SquadId(7)).unwrap();
        assert_eq!(serialized, "7");

        let deserialized: SquadId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, SquadId(7));

        let from_string: SquadId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_string, SquadId(7));
        assert!(serde_json::from_str::<SquadId>("\"seven\"").is_err());
        assert!(serde_json::from_str::<SquadId>("-1").is_err());
    }

    #[test]
    fn test_player_id_serialization() {
        let player = PlayerId::new("76561198000000001");
        let serialized = serde_json::to_string(&player).unwrap();
        assert_eq!(serialized, "\"76561198000000001\"");

        let deserialized: PlayerId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, player);
    }
}

#[cfg(test)]
mod squad_token_tests {
    use super::*;

    #[test]
    fn test_canonical_tokens_resolve() {
        assert_eq!(SquadId::from_token("3"), Some(SquadId(3)));
        assert_eq!(SquadId::from_token("42"), Some(SquadId(42)));
    }

    #[test]
    fn test_non_canonical_numeric_tokens_do_not_resolve() {
        assert_eq!(SquadId::from_token("03"), None);
        assert_eq!(SquadId::from_token("3.0"), None);
        assert_eq!(SquadId::from_token("1e2"), None);
        assert_eq!(SquadId::from_token("+3"), None);
        assert_eq!(SquadId::from_token("-1"), None);
    }
}
