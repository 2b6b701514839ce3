//! Common type definitions and newtype wrappers for domain modeling.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type used throughout the application.
pub type Timestamp = DateTime<Utc>;

/// Numeric id as sent by the server: some payloads carry it as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl WireId {
    fn into_number<T>(self) -> Result<T, String>
    where
        T: TryFrom<u64> + FromStr,
    {
        match self {
            Self::Number(n) => T::try_from(n).map_err(|_| format!("id {n} is out of range")),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("invalid id '{text}', expected a number")),
        }
    }
}

/// One of the two teams on a Squad server.
///
/// The server has exactly two teams, so this is a closed enum rather than a
/// free integer. Serialized as the raw team number (`1` or `2`), accepted as
/// a number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum TeamId {
    /// Team 1.
    One,
    /// Team 2.
    Two,
}

impl TeamId {
    /// Both teams in index order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// The team on the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Zero-based slot index, for team-indexed storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The team number as reported by the server.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for TeamId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("invalid team id {other}, expected 1 or 2")),
        }
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number: u8 = WireId::deserialize(deserializer)?
            .into_number()
            .map_err(de::Error::custom)?;
        Self::try_from(number).map_err(de::Error::custom)
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> Self {
        team.number()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A squad number within a team.
///
/// Serialized as a number, accepted as a number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SquadId(pub u32);

impl<'de> Deserialize<'de> for SquadId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireId::deserialize(deserializer)?
            .into_number()
            .map(Self)
            .map_err(de::Error::custom)
    }
}

impl SquadId {
    /// Resolves a chat token to a squad id.
    ///
    /// Only the canonical decimal spelling matches, so `"03"` or `"3.0"` do not
    /// address squad 3 even though they count as numeric tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let id: Self = token.parse().ok()?;
        (id.to_string() == token).then_some(id)
    }
}

impl FromStr for SquadId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for SquadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque player identifier (the player's Steam ID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Creates a player id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timezone used when rendering wall-clock times to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    /// The host's local timezone.
    #[default]
    Local,
    /// A named IANA timezone.
    Named(chrono_tz::Tz),
}
