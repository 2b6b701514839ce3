//! Server-side collaborators and the event payloads they deliver.
//!
//! The claim engine never talks to the game server directly. It receives
//! events through the [`crate::events::EventHub`], reads the roster through a
//! [`RosterProvider`] and answers players through a [`ReplyTransport`].

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use squadclaim_common::{PlayerId, Result, SquadId, TeamId, Timestamp};

/// Chat channel a command was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatChannel {
    /// All chat.
    ChatAll,
    /// Team chat.
    ChatTeam,
    /// Squad chat.
    ChatSquad,
    /// Admin chat; only admins can write here.
    ChatAdmin,
}

impl ChatChannel {
    /// Commands typed into admin chat run with admin privileges.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::ChatAdmin)
    }
}

/// The squad a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadRef {
    /// Team owning the squad.
    #[serde(rename = "teamID")]
    pub team_id: TeamId,
    /// Squad number within the team.
    #[serde(rename = "squadID")]
    pub squad_id: SquadId,
}

/// Player snapshot attached to server events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlayer {
    /// Steam id of the player.
    #[serde(rename = "steamID")]
    pub steam_id: PlayerId,
    /// In-game name, when known.
    #[serde(default)]
    pub name: Option<String>,
    /// Team the player is on.
    #[serde(rename = "teamID")]
    pub team_id: TeamId,
    /// Squad the player is in, if any.
    #[serde(default)]
    pub squad: Option<SquadRef>,
    /// Whether the player leads their squad.
    #[serde(rename = "isLeader", default)]
    pub is_leader: bool,
}

/// A squad was created on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadCreatedEvent {
    /// Name the squad was created with.
    #[serde(rename = "squadName")]
    pub squad_name: String,
    /// Server time of creation.
    pub time: Timestamp,
    /// The creating player; `player.squad` is the new squad.
    pub player: EventPlayer,
}

/// A player typed a registered chat command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCommandEvent {
    /// Command word without the leading `!`.
    pub command: String,
    /// Everything typed after the command word.
    pub message: String,
    /// Channel the command was typed into.
    pub chat: ChatChannel,
    /// Steam id of the caller.
    #[serde(rename = "steamID")]
    pub steam_id: PlayerId,
    /// The caller.
    pub player: EventPlayer,
}

/// A connected player as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Steam id of the player.
    #[serde(rename = "steamID")]
    pub steam_id: PlayerId,
    /// Team the player is on.
    #[serde(rename = "teamID")]
    pub team_id: TeamId,
    /// Kit/role name, prefixed with the faction tag (e.g. `USA_Rifleman_01`).
    pub role: String,
}

/// A squad currently present on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveSquad {
    /// Team owning the squad.
    #[serde(rename = "teamID")]
    pub team_id: TeamId,
    /// Squad number within the team.
    #[serde(rename = "squadID")]
    pub squad_id: SquadId,
}

/// Refreshable, read-only view of the server's players and squads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Re-fetch the player list from the server.
    async fn refresh_players(&self) -> Result<()>;

    /// Re-fetch the squad list from the server.
    async fn refresh_squads(&self) -> Result<()>;

    /// Players as of the last refresh, in server order.
    fn players(&self) -> Vec<RosterPlayer>;

    /// Squads as of the last refresh.
    fn squads(&self) -> Vec<LiveSquad>;
}

/// Delivers private warnings to a single player (RCON `AdminWarn`).
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Send `message` to `player`. Delivery is not confirmed.
    async fn warn(&self, player: &PlayerId, message: &str) -> Result<()>;
}

/// Roster kept in memory and replaced wholesale by the host.
///
/// Refreshing is a no-op: whoever owns the snapshot pushes updates through
/// [`SnapshotRoster::replace`] as the server reports them.
#[derive(Debug, Default)]
pub struct SnapshotRoster {
    players: RwLock<Vec<RosterPlayer>>,
    squads: RwLock<Vec<LiveSquad>>,
}

impl SnapshotRoster {
    /// Create a roster with the given players and squads.
    pub fn new(players: Vec<RosterPlayer>, squads: Vec<LiveSquad>) -> Self {
        Self {
            players: RwLock::new(players),
            squads: RwLock::new(squads),
        }
    }

    /// Swap in a new server snapshot.
    pub fn replace(&self, players: Vec<RosterPlayer>, squads: Vec<LiveSquad>) {
        *self.players.write() = players;
        *self.squads.write() = squads;
    }
}

#[async_trait]
impl RosterProvider for SnapshotRoster {
    async fn refresh_players(&self) -> Result<()> {
        Ok(())
    }

    async fn refresh_squads(&self) -> Result<()> {
        Ok(())
    }

    fn players(&self) -> Vec<RosterPlayer> {
        self.players.read().clone()
    }

    fn squads(&self) -> Vec<LiveSquad> {
        self.squads.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_channel_detection() {
        assert!(ChatChannel::ChatAdmin.is_admin());
        assert!(!ChatChannel::ChatAll.is_admin());
        assert!(!ChatChannel::ChatTeam.is_admin());
        assert!(!ChatChannel::ChatSquad.is_admin());
    }

    #[test]
    fn test_squad_created_event_deserializes_server_shape() {
        let json = r#"{
            "squadName": "Alpha",
            "time": "2024-01-01T10:00:00Z",
            "player": {
                "steamID": "76561198000000001",
                "name": "Lead",
                "teamID": 1,
                "squad": { "teamID": 1, "squadID": 3 },
                "isLeader": true
            }
        }"#;

        let event: SquadCreatedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.squad_name, "Alpha");
        assert_eq!(
            event.player.squad,
            Some(SquadRef {
                team_id: TeamId::One,
                squad_id: SquadId(3)
            })
        );
        assert!(event.player.is_leader);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let json = r#"{
            "squadName": "Alpha",
            "time": "2024-01-01T10:00:00Z",
            "player": {
                "steamID": "76561198000000001",
                "teamID": "1",
                "squad": { "teamID": "1", "squadID": "3" },
                "isLeader": true
            }
        }"#;

        let event: SquadCreatedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.player.team_id, TeamId::One);
        assert_eq!(
            event.player.squad,
            Some(SquadRef {
                team_id: TeamId::One,
                squad_id: SquadId(3)
            })
        );

        let squad: LiveSquad = serde_json::from_str(r#"{"teamID":"2","squadID":"12"}"#).unwrap();
        assert_eq!(squad.team_id, TeamId::Two);
        assert_eq!(squad.squad_id, SquadId(12));
    }

    #[test]
    fn test_chat_command_event_defaults() {
        let json = r#"{
            "command": "claim",
            "message": "3 5",
            "chat": "ChatTeam",
            "steamID": "76561198000000002",
            "player": { "steamID": "76561198000000002", "teamID": 2 }
        }"#;

        let event: ChatCommandEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.chat, ChatChannel::ChatTeam);
        assert_eq!(event.player.team_id, TeamId::Two);
        assert!(event.player.squad.is_none());
        assert!(!event.player.is_leader);
    }

    #[test]
    fn test_snapshot_roster_replace() {
        let roster = SnapshotRoster::default();
        assert!(roster.players().is_empty());

        roster.replace(
            vec![RosterPlayer {
                steam_id: PlayerId::new("76561198000000001"),
                team_id: TeamId::One,
                role: "USA_SL_01".to_string(),
            }],
            vec![LiveSquad {
                team_id: TeamId::One,
                squad_id: SquadId(1),
            }],
        );
        tokio_test::block_on(roster.refresh_players()).unwrap();

        assert_eq!(roster.players().len(), 1);
        assert_eq!(roster.squads()[0].squad_id, SquadId(1));
    }
}
