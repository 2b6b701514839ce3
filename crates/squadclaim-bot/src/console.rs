//! JSON-lines wire format between the host process and a server bridge.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use squadclaim_commands::{ChatCommandEvent, LiveSquad, ReplyTransport, RosterPlayer, SquadCreatedEvent};
use squadclaim_common::{ClaimError, PlayerId, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{Mutex, MutexGuard};

/// One input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// `SQUAD_CREATED` from the server.
    SquadCreated(SquadCreatedEvent),
    /// `CHAT_COMMAND` from the server.
    ChatCommand(ChatCommandEvent),
    /// `ROUND_ENDED` from the server.
    RoundEnded,
    /// Fresh player and squad lists.
    Roster {
        /// Connected players.
        #[serde(default)]
        players: Vec<RosterPlayer>,
        /// Squads present on the server.
        #[serde(default)]
        squads: Vec<LiveSquad>,
    },
}

/// One output line.
#[derive(Debug, Serialize)]
struct WarnLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "steamID")]
    steam_id: &'a PlayerId,
    message: &'a str,
}

/// Writes each warning as a `{"type":"warn",...}` JSON line.
#[derive(Debug)]
pub struct WarnWriter<W> {
    output: Mutex<W>,
}

impl<W> WarnWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap `output`.
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }

    /// Lock the underlying writer.
    pub async fn output(&self) -> MutexGuard<'_, W> {
        self.output.lock().await
    }
}

#[async_trait]
impl<W> ReplyTransport for WarnWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn warn(&self, player: &PlayerId, message: &str) -> Result<()> {
        let mut line = serde_json::to_vec(&WarnLine {
            kind: "warn",
            steam_id: player,
            message,
        })?;
        line.push(b'\n');

        let mut output = self.output.lock().await;
        output
            .write_all(&line)
            .await
            .map_err(|e| ClaimError::transport_with_source(format!("Failed to warn {player}"), e))?;
        output
            .flush()
            .await
            .map_err(|e| ClaimError::transport_with_source("Failed to flush warnings", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadclaim_common::{SquadId, TeamId};

    #[test]
    fn test_decode_messages() {
        let round: HostMessage = serde_json::from_str(r#"{"type":"round_ended"}"#).unwrap();
        assert_eq!(round, HostMessage::RoundEnded);

        let roster: HostMessage = serde_json::from_str(
            r#"{"type":"roster","players":[{"steamID":"1","teamID":2,"role":"RGF_SL_01"}],"squads":[{"teamID":2,"squadID":4}]}"#,
        )
        .unwrap();
        let HostMessage::Roster { players, squads } = roster else {
            panic!("expected roster");
        };
        assert_eq!(players[0].team_id, TeamId::Two);
        assert_eq!(squads[0].squad_id, SquadId(4));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_str::<HostMessage>(r#"{"type":"player_connected"}"#).is_err());
    }

    #[test]
    fn test_warn_writes_json_line() {
        let writer = WarnWriter::new(Vec::new());
        tokio_test::block_on(writer.warn(&PlayerId::new("42"), "Hello\nthere")).unwrap();

        let output = tokio_test::block_on(writer.output());
        let text = String::from_utf8(output.clone()).unwrap();
        assert_eq!(text, "{\"type\":\"warn\",\"steamID\":\"42\",\"message\":\"Hello\\nthere\"}\n");
    }
}
