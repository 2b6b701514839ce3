//! Core bot logic: event hub, claim plugin and the input loop.

use crate::console::HostMessage;
use crate::error::{BotError, BotResult};
use squadclaim_commands::{ClaimPlugin, CommandEngine, EventHub, ReplyTransport, ServerEvent, SnapshotRoster};
use squadclaim_config::{Config, ConfigCache};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// Main bot structure.
pub struct ClaimBot {
    config: Arc<ConfigCache>,
    hub: EventHub,
    plugin: Arc<ClaimPlugin>,
    roster: Arc<SnapshotRoster>,
}

impl ClaimBot {
    /// Creates a new bot with the claim plugin mounted.
    pub fn new(config: Config, transport: Arc<dyn ReplyTransport>) -> Self {
        let config = Arc::new(ConfigCache::new(config));
        let roster = Arc::new(SnapshotRoster::default());
        let engine = CommandEngine::new(config.clone(), roster.clone(), transport);
        let plugin = Arc::new(ClaimPlugin::new(engine));

        let hub = EventHub::new();
        plugin.mount(&hub);

        Self {
            config,
            hub,
            plugin,
            roster,
        }
    }

    /// Shared configuration cache.
    pub fn config(&self) -> &ConfigCache {
        &self.config
    }

    /// The mounted claim plugin.
    pub fn plugin(&self) -> &ClaimPlugin {
        &self.plugin
    }

    /// Apply one host message.
    pub fn dispatch(&self, message: HostMessage) {
        let event = match message {
            HostMessage::Roster { players, squads } => {
                debug!(players = players.len(), squads = squads.len(), "Roster updated");
                self.roster.replace(players, squads);
                return;
            }
            HostMessage::SquadCreated(event) => ServerEvent::SquadCreated(event),
            HostMessage::ChatCommand(event) => ServerEvent::ChatCommand(event),
            HostMessage::RoundEnded => ServerEvent::RoundEnded,
        };

        if self.hub.emit(&event) == 0 {
            debug!(topic = %event.topic(), "No listener for event");
        }
    }

    /// Decode and apply one input line. Blank lines are skipped.
    pub fn handle_line(&self, line_number: usize, line: &str) -> BotResult<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let message = serde_json::from_str(line).map_err(|source| BotError::Decode {
            line: line_number,
            source,
        })?;
        self.dispatch(message);
        Ok(())
    }

    /// Process `input` until it is exhausted.
    ///
    /// Undecodable lines are logged and skipped. Returns the number of lines
    /// read.
    pub async fn run<R>(&self, input: R) -> BotResult<usize>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut line_number = 0;

        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            if let Err(e) = self.handle_line(line_number, &line) {
                warn!("Skipping input: {}", e);
            }
        }

        Ok(line_number)
    }

    /// Detach the plugin and wait for in-flight replies.
    pub async fn shutdown(&self) {
        self.plugin.unmount(&self.hub);
        let pending = self.plugin.in_flight();
        if pending > 0 {
            info!(pending, "Waiting for in-flight claim commands");
        }
        self.plugin.drain().await;
    }
}
