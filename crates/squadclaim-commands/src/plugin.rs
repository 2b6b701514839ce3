//! The claim plugin: wires a [`CommandEngine`] to an [`EventHub`].

use crate::engine::CommandEngine;
use crate::events::{EventHub, EventListener, ListenerId, ServerEvent, Topic};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

/// Plugin tracking custom squads and answering claim commands.
///
/// Squad creation and round end are applied while the event is emitted.
/// Each chat command runs as its own task, so a reply paused between batches
/// never holds up other players.
pub struct ClaimPlugin {
    engine: CommandEngine,
    subscriptions: Mutex<Vec<ListenerId>>,
    tasks: TaskTracker,
}

impl ClaimPlugin {
    /// Create an unmounted plugin.
    pub fn new(engine: CommandEngine) -> Self {
        Self {
            engine,
            subscriptions: Mutex::new(Vec::new()),
            tasks: TaskTracker::new(),
        }
    }

    /// The engine handling this plugin's events.
    pub fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    /// Subscribe to squad creation, round end and the configured command.
    ///
    /// Mounting an already mounted plugin is a no-op.
    pub fn mount(self: &Arc<Self>, hub: &EventHub) {
        let mut subscriptions = self.subscriptions.lock();
        if !subscriptions.is_empty() {
            debug!("Claim plugin already mounted");
            return;
        }

        let command_prefix = self.engine.config().command_prefix();
        let listener: Arc<dyn EventListener> = self.clone();

        for topic in [
            Topic::chat_command(&command_prefix),
            Topic::SquadCreated,
            Topic::RoundEnded,
        ] {
            subscriptions.push(hub.subscribe(topic, Arc::clone(&listener)));
        }

        info!(command = %command_prefix, "Claim plugin mounted");
    }

    /// Remove this plugin's subscriptions. In-flight commands keep running.
    pub fn unmount(&self, hub: &EventHub) {
        let subscriptions: Vec<ListenerId> = self.subscriptions.lock().drain(..).collect();
        if subscriptions.is_empty() {
            return;
        }

        for id in subscriptions {
            hub.unsubscribe(id);
        }
        info!("Claim plugin unmounted");
    }

    /// Whether the plugin is subscribed to a hub.
    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.lock().is_empty()
    }

    /// Number of chat commands still replying.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every spawned chat command has finished.
    pub async fn drain(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }
}

impl EventListener for ClaimPlugin {
    fn on_event(&self, event: &ServerEvent) {
        match event {
            ServerEvent::SquadCreated(created) => {
                self.engine.on_squad_created(created);
            }
            ServerEvent::RoundEnded => self.engine.on_round_ended(),
            ServerEvent::ChatCommand(command) => {
                let engine = self.engine.clone();
                let command = command.clone();
                self.tasks.spawn(async move {
                    let outcome = engine.on_chat_command(&command).await;
                    debug!(?outcome, "Claim command finished");
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ChatChannel, ChatCommandEvent, EventPlayer, ReplyTransport, SnapshotRoster};
    use async_trait::async_trait;
    use squadclaim_common::test_utils::server_fixtures::player;
    use squadclaim_common::{PlayerId, TeamId};
    use squadclaim_config::ConfigCache;

    #[derive(Default)]
    struct CountingTransport {
        sent: Mutex<usize>,
    }

    #[async_trait]
    impl ReplyTransport for CountingTransport {
        async fn warn(&self, _player: &PlayerId, _message: &str) -> squadclaim_common::Result<()> {
            *self.sent.lock() += 1;
            Ok(())
        }
    }

    fn plugin() -> (Arc<ClaimPlugin>, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport::default());
        let engine = CommandEngine::new(
            Arc::new(ConfigCache::default()),
            Arc::new(SnapshotRoster::default()),
            transport.clone(),
        );
        (Arc::new(ClaimPlugin::new(engine)), transport)
    }

    fn help_command(word: &str) -> ServerEvent {
        ServerEvent::ChatCommand(ChatCommandEvent {
            command: word.to_string(),
            message: "help".to_string(),
            chat: ChatChannel::ChatAll,
            steam_id: player(1),
            player: EventPlayer {
                steam_id: player(1),
                name: None,
                team_id: TeamId::One,
                squad: None,
                is_leader: false,
            },
        })
    }

    #[test]
    fn test_mount_and_unmount() {
        let hub = EventHub::new();
        let (plugin, _) = plugin();

        plugin.mount(&hub);
        plugin.mount(&hub);
        assert!(plugin.is_mounted());
        assert_eq!(hub.listener_count(&Topic::chat_command("claim")), 1);
        assert_eq!(hub.listener_count(&Topic::SquadCreated), 1);
        assert_eq!(hub.listener_count(&Topic::RoundEnded), 1);

        plugin.unmount(&hub);
        assert!(!plugin.is_mounted());
        assert_eq!(hub.listener_count(&Topic::RoundEnded), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_command_runs_in_background() {
        let hub = EventHub::new();
        let (plugin, transport) = plugin();
        plugin.mount(&hub);

        assert_eq!(hub.emit(&help_command("CLAIM")), 1);
        assert_eq!(hub.emit(&help_command("other")), 0);

        plugin.drain().await;
        // default config shows both help messages twice
        assert_eq!(*transport.sent.lock(), 4);
        assert_eq!(plugin.in_flight(), 0);
    }
}
