//! Named-topic event hub between the server connection and its plugins.

use crate::host::{ChatCommandEvent, SquadCreatedEvent};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Events the server connection publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A squad was created.
    SquadCreated(SquadCreatedEvent),
    /// A player typed a chat command.
    ChatCommand(ChatCommandEvent),
    /// The round ended.
    RoundEnded,
}

impl ServerEvent {
    /// Topic this event is published under.
    pub fn topic(&self) -> Topic {
        match self {
            Self::SquadCreated(_) => Topic::SquadCreated,
            Self::ChatCommand(event) => Topic::ChatCommand(event.command.to_lowercase()),
            Self::RoundEnded => Topic::RoundEnded,
        }
    }
}

/// Subscription key. Chat commands are keyed by their command word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// `SQUAD_CREATED`
    SquadCreated,
    /// `CHAT_COMMAND:<word>`
    ChatCommand(String),
    /// `ROUND_ENDED`
    RoundEnded,
}

impl Topic {
    /// Topic of a chat command word, matched case-insensitively.
    pub fn chat_command(word: &str) -> Self {
        Self::ChatCommand(word.to_lowercase())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SquadCreated => f.write_str("SQUAD_CREATED"),
            Self::ChatCommand(word) => write!(f, "CHAT_COMMAND:{word}"),
            Self::RoundEnded => f.write_str("ROUND_ENDED"),
        }
    }
}

/// Receives events for the topics it subscribed to.
///
/// Delivery is synchronous; long-running work must be handed off.
pub trait EventListener: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &ServerEvent);
}

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    topic: Topic,
    listener: Arc<dyn EventListener>,
}

/// Publish/subscribe hub keyed by [`Topic`].
#[derive(Default)]
pub struct EventHub {
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
}

impl EventHub {
    /// Create a hub without subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `topic`.
    pub fn subscribe(&self, topic: Topic, listener: Arc<dyn EventListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(%topic, "Listener subscribed");
        self.subscriptions.write().push(Subscription { id, topic, listener });
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        before != subscriptions.len()
    }

    /// Deliver `event` to its topic's listeners in subscription order.
    ///
    /// Returns the number of listeners that received it.
    pub fn emit(&self, event: &ServerEvent) -> usize {
        let topic = event.topic();
        // listeners may (un)subscribe while handling, so call them without the lock
        let listeners: Vec<Arc<dyn EventListener>> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| Arc::clone(&s.listener))
            .collect();

        trace!(%topic, listeners = listeners.len(), "Emitting event");
        for listener in &listeners {
            listener.on_event(event);
        }
        listeners.len()
    }

    /// Number of listeners on `topic`.
    pub fn listener_count(&self, topic: &Topic) -> usize {
        self.subscriptions.read().iter().filter(|s| &s.topic == topic).count()
    }
}
