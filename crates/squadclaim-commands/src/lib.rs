//! # Squadclaim Commands
//!
//! Squad claim tracking and the `!claim` chat command.
//!
//! This crate holds the in-memory registry of custom named squads, the
//! per-player cooldown gate, the command grammar and team resolution, reply
//! formatting and pagination, and the engine and plugin tying them to the
//! server's events.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cooldown;
pub mod engine;
pub mod events;
pub mod formatter;
pub mod host;
pub mod messages;
pub mod parser;
pub mod plugin;
pub mod registry;
pub mod resolver;

pub use cooldown::{CooldownError, CooldownGate};
pub use engine::{CommandEngine, CommandOutcome};
pub use events::{EventHub, EventListener, ListenerId, ServerEvent, Topic};
pub use formatter::{paginate, OutputFormatter};
pub use host::{
    ChatChannel, ChatCommandEvent, EventPlayer, LiveSquad, ReplyTransport, RosterPlayer, RosterProvider,
    SnapshotRoster, SquadCreatedEvent, SquadRef,
};
pub use messages::Rejection;
pub use parser::{CommandKind, CommandParser, ParseError, ParsedCommand};
pub use plugin::ClaimPlugin;
pub use registry::{RecordOutcome, SquadRecord, SquadRegistry};
pub use resolver::{ResolveError, TeamResolver};
