//! # Squadclaim Bot
//!
//! Host process for the squad claim plugin.
//!
//! Reads server events as JSON lines, feeds them through the event hub into
//! the claim plugin and writes the resulting player warnings back out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod console;
pub mod error;

pub use bot::*;
pub use console::*;
pub use error::*;
