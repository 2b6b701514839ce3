//! # Squadclaim Config
//!
//! Type-safe configuration management for the squad claim bot.
//!
//! This crate provides configuration loading from YAML with environment
//! overrides, validation, and an atomically swappable cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
