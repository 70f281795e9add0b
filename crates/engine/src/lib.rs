//! Host engine: the things around a run that the core leaves to its host.
//!
//! - [`items`]: balls and bombs on free tiles of the playfield
//! - [`session`]: one [`SnakeRun`](snake_chain_core::SnakeRun) plus its items,
//!   dispatching consume and bomb events after every tick
//! - [`config`]: environment overrides
//! - [`rng`]: deterministic LCG used for item placement

pub mod config;
pub mod items;
pub mod rng;
pub mod session;

pub use snake_chain_core as core;
pub use snake_chain_types as types;

pub use config::{ConfigError, RunConfig};
pub use items::{Item, ItemField, ItemKind};
pub use rng::SimpleRng;
pub use session::{Session, SessionSnapshot};
