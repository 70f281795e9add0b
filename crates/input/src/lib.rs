//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond
//! `crossterm` events. It maps key events onto the eight allow-listed direction
//! keys and turns mouse drags into swipe gestures, producing
//! [`crate::types::InputEvent`] values for the simulation core.

pub mod map;
pub mod swipe;

pub use snake_chain_types as types;

pub use map::{is_restart, map_key_event, should_quit};
pub use swipe::SwipeTracker;
