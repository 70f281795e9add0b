//! Snake chain (workspace facade crate).
//!
//! Re-exports the workspace crates as `snake_chain::{core,engine,input,term,types}`
//! so binaries, integration tests and benches share one import path.

pub use snake_chain_core as core;
pub use snake_chain_engine as engine;
pub use snake_chain_input as input;
pub use snake_chain_term as term;
pub use snake_chain_types as types;
