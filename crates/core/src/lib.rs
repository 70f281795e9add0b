//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the movement-and-growth rules of the snake: input
//! resolution, tick scheduling, the segment chain, match and bomb removal, and
//! boundary death. It has **no dependencies** on terminals, windows or I/O; the
//! host reaches it through the collaborator traits in [`collab`].
//!
//! # Module Structure
//!
//! - [`direction`]: Key and swipe input to a heading, with the perpendicular-turn lock
//! - [`scheduler`]: Fixed-interval tick timer armed by the first accepted input
//! - [`chain`]: Head plus ordered body segments and the history-replay follow step
//! - [`growth`]: Spawning, match-3 at the head end, and bomb removal by color
//! - [`boundary`]: Playfield extents
//! - [`scoring`]: Match and bomb points and the default [`ScoreBoard`]
//! - [`run`]: [`SnakeRun`], which wires everything to a renderer and a round keeper
//!
//! # Rules
//!
//! - **Movement**: one tile per tick; every segment steps into the tile its predecessor left
//! - **Turning**: only onto the other axis; reversals are ignored
//! - **Growth**: a consumed item spawns a hidden segment at the head that waits one tick
//! - **Match-3**: three same-color segments nearest the head are removed
//! - **Bomb**: every segment of the head-ward color is removed
//! - **Death**: head outside `|x| <= 150`, `|y| <= 241`
//!
//! # Example
//!
//! ```
//! use snake_chain_core::{NullRenderer, ScoreBoard, SnakeConfig, SnakeRun};
//! use snake_chain_types::{ColorId, DirectionKey, InputEvent, Position, TICK_MS};
//!
//! let mut run = SnakeRun::new(SnakeConfig::default(), NullRenderer, ScoreBoard::new());
//! run.handle_input(InputEvent::Key(DirectionKey::ArrowUp));
//! run.advance(TICK_MS);
//! assert_eq!(run.head(), Position::new(0, 30));
//!
//! run.on_consume(ColorId::ALL[1]);
//! assert_eq!(run.chain().len(), 1);
//! ```

pub mod boundary;
pub mod chain;
pub mod collab;
pub mod direction;
pub mod growth;
pub mod run;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use snake_chain_types as types;

// Re-export commonly used types for convenience
pub use boundary::Playfield;
pub use chain::{PositionHistory, Segment, SegmentChain};
pub use collab::{NullRenderer, RoundKeeper, RoundStatus, SegmentRenderer};
pub use direction::{swipe_direction, AxisState, DirectionResolver, Resolution};
pub use growth::{BombOutcome, ConsumeOutcome, MatchGroup};
pub use run::{RunStatus, SnakeConfig, SnakeRun};
pub use scheduler::{SchedulerState, TickScheduler};
pub use scoring::{bomb_score, match_score, next_multiplier, ScoreBoard};
pub use snapshot::{ChainSnapshot, SegmentSnapshot};
