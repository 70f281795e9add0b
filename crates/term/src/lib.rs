//! Terminal rendering for the snake.
//!
//! Everything draws into a plain [`FrameBuffer`] which [`TerminalRenderer`]
//! flushes to the terminal, diffing against the previous frame. The
//! [`SpriteLayer`] is the segment renderer handed to the core run: it keeps one
//! sprite per body segment and the [`GameView`] paints those sprites onto the
//! tile grid.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sprites;

pub use snake_chain_core as core;
pub use snake_chain_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, ItemGlyph, ItemView, Scene, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sprites::{Sprite, SpriteId, SpriteLayer};
