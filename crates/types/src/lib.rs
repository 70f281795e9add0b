//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with no behavior beyond small conversions, so they can be
//! shared by the simulation core, the terminal host and tests alike.
//!
//! # Playfield
//!
//! The playfield is centered on the origin and measured in world units. The
//! head moves one tile (`TILE_SIZE` units) per tick, and `y` grows upward.
//!
//! - **Horizontal extent**: `|x| <= 150`
//! - **Vertical extent**: `|y| <= 241`
//! - **Tile size**: 30 units
//!
//! # Timing and Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 400 | Interval between movement steps |
//! | `SWIPE_MIN_LENGTH` | 60 | Shorter swipes are treated as taps |
//! | `MATCH_SIZE` | 3 | Same-color segments removed by a match |
//! | `MATCH_POINTS` | 800 | Points per match, times the new multiplier |
//! | `BOMB_POINTS` | 300 | Points per bombed segment, times the multiplier |
//! | `PALETTE_SIZE` | 4 | Number of segment colors |
//!
//! # Examples
//!
//! ```
//! use snake_chain_types::{Axis, Direction, DirectionKey, Position, TILE_SIZE};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.axis(), Axis::Horizontal);
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! let next = Position::ORIGIN.step(dir, TILE_SIZE);
//! assert_eq!(next, Position::new(-30, 0));
//!
//! assert_eq!(DirectionKey::ArrowUp.direction(), Direction::Up);
//! ```

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// Interval between movement steps in milliseconds.
pub const TICK_MS: u32 = 400;

/// Size of one tile in world units; the head moves exactly one tile per tick.
pub const TILE_SIZE: i32 = 30;

/// Largest `|x|` the head may occupy and stay alive.
pub const BOUND_X: i32 = 150;

/// Largest `|y|` the head may occupy and stay alive.
pub const BOUND_Y: i32 = 241;

/// Minimum Euclidean length of a swipe gesture, in gesture units.
pub const SWIPE_MIN_LENGTH: f32 = 60.0;

/// Number of contiguous same-color segments removed by a match.
pub const MATCH_SIZE: usize = 3;

/// Base points for a match (multiplied by the doubled multiplier).
pub const MATCH_POINTS: u64 = 800;

/// Points per segment removed by a bomb (multiplied by the current multiplier).
pub const BOMB_POINTS: u64 = 300;

/// Number of segment colors.
pub const PALETTE_SIZE: u8 = 4;


/// Travel axis, used by the perpendicular-turn rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// The four travel directions of the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in world coordinates (`y` grows upward).
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Head sprite rotation in degrees, counter-clockwise from "up".
    pub fn angle(self) -> u16 {
        match self {
            Direction::Up => 0,
            Direction::Left => 90,
            Direction::Down => 180,
            Direction::Right => 270,
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use snake_chain_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Tile-quantized world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one `tile_size` step away in `dir`.
    pub fn step(self, dir: Direction, tile_size: i32) -> Self {
        let (dx, dy) = dir.unit();
        Self {
            x: self.x + dx * tile_size,
            y: self.y + dy * tile_size,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Index into the fixed segment palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorId(u8);

impl ColorId {
    pub const ALL: [ColorId; PALETTE_SIZE as usize] = [ColorId(0), ColorId(1), ColorId(2), ColorId(3)];

    /// Returns `None` for indices outside the palette.
    pub fn new(index: u8) -> Option<Self> {
        (index < PALETTE_SIZE).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// The eight allow-listed direction keys (WASD and arrows).
///
/// Host key codes outside this list never become a `DirectionKey`, which is
/// how non-allow-listed keys end up as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    W,
    ArrowUp,
    S,
    ArrowDown,
    A,
    ArrowLeft,
    D,
    ArrowRight,
}

impl DirectionKey {
    pub const ALL: [DirectionKey; 8] = [
        DirectionKey::W,
        DirectionKey::ArrowUp,
        DirectionKey::S,
        DirectionKey::ArrowDown,
        DirectionKey::A,
        DirectionKey::ArrowLeft,
        DirectionKey::D,
        DirectionKey::ArrowRight,
    ];

    pub fn direction(self) -> Direction {
        match self {
            DirectionKey::W | DirectionKey::ArrowUp => Direction::Up,
            DirectionKey::S | DirectionKey::ArrowDown => Direction::Down,
            DirectionKey::A | DirectionKey::ArrowLeft => Direction::Left,
            DirectionKey::D | DirectionKey::ArrowRight => Direction::Right,
        }
    }
}

/// A point of a swipe gesture, in gesture units (`y` grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,
}

impl GesturePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw directional input, before axis-lock resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(DirectionKey),
    Swipe { start: GesturePoint, end: GesturePoint },
}
