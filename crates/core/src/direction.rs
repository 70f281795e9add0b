//! Direction resolver - turns raw key and swipe input into a heading.
//!
//! Input is honored only when it turns the head onto the perpendicular axis.
//! Continuing on the current axis or reversing along it is dropped, so the head
//! can never fold straight back onto the segment behind it.

use tracing::trace;

use crate::types::{Axis, Direction, GesturePoint, InputEvent, SWIPE_MIN_LENGTH};

/// Axis lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    /// No direction accepted yet; either axis is allowed.
    Unset,
    OnAxis(Axis),
}

/// Outcome of an accepted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub direction: Direction,
    /// True only for the first accepted direction of a run.
    pub first: bool,
}

#[derive(Debug, Clone)]
pub struct DirectionResolver {
    state: AxisState,
    current: Option<Direction>,
    swipe_min_length: f32,
}

impl DirectionResolver {
    pub fn new() -> Self {
        Self::with_swipe_min_length(SWIPE_MIN_LENGTH)
    }

    pub fn with_swipe_min_length(swipe_min_length: f32) -> Self {
        Self {
            state: AxisState::Unset,
            current: None,
            swipe_min_length,
        }
    }

    pub fn state(&self) -> AxisState {
        self.state
    }

    pub fn direction(&self) -> Option<Direction> {
        self.current
    }

    pub fn swipe_min_length(&self) -> f32 {
        self.swipe_min_length
    }

    /// Resolve one input event. Returns `None` when the input is ignored.
    pub fn resolve(&mut self, event: InputEvent) -> Option<Resolution> {
        let requested = match event {
            InputEvent::Key(key) => key.direction(),
            InputEvent::Swipe { start, end } => {
                let Some(dir) = swipe_direction(start, end, self.swipe_min_length) else {
                    trace!("swipe below threshold ignored");
                    return None;
                };
                dir
            }
        };
        self.request(requested)
    }

    /// Apply the axis-lock transition table to a requested direction.
    pub fn request(&mut self, requested: Direction) -> Option<Resolution> {
        let first = match self.state {
            AxisState::Unset => true,
            AxisState::OnAxis(axis) if requested.axis() != axis => false,
            AxisState::OnAxis(_) => {
                trace!(requested = requested.as_str(), "same-axis input ignored");
                return None;
            }
        };

        self.state = AxisState::OnAxis(requested.axis());
        self.current = Some(requested);
        Some(Resolution {
            direction: requested,
            first,
        })
    }
}

impl Default for DirectionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of a swipe, or `None` when it is shorter than `min_length`.
///
/// The dominant displacement axis wins; a tie counts as vertical.
pub fn swipe_direction(start: GesturePoint, end: GesturePoint, min_length: f32) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.hypot(dy) < min_length {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Up } else { Direction::Down })
    }
}
