//! Mouse drag to swipe gesture conversion.
//!
//! Terminal cells are about twice as tall as they are wide, so columns and rows
//! are scaled separately into gesture units. Rows grow downward on screen while
//! gesture `y` grows upward.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{GesturePoint, InputEvent};

const DEFAULT_UNITS_PER_COLUMN: f32 = 8.0;
const DEFAULT_UNITS_PER_ROW: f32 = 16.0;

/// Pairs a press with its release (the touch start / touch end of a swipe).
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<GesturePoint>,
    units_per_column: f32,
    units_per_row: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_UNITS_PER_COLUMN, DEFAULT_UNITS_PER_ROW)
    }

    pub fn with_scale(units_per_column: f32, units_per_row: f32) -> Self {
        Self {
            start: None,
            units_per_column,
            units_per_row,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }

    pub fn to_gesture(&self, column: u16, row: u16) -> GesturePoint {
        GesturePoint::new(
            column as f32 * self.units_per_column,
            -(row as f32) * self.units_per_row,
        )
    }

    pub fn touch_start(&mut self, column: u16, row: u16) {
        self.start = Some(self.to_gesture(column, row));
    }

    /// Completes the gesture. A release without a press is dropped.
    pub fn touch_end(&mut self, column: u16, row: u16) -> Option<InputEvent> {
        let start = self.start.take()?;
        Some(InputEvent::Swipe {
            start,
            end: self.to_gesture(column, row),
        })
    }

    /// Feed a raw mouse event. Only the left button takes part in swipes.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<InputEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.touch_start(event.column, event.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.touch_end(event.column, event.row),
            _ => None,
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}
