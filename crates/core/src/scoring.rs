//! Scoring module - match and bomb points plus a default round keeper.
//!
//! Scoring rules:
//! - A match doubles the multiplier first, then adds `MATCH_POINTS * new multiplier`.
//! - A bomb adds `BOMB_POINTS * removed * multiplier` and leaves the multiplier alone.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collab::{RoundKeeper, RoundStatus};
use crate::types::{ColorId, BOMB_POINTS, MATCH_POINTS, PALETTE_SIZE};

/// Multiplier after a match.
pub fn next_multiplier(multiplier: u32) -> u32 {
    multiplier.saturating_mul(2)
}

/// Points for a match, given the already doubled multiplier.
pub fn match_score(new_multiplier: u32) -> u64 {
    MATCH_POINTS.saturating_mul(new_multiplier as u64)
}

/// Points for a bomb removing `removed` segments.
pub fn bomb_score(removed: usize, multiplier: u32) -> u64 {
    BOMB_POINTS
        .saturating_mul(removed as u64)
        .saturating_mul(multiplier as u64)
}

/// Points, multiplier and round end tracking for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    points: u64,
    multiplier: u32,
    cleared: [u32; PALETTE_SIZE as usize],
    dead: bool,
    target_points: Option<u64>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            points: 0,
            multiplier: 1,
            cleared: [0; PALETTE_SIZE as usize],
            dead: false,
            target_points: None,
        }
    }

    /// End the round once `target` points are reached.
    pub fn with_target_points(mut self, target: u64) -> Self {
        self.target_points = Some(target);
        self
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn multiplier_value(&self) -> u32 {
        self.multiplier
    }

    /// Segments cleared per palette color.
    pub fn cleared(&self) -> &[u32; PALETTE_SIZE as usize] {
        &self.cleared
    }

    pub fn dead(&self) -> bool {
        self.dead
    }

    pub fn target_points(&self) -> Option<u64> {
        self.target_points
    }

    pub fn target_reached(&self) -> bool {
        self.target_points.is_some_and(|t| self.points >= t)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundKeeper for ScoreBoard {
    fn multiplier(&self) -> u32 {
        self.multiplier
    }

    fn report_score(&mut self, delta: u64, new_multiplier: u32) {
        self.points = self.points.saturating_add(delta);
        self.multiplier = new_multiplier;
    }

    fn report_group_cleared(&mut self, color: ColorId, count: usize) {
        let slot = &mut self.cleared[color.index() as usize];
        *slot = slot.saturating_add(count as u32);
    }

    fn report_death(&mut self) {
        self.dead = true;
        info!(points = self.points, multiplier = self.multiplier, "run ended by death");
    }

    fn query_round_state(&mut self) -> RoundStatus {
        if self.dead || self.target_reached() {
            RoundStatus::End
        } else {
            RoundStatus::Continue
        }
    }
}
