use serde::{Deserialize, Serialize};

use crate::chain::SegmentChain;
use crate::run::RunStatus;
use crate::types::{ColorId, Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub color: ColorId,
    pub position: Position,
    pub visible: bool,
}

/// Quiescent state between ticks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub head: Position,
    pub angle: u16,
    pub direction: Option<Direction>,
    pub status: RunStatus,
    pub segments: Vec<SegmentSnapshot>,
    pub grace_pending: bool,
    pub movement_count: u32,
    pub match_count: u32,
}

impl ChainSnapshot {
    pub fn clear(&mut self) {
        self.head = Position::ORIGIN;
        self.angle = 0;
        self.direction = None;
        self.status = RunStatus::Waiting;
        self.segments.clear();
        self.grace_pending = false;
        self.movement_count = 0;
        self.match_count = 0;
    }

    pub fn alive(&self) -> bool {
        self.status.alive()
    }

    /// Copy chain state in, reusing the segment buffer.
    pub(crate) fn fill_from<H>(&mut self, chain: &SegmentChain<H>) {
        self.head = chain.head();
        self.angle = chain.angle();
        self.segments.clear();
        self.segments.extend(chain.segments().iter().map(|s| SegmentSnapshot {
            color: s.color(),
            position: s.position(),
            visible: s.is_visible(),
        }));
        self.grace_pending = chain.grace_pending();
        self.movement_count = chain.movement_count();
        self.match_count = chain.match_count();
    }
}

impl Default for ChainSnapshot {
    fn default() -> Self {
        Self {
            head: Position::ORIGIN,
            angle: 0,
            direction: None,
            status: RunStatus::Waiting,
            segments: Vec::new(),
            grace_pending: false,
            movement_count: 0,
            match_count: 0,
        }
    }
}
