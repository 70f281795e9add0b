//! Segment chain - the head plus the ordered body that trails it.
//!
//! Movement replays a per-tick [`PositionHistory`]: every segment steps into the
//! tile its predecessor occupied before the tick. The history of the last tick is
//! kept as the chain's settled trail, which lets the growth engine close the gap
//! left by removed segments without any distance math.

use crate::collab::SegmentRenderer;
use crate::types::{ColorId, Direction, Position};

/// One body part. Index 0 of the chain is nearest the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<H> {
    pub(crate) color: ColorId,
    pub(crate) position: Position,
    pub(crate) visible: bool,
    pub(crate) visual: H,
}

impl<H> Segment<H> {
    pub fn color(&self) -> ColorId {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visual(&self) -> &H {
        &self.visual
    }
}

/// Positions ordered head-to-tail.
///
/// Captured before a step as `[head, seg0, seg1, ..]`, so after the step
/// segment `i` sits on slot `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionHistory {
    slots: Vec<Position>,
}

impl PositionHistory {
    /// Pre-step snapshot: head first, then every segment.
    pub fn capture<H>(head: Position, segments: &[Segment<H>]) -> Self {
        let mut history = Self {
            slots: Vec::with_capacity(segments.len() + 1),
        };
        history.recapture(head, segments);
        history
    }

    /// The tiles the segments occupy right now.
    pub fn settled<H>(segments: &[Segment<H>]) -> Self {
        let mut history = Self::default();
        history.resettle(segments);
        history
    }

    /// [`PositionHistory::capture`] into the existing buffer.
    pub fn recapture<H>(&mut self, head: Position, segments: &[Segment<H>]) {
        self.slots.clear();
        self.slots.push(head);
        self.slots.extend(segments.iter().map(|s| s.position));
    }

    /// [`PositionHistory::settled`] into the existing buffer.
    pub fn resettle<H>(&mut self, segments: &[Segment<H>]) {
        self.slots.clear();
        self.slots.extend(segments.iter().map(|s| s.position));
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn slots(&self) -> &[Position] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Move segment `i` onto slot `i`. Segments past the end of the history keep
    /// their tile.
    pub(crate) fn apply<R: SegmentRenderer>(
        &self,
        segments: &mut [Segment<R::Handle>],
        renderer: &mut R,
    ) {
        for (segment, &slot) in segments.iter_mut().zip(self.slots.iter()) {
            if segment.position != slot {
                segment.position = slot;
                renderer.reposition_segment(&segment.visual, slot);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentChain<H> {
    pub(crate) head: Position,
    pub(crate) angle: u16,
    pub(crate) segments: Vec<Segment<H>>,
    pub(crate) history: PositionHistory,
    /// Newest segment sits out the next step (grace tick).
    pub(crate) grace_pending: bool,
    pub(crate) movement_count: u32,
    pub(crate) match_count: u32,
}

impl<H> SegmentChain<H> {
    pub fn new(head: Position) -> Self {
        Self {
            head,
            angle: 0,
            segments: Vec::new(),
            history: PositionHistory::default(),
            grace_pending: false,
            movement_count: 0,
            match_count: 0,
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    /// Render rotation of the head in degrees.
    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn segments(&self) -> &[Segment<H>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn colors(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.segments.iter().map(|s| s.color)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    /// Settled trail from the most recent tick.
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn grace_pending(&self) -> bool {
        self.grace_pending
    }

    pub fn movement_count(&self) -> u32 {
        self.movement_count
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    /// Advance the head one tile and pull the body along. Returns the new head.
    pub fn step<R>(&mut self, dir: Direction, tile_size: i32, renderer: &mut R) -> Position
    where
        R: SegmentRenderer<Handle = H>,
    {
        let new_head = self.head.step(dir, tile_size);
        self.angle = dir.angle();

        // Reuses the trail buffer; a steady chain steps without allocating.
        self.history.recapture(self.head, &self.segments);
        self.head = new_head;
        renderer.set_head(new_head, self.angle);
        self.movement_count = self.movement_count.wrapping_add(1);

        if self.grace_pending {
            // The newest segment already covers the tile the head just left,
            // so the rest of the body holds still this tick as well.
            self.grace_pending = false;
            for segment in self.segments.iter_mut().filter(|s| !s.visible) {
                segment.visible = true;
                renderer.reveal_segment(&segment.visual);
            }
            self.history.resettle(&self.segments);
        } else {
            self.history.apply(&mut self.segments, renderer);
        }

        new_head
    }

    /// Release every segment. Returns how many were released.
    pub fn release_all<R>(&mut self, renderer: &mut R) -> usize
    where
        R: SegmentRenderer<Handle = H>,
    {
        let count = self.segments.len();
        for segment in self.segments.drain(..) {
            renderer.release_segment(segment.visual);
        }
        self.history.clear();
        self.grace_pending = false;
        count
    }
}
