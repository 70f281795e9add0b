//! Collaborator seams - what the simulation needs from its host.
//!
//! The run owns one value of each trait, handed over at construction. Nothing in
//! the core looks collaborators up by name or path.

use serde::{Deserialize, Serialize};

use crate::types::{ColorId, Position};

/// Visual side of a segment's lifecycle.
///
/// `place_segment` allocates a hidden representation; the chain calls
/// `reveal_segment` once the segment joins the moving chain. Every handle the
/// renderer hands out comes back through `release_segment` exactly once.
pub trait SegmentRenderer {
    /// Opaque reference to the host's visual. The core never inspects it.
    type Handle;

    fn place_segment(&mut self, position: Position, color: ColorId) -> Self::Handle;

    fn release_segment(&mut self, handle: Self::Handle);

    fn reveal_segment(&mut self, _handle: &Self::Handle) {}

    fn reposition_segment(&mut self, _handle: &Self::Handle, _position: Position) {}

    /// Head moved; `angle` is the render rotation in degrees.
    fn set_head(&mut self, _position: Position, _angle: u16) {}
}

/// Answer of the per-tick round query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Continue,
    End,
}

/// Scoring and round-state aggregator.
pub trait RoundKeeper {
    /// Current scorer-owned multiplier.
    fn multiplier(&self) -> u32;

    fn report_score(&mut self, delta: u64, new_multiplier: u32);

    /// A color group left the chain (match or bomb).
    fn report_group_cleared(&mut self, _color: ColorId, _count: usize) {}

    fn report_death(&mut self);

    fn query_round_state(&mut self) -> RoundStatus;
}

/// Renderer that draws nothing. Useful for headless runs and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl SegmentRenderer for NullRenderer {
    type Handle = ();

    fn place_segment(&mut self, _position: Position, _color: ColorId) -> Self::Handle {}

    fn release_segment(&mut self, _handle: Self::Handle) {}
}
