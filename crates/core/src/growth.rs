//! Growth & merge engine - spawning, match-3 and bomb removal.
//!
//! Only the three segments nearest the head are ever inspected for a match.
//! After any removal the survivors are laid back onto the settled trail in
//! order, so the chain stays contiguous behind the head.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::chain::{Segment, SegmentChain};
use crate::collab::SegmentRenderer;
use crate::types::{ColorId, Position, MATCH_SIZE};

/// Three head-ward segments sharing a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchGroup {
    pub color: ColorId,
    /// Where the removed segments stood, head-ward first.
    pub positions: [Position; MATCH_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// New segment waits one tick before joining the chain.
    Grace,
    Matched(MatchGroup),
    /// The run is over; nothing was spawned.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombOutcome {
    pub color: ColorId,
    pub removed: usize,
}

impl<H> SegmentChain<H> {
    /// Insert a hidden segment at the head position, nearest the head.
    pub fn spawn<R>(&mut self, color: ColorId, renderer: &mut R)
    where
        R: SegmentRenderer<Handle = H>,
    {
        let position = self.head;
        let visual = renderer.place_segment(position, color);
        self.segments.insert(
            0,
            Segment {
                color,
                position,
                visible: false,
                visual,
            },
        );
    }

    /// Match group at the head end of the chain, if any.
    pub fn detect_match(&self) -> Option<MatchGroup> {
        let head_ward = self.segments.get(..MATCH_SIZE)?;
        let color = head_ward[0].color;
        if !head_ward.iter().all(|s| s.color == color) {
            return None;
        }

        let mut positions = [Position::ORIGIN; MATCH_SIZE];
        for (slot, segment) in positions.iter_mut().zip(head_ward) {
            *slot = segment.position;
        }
        Some(MatchGroup { color, positions })
    }

    /// Grow by one `color` segment and resolve a match at the head end.
    pub fn consume<R>(&mut self, color: ColorId, renderer: &mut R) -> ConsumeOutcome
    where
        R: SegmentRenderer<Handle = H>,
    {
        self.spawn(color, renderer);

        if self.segments.len() < MATCH_SIZE {
            self.grace_pending = true;
            return ConsumeOutcome::Grace;
        }

        let Some(group) = self.detect_match() else {
            self.grace_pending = true;
            return ConsumeOutcome::Grace;
        };

        let removed: ArrayVec<Segment<H>, MATCH_SIZE> = self.segments.drain(..MATCH_SIZE).collect();
        for segment in removed {
            renderer.release_segment(segment.visual);
        }
        self.recompact(renderer);
        self.match_count = self.match_count.wrapping_add(1);
        debug!(color = group.color.index(), remaining = self.segments.len(), "match removed");

        ConsumeOutcome::Matched(group)
    }

    /// Remove every segment sharing the head-ward segment's color.
    ///
    /// Returns `None` on an empty chain.
    pub fn bomb<R>(&mut self, renderer: &mut R) -> Option<BombOutcome>
    where
        R: SegmentRenderer<Handle = H>,
    {
        let color = self.segments.first()?.color;

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.segments)
            .into_iter()
            .partition(|s| s.color == color);
        self.segments = kept;

        let count = removed.len();
        for segment in removed {
            renderer.release_segment(segment.visual);
        }
        self.recompact(renderer);
        debug!(color = color.index(), removed = count, "bomb cleared color");

        Some(BombOutcome {
            color,
            removed: count,
        })
    }

    /// Lay survivors back onto the settled trail.
    fn recompact<R>(&mut self, renderer: &mut R)
    where
        R: SegmentRenderer<Handle = H>,
    {
        self.history.apply(&mut self.segments, renderer);
        for segment in self.segments.iter_mut().filter(|s| !s.visible) {
            segment.visible = true;
            renderer.reveal_segment(&segment.visual);
        }
        self.grace_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::NullRenderer;
    use crate::types::Direction;

    const A: ColorId = ColorId::ALL[0];
    const B: ColorId = ColorId::ALL[1];
    const C: ColorId = ColorId::ALL[2];

    /// Build a settled chain heading up from the origin by eating `colors`
    /// tail-first and stepping once after each.
    fn grown(colors_head_to_tail: &[ColorId]) -> SegmentChain<()> {
        let mut chain = SegmentChain::new(Position::new(0, 0));
        for &c in colors_head_to_tail.iter().rev() {
            chain.spawn(c, &mut NullRenderer);
            chain.grace_pending = true;
            chain.step(Direction::Up, 30, &mut NullRenderer);
        }
        chain
    }

    #[test]
    fn spawn_goes_to_head_hidden() {
        let mut chain = grown(&[B]);
        chain.spawn(A, &mut NullRenderer);
        let first = &chain.segments()[0];
        assert_eq!(first.color(), A);
        assert_eq!(first.position(), chain.head());
        assert!(!first.is_visible());
    }

    #[test]
    fn short_chain_takes_grace_path() {
        let mut chain = grown(&[A]);
        assert_eq!(chain.consume(A, &mut NullRenderer), ConsumeOutcome::Grace);
        assert!(chain.grace_pending());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn mismatch_takes_grace_path() {
        let mut chain = grown(&[A, B]);
        assert_eq!(chain.consume(A, &mut NullRenderer), ConsumeOutcome::Grace);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn match_only_looks_at_head_end() {
        // Three As further down the chain never match.
        let mut chain = grown(&[B, A, A, A]);
        assert_eq!(chain.consume(C, &mut NullRenderer), ConsumeOutcome::Grace);
        assert_eq!(chain.len(), 5);
    }

    #[test]
    fn match_removes_three_and_recompacts() {
        let mut chain = grown(&[A, A, B]);
        let trail: Vec<_> = chain.positions().collect();

        let outcome = chain.consume(A, &mut NullRenderer);
        let ConsumeOutcome::Matched(group) = outcome else {
            panic!("expected match, got {outcome:?}");
        };
        assert_eq!(group.color, A);
        assert_eq!(group.positions[0], chain.head());
        assert_eq!(chain.colors().collect::<Vec<_>>(), vec![B]);
        assert_eq!(chain.segments()[0].position(), trail[0]);
        assert_eq!(chain.match_count(), 1);
        assert!(!chain.grace_pending());
    }

    #[test]
    fn fourth_same_color_segment_survives_a_match() {
        let mut chain = grown(&[A, A, A, B]);
        let trail: Vec<_> = chain.positions().collect();

        assert!(matches!(
            chain.consume(A, &mut NullRenderer),
            ConsumeOutcome::Matched(_)
        ));
        assert_eq!(chain.colors().collect::<Vec<_>>(), vec![A, B]);
        assert_eq!(chain.positions().collect::<Vec<_>>(), trail[..2].to_vec());
    }

    #[test]
    fn bomb_removes_every_segment_of_head_color() {
        let mut chain = grown(&[A, B, A, A, C]);
        let trail: Vec<_> = chain.positions().collect();

        let outcome = chain.bomb(&mut NullRenderer).unwrap();
        assert_eq!(outcome, BombOutcome { color: A, removed: 3 });
        assert_eq!(chain.colors().collect::<Vec<_>>(), vec![B, C]);
        assert_eq!(chain.positions().collect::<Vec<_>>(), trail[..2].to_vec());
    }

    #[test]
    fn bomb_on_empty_chain_is_noop() {
        let mut chain: SegmentChain<()> = SegmentChain::new(Position::ORIGIN);
        assert!(chain.bomb(&mut NullRenderer).is_none());
    }
}
