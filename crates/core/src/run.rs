//! Snake run - one life of the head and its chain, wired to its collaborators.
//!
//! This module ties together the direction resolver, the tick scheduler, the
//! segment chain, the growth engine and the boundary monitor. The run owns its
//! renderer and round keeper for its whole lifetime.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::boundary::Playfield;
use crate::chain::SegmentChain;
use crate::collab::{RoundKeeper, RoundStatus, SegmentRenderer};
use crate::direction::DirectionResolver;
use crate::growth::ConsumeOutcome;
use crate::scheduler::TickScheduler;
use crate::scoring::{bomb_score, match_score, next_multiplier};
use crate::snapshot::ChainSnapshot;
use crate::types::{ColorId, Direction, InputEvent, Position, SWIPE_MIN_LENGTH, TICK_MS, TILE_SIZE};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No direction accepted yet; the scheduler is unarmed.
    Waiting,
    Running,
    /// Head left the playfield.
    Dead,
    /// The round keeper ended the round.
    RoundOver,
}

impl RunStatus {
    pub fn alive(self) -> bool {
        matches!(self, RunStatus::Waiting | RunStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnakeConfig {
    pub tick_ms: u32,
    pub tile_size: i32,
    pub swipe_min_length: f32,
    pub playfield: Playfield,
    pub start: Position,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            tile_size: TILE_SIZE,
            swipe_min_length: SWIPE_MIN_LENGTH,
            playfield: Playfield::DEFAULT,
            start: Position::ORIGIN,
        }
    }
}

pub struct SnakeRun<R: SegmentRenderer, K: RoundKeeper> {
    config: SnakeConfig,
    resolver: DirectionResolver,
    scheduler: TickScheduler,
    chain: SegmentChain<R::Handle>,
    status: RunStatus,
    renderer: R,
    keeper: K,
}

impl<R: SegmentRenderer, K: RoundKeeper> SnakeRun<R, K> {
    pub fn new(config: SnakeConfig, mut renderer: R, keeper: K) -> Self {
        renderer.set_head(config.start, 0);
        Self {
            config,
            resolver: DirectionResolver::with_swipe_min_length(config.swipe_min_length),
            scheduler: TickScheduler::new(),
            chain: SegmentChain::new(config.start),
            status: RunStatus::Waiting,
            renderer,
            keeper,
        }
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status.alive()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.resolver.direction()
    }

    pub fn resolver(&self) -> &DirectionResolver {
        &self.resolver
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn chain(&self) -> &SegmentChain<R::Handle> {
        &self.chain
    }

    pub fn head(&self) -> Position {
        self.chain.head()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn keeper(&self) -> &K {
        &self.keeper
    }

    pub fn keeper_mut(&mut self) -> &mut K {
        &mut self.keeper
    }

    /// Resolve an input event; the first accepted direction arms the scheduler.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Direction> {
        if !self.is_alive() {
            return None;
        }

        let resolution = self.resolver.resolve(event)?;
        if resolution.first && self.scheduler.arm(self.config.tick_ms) {
            self.status = RunStatus::Running;
            info!(direction = resolution.direction.as_str(), "run started");
        }
        Some(resolution.direction)
    }

    /// Feed elapsed host time. Runs every due tick in order and returns how
    /// many ran. Ticks still due when the run ends are dropped.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let due = self.scheduler.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if !self.is_alive() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Milliseconds until the next tick, if the scheduler is running.
    pub fn time_until_next_tick_ms(&self) -> Option<u32> {
        self.scheduler.time_until_next_ms()
    }

    fn tick(&mut self) {
        let Some(dir) = self.resolver.direction() else {
            return;
        };

        let head = self.chain.step(dir, self.config.tile_size, &mut self.renderer);
        debug!(
            x = head.x,
            y = head.y,
            direction = dir.as_str(),
            len = self.chain.len(),
            "tick"
        );

        if !self.config.playfield.contains(head) {
            info!(x = head.x, y = head.y, len = self.chain.len(), "head left the playfield");
            self.teardown(RunStatus::Dead);
            self.keeper.report_death();
            return;
        }

        if self.keeper.query_round_state() == RoundStatus::End {
            info!("round ended by keeper");
            self.teardown(RunStatus::RoundOver);
        }
    }

    /// Stop the scheduler and release every segment before returning.
    fn teardown(&mut self, status: RunStatus) {
        self.scheduler.stop();
        let released = self.chain.release_all(&mut self.renderer);
        self.status = status;
        debug!(released, "run torn down");
    }

    /// The head reached a consumable of `color`.
    pub fn on_consume(&mut self, color: ColorId) -> ConsumeOutcome {
        if !self.is_alive() {
            return ConsumeOutcome::Ignored;
        }

        let outcome = self.chain.consume(color, &mut self.renderer);
        if let ConsumeOutcome::Matched(group) = outcome {
            let multiplier = next_multiplier(self.keeper.multiplier());
            let delta = match_score(multiplier);
            self.keeper.report_score(delta, multiplier);
            self.keeper.report_group_cleared(group.color, group.positions.len());
            info!(color = group.color.index(), delta, multiplier, "match");
        }
        outcome
    }

    /// The head reached a bomb. Returns the number of segments removed.
    pub fn on_bomb_trigger(&mut self) -> usize {
        if !self.is_alive() {
            return 0;
        }

        let Some(outcome) = self.chain.bomb(&mut self.renderer) else {
            return 0;
        };

        let multiplier = self.keeper.multiplier();
        let delta = bomb_score(outcome.removed, multiplier);
        self.keeper.report_score(delta, multiplier);
        self.keeper.report_group_cleared(outcome.color, outcome.removed);
        info!(color = outcome.color.index(), removed = outcome.removed, delta, "bomb");
        outcome.removed
    }

    pub fn snapshot_into(&self, out: &mut ChainSnapshot) {
        out.fill_from(&self.chain);
        out.direction = self.resolver.direction();
        out.status = self.status;
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        let mut s = ChainSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::NullRenderer;
    use crate::scoring::ScoreBoard;
    use crate::types::DirectionKey;

    fn run() -> SnakeRun<NullRenderer, ScoreBoard> {
        SnakeRun::new(SnakeConfig::default(), NullRenderer, ScoreBoard::new())
    }

    #[test]
    fn waits_for_first_input() {
        let mut r = run();
        assert_eq!(r.status(), RunStatus::Waiting);
        assert_eq!(r.advance(4000), 0);
        assert_eq!(r.head(), Position::ORIGIN);

        assert_eq!(r.handle_input(InputEvent::Key(DirectionKey::D)), Some(Direction::Right));
        assert_eq!(r.status(), RunStatus::Running);
        assert!(r.scheduler().is_armed());
    }

    #[test]
    fn ticks_move_head_at_cadence() {
        let mut r = run();
        r.handle_input(InputEvent::Key(DirectionKey::W));
        assert_eq!(r.advance(399), 0);
        assert_eq!(r.advance(1), 1);
        assert_eq!(r.head(), Position::new(0, 30));
        assert_eq!(r.advance(800), 2);
        assert_eq!(r.head(), Position::new(0, 90));
    }

    #[test]
    fn leaving_playfield_kills_once() {
        let mut r = run();
        r.handle_input(InputEvent::Key(DirectionKey::ArrowRight));
        // 5 tiles fit (x = 150), the 6th leaves.
        assert_eq!(r.advance(400 * 5), 5);
        assert!(r.is_alive());
        assert_eq!(r.advance(400 * 3), 1);
        assert_eq!(r.status(), RunStatus::Dead);
        assert!(r.keeper().dead());
        assert_eq!(r.advance(4000), 0);
    }

    #[test]
    fn dead_run_ignores_events() {
        let mut r = run();
        r.handle_input(InputEvent::Key(DirectionKey::ArrowRight));
        r.advance(400 * 6);
        assert!(!r.is_alive());
        assert_eq!(r.on_consume(ColorId::ALL[0]), ConsumeOutcome::Ignored);
        assert_eq!(r.on_bomb_trigger(), 0);
        assert!(r.handle_input(InputEvent::Key(DirectionKey::W)).is_none());
    }

    #[test]
    fn keeper_can_end_round() {
        let mut r = SnakeRun::new(
            SnakeConfig::default(),
            NullRenderer,
            ScoreBoard::new().with_target_points(0),
        );
        r.handle_input(InputEvent::Key(DirectionKey::W));
        assert_eq!(r.advance(400 * 3), 1);
        assert_eq!(r.status(), RunStatus::RoundOver);
        assert!(!r.keeper().dead());
    }
}
