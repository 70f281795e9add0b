//! A session drives one run at a time together with its items.
//!
//! The core run knows nothing about items; it only exposes `on_consume` and
//! `on_bomb_trigger`. The session advances the run tick by tick and, after each
//! tick, checks what the head landed on.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::core::{ChainSnapshot, RunStatus, ScoreBoard, SegmentRenderer, SnakeRun};
use crate::items::{Item, ItemField, ItemKind};
use crate::types::{Direction, InputEvent};

/// Between-tick view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub chain: ChainSnapshot,
    pub points: u64,
    pub multiplier: u32,
    pub items: Vec<Item>,
}

pub struct Session<R: SegmentRenderer> {
    config: RunConfig,
    run: SnakeRun<R, ScoreBoard>,
    items: ItemField,
    rounds: u32,
}

impl<R: SegmentRenderer> Session<R> {
    pub fn new(config: RunConfig, renderer: R) -> Self {
        let items = ItemField::new(
            config.seed,
            config.snake.tile_size,
            config.snake.playfield,
            config.bomb_every,
        );
        let run = SnakeRun::new(config.snake, renderer, score_board(&config));
        let mut session = Self {
            config,
            run,
            items,
            rounds: 1,
        };
        session.refill_items();
        session
    }

    /// Replace the finished run with a fresh one. Item placement continues
    /// from where the previous round left the RNG.
    pub fn restart(&mut self, renderer: R) {
        self.run = SnakeRun::new(self.config.snake, renderer, score_board(&self.config));
        self.items.reset();
        self.rounds += 1;
        self.refill_items();
        info!(round = self.rounds, "session restarted");
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run(&self) -> &SnakeRun<R, ScoreBoard> {
        &self.run
    }

    pub fn renderer(&self) -> &R {
        self.run.renderer()
    }

    pub fn score(&self) -> &ScoreBoard {
        self.run.keeper()
    }

    pub fn items(&self) -> &ItemField {
        &self.items
    }

    pub fn status(&self) -> RunStatus {
        self.run.status()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<Direction> {
        self.run.handle_input(event)
    }

    pub fn time_until_next_tick_ms(&self) -> Option<u32> {
        self.run.time_until_next_tick_ms()
    }

    /// Feed elapsed time, one tick at a time so items are checked between
    /// ticks. Returns the number of ticks that ran.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut remaining = elapsed_ms;
        let mut ran = 0;
        while let Some(until) = self.run.time_until_next_tick_ms() {
            if until > remaining {
                break;
            }
            remaining -= until;
            let ticks = self.run.advance(until);
            ran += ticks;
            if ticks > 0 && self.run.is_alive() {
                self.after_tick();
            }
        }
        // Carry the leftover into the scheduler so cadence is kept.
        self.run.advance(remaining);
        ran
    }

    fn after_tick(&mut self) {
        let head = self.run.head();
        match self.items.take_at(head) {
            Some(ItemKind::Ball(color)) => {
                let outcome = self.run.on_consume(color);
                debug!(color = color.index(), ?outcome, "ball consumed");
            }
            Some(ItemKind::Bomb) => {
                let removed = self.run.on_bomb_trigger();
                debug!(removed, "bomb triggered");
            }
            None => {}
        }
        self.refill_items();
    }

    fn refill_items(&mut self) {
        let chain = self.run.chain();
        let head = chain.head();
        self.items
            .refill(|p| p == head || chain.positions().any(|q| q == p));
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.run.snapshot_into(&mut out.chain);
        out.points = self.score().points();
        out.multiplier = self.score().multiplier_value();
        out.items.clear();
        out.items.extend(self.items.items());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut out = SessionSnapshot {
            chain: ChainSnapshot::default(),
            points: 0,
            multiplier: 0,
            items: Vec::new(),
        };
        self.snapshot_into(&mut out);
        out
    }
}

fn score_board(config: &RunConfig) -> ScoreBoard {
    match config.target_points {
        Some(target) => ScoreBoard::new().with_target_points(target),
        None => ScoreBoard::new(),
    }
}
