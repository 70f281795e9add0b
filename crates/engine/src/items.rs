//! Consumables on the playfield.
//!
//! There is at most one ball on the field at a time. Every `bomb_every`-th ball
//! spawn also drops a bomb if none is lying around. Both land on a random tile
//! that is not occupied by the head, a segment or the other item.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Playfield;
use crate::rng::SimpleRng;
use crate::types::{ColorId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Ball(ColorId),
    Bomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct ItemField {
    rng: SimpleRng,
    tile_size: i32,
    playfield: Playfield,
    bomb_every: u32,
    balls_spawned: u32,
    ball: Option<Item>,
    bomb: Option<Item>,
}

impl ItemField {
    pub fn new(seed: u32, tile_size: i32, playfield: Playfield, bomb_every: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            tile_size: tile_size.max(1),
            playfield,
            bomb_every,
            balls_spawned: 0,
            ball: None,
            bomb: None,
        }
    }

    pub fn ball(&self) -> Option<Item> {
        self.ball
    }

    pub fn bomb(&self) -> Option<Item> {
        self.bomb
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.ball.iter().chain(self.bomb.iter()).copied()
    }

    pub fn balls_spawned(&self) -> u32 {
        self.balls_spawned
    }

    /// Remove and return whatever lies on `pos`.
    pub fn take_at(&mut self, pos: Position) -> Option<ItemKind> {
        if self.ball.is_some_and(|i| i.position == pos) {
            return self.ball.take().map(|i| i.kind);
        }
        if self.bomb.is_some_and(|i| i.position == pos) {
            return self.bomb.take().map(|i| i.kind);
        }
        None
    }

    /// Drop everything and start spawning from scratch. The RNG keeps going.
    pub fn reset(&mut self) {
        self.ball = None;
        self.bomb = None;
        self.balls_spawned = 0;
    }

    /// Spawn a ball if the field has none. Returns whether anything spawned.
    pub fn refill(&mut self, occupied: impl Fn(Position) -> bool) -> bool {
        if self.ball.is_some() {
            return false;
        }

        let Some(position) = self.free_tile(&occupied) else {
            return false;
        };
        let Some(&color) = self.rng.pick(&ColorId::ALL) else {
            return false;
        };
        self.ball = Some(Item {
            kind: ItemKind::Ball(color),
            position,
        });
        self.balls_spawned += 1;
        debug!(x = position.x, y = position.y, color = color.index(), "ball spawned");

        let bomb_due = self.bomb_every > 0 && self.balls_spawned % self.bomb_every == 0;
        if bomb_due && self.bomb.is_none() {
            if let Some(position) = self.free_tile(&occupied) {
                self.bomb = Some(Item {
                    kind: ItemKind::Bomb,
                    position,
                });
                debug!(x = position.x, y = position.y, "bomb spawned");
            }
        }
        true
    }

    fn tiles(&self) -> impl Iterator<Item = Position> {
        let t = self.tile_size;
        let cols = self.playfield.tile_columns(t);
        let rows = self.playfield.tile_rows(t);
        (-rows..=rows).flat_map(move |r| (-cols..=cols).map(move |c| Position::new(c * t, r * t)))
    }

    fn is_free(&self, pos: Position, occupied: &impl Fn(Position) -> bool) -> bool {
        !occupied(pos) && !self.items().any(|i| i.position == pos)
    }

    fn free_tile(&mut self, occupied: &impl Fn(Position) -> bool) -> Option<Position> {
        let free = self.tiles().filter(|&p| self.is_free(p, occupied)).count();
        if free == 0 {
            return None;
        }
        let k = self.rng.next_range(free as u32) as usize;
        self.tiles().filter(|&p| self.is_free(p, occupied)).nth(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(bomb_every: u32) -> ItemField {
        ItemField::new(42, 30, Playfield::DEFAULT, bomb_every)
    }

    #[test]
    fn ball_lands_on_a_free_grid_tile() {
        let mut items = field(0);
        assert!(items.refill(|p| p == Position::ORIGIN));
        let ball = items.ball().unwrap();
        assert_ne!(ball.position, Position::ORIGIN);
        assert_eq!(ball.position.x % 30, 0);
        assert_eq!(ball.position.y % 30, 0);
        assert!(Playfield::DEFAULT.contains(ball.position));

        // Already has a ball.
        assert!(!items.refill(|_| false));
    }

    #[test]
    fn every_nth_spawn_adds_a_bomb() {
        let mut items = field(2);
        items.refill(|_| false);
        assert!(items.bomb().is_none());

        let pos = items.ball().unwrap().position;
        assert!(matches!(items.take_at(pos), Some(ItemKind::Ball(_))));
        items.refill(|_| false);
        let bomb = items.bomb().unwrap();
        assert_ne!(bomb.position, items.ball().unwrap().position);
        assert_eq!(items.take_at(bomb.position), Some(ItemKind::Bomb));
        assert!(items.bomb().is_none());
    }

    #[test]
    fn full_field_spawns_nothing() {
        let mut items = field(1);
        assert!(!items.refill(|_| true));
        assert!(items.ball().is_none());
    }

    #[test]
    fn only_free_tile_is_chosen() {
        let target = Position::new(-150, 240);
        let mut items = field(0);
        assert!(items.refill(|p| p != target));
        assert_eq!(items.ball().map(|b| b.position), Some(target));
    }

    #[test]
    fn take_at_empty_tile_is_none() {
        let mut items = field(0);
        assert_eq!(items.take_at(Position::ORIGIN), None);
    }

    #[test]
    fn ball_colors_cover_the_palette() {
        let mut items = field(0);
        let mut seen = [false; ColorId::ALL.len()];
        for _ in 0..64 {
            items.refill(|_| false);
            let ball = items.ball().unwrap();
            let Some(ItemKind::Ball(color)) = items.take_at(ball.position) else {
                panic!("expected a ball at {:?}", ball.position);
            };
            seen[color.index() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
