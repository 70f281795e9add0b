//! Sprite layer: the terminal's side of the segment lifecycle.

use crate::core::SegmentRenderer;
use crate::types::{ColorId, Position};

/// Slot in a [`SpriteLayer`]. Deliberately not `Clone`: the id handed out by
/// `place_segment` is moved back into `release_segment`, so a sprite cannot be
/// released twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(usize);

impl SpriteId {
    pub fn slot(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub position: Position,
    pub color: ColorId,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SpriteLayer {
    slots: Vec<Option<Sprite>>,
    free: Vec<usize>,
    head: Position,
    angle: u16,
    placed: u64,
    released: u64,
}

impl SpriteLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn get(&self, id: &SpriteId) -> Option<&Sprite> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Sprites currently allocated, hidden ones included.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Sprite> + '_ {
        self.slots.iter().flatten().filter(|s| s.visible)
    }

    pub fn placed_total(&self) -> u64 {
        self.placed
    }

    pub fn released_total(&self) -> u64 {
        self.released
    }

    fn slot_mut(&mut self, id: &SpriteId) -> Option<&mut Sprite> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }
}

impl SegmentRenderer for SpriteLayer {
    type Handle = SpriteId;

    fn place_segment(&mut self, position: Position, color: ColorId) -> SpriteId {
        let sprite = Some(Sprite {
            position,
            color,
            visible: false,
        });
        self.placed += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = sprite;
                SpriteId(slot)
            }
            None => {
                self.slots.push(sprite);
                SpriteId(self.slots.len() - 1)
            }
        }
    }

    fn release_segment(&mut self, id: SpriteId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id.0);
                self.released += 1;
            }
        }
    }

    fn reveal_segment(&mut self, id: &SpriteId) {
        if let Some(sprite) = self.slot_mut(id) {
            sprite.visible = true;
        }
    }

    fn reposition_segment(&mut self, id: &SpriteId, position: Position) {
        if let Some(sprite) = self.slot_mut(id) {
            sprite.position = position;
        }
    }

    fn set_head(&mut self, position: Position, angle: u16) {
        self.head = position;
        self.angle = angle;
    }
}
