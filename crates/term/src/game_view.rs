//! GameView: paints a [`Scene`] onto a framebuffer.
//!
//! Pure, no I/O. World positions are tile-quantized around the origin with `y`
//! growing upward; the view flips them so row 0 is the top edge of the field.

use crate::core::{Playfield, RunStatus};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::sprites::SpriteLayer;
use crate::types::{ColorId, Position, TILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Numbers for the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView {
    pub points: u64,
    pub multiplier: u32,
    pub length: usize,
    pub matches: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGlyph {
    Ball(ColorId),
    Bomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView {
    pub position: Position,
    pub glyph: ItemGlyph,
}

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub sprites: &'a SpriteLayer,
    pub status: RunStatus,
    pub items: &'a [ItemView],
    pub hud: HudView,
}

const FIELD_BG: Rgb = Rgb::new(24, 28, 36);
const BLACK: Rgb = Rgb::new(0, 0, 0);

pub fn palette(color: ColorId) -> Rgb {
    match color.index() {
        0 => Rgb::new(230, 80, 80),
        1 => Rgb::new(100, 220, 120),
        2 => Rgb::new(90, 140, 240),
        _ => Rgb::new(240, 210, 80),
    }
}

fn head_glyph(angle: u16) -> char {
    match angle {
        0 => '▲',
        90 => '◀',
        180 => '▼',
        270 => '▶',
        _ => '●',
    }
}

pub struct GameView {
    /// Columns per tile.
    cell_w: u16,
    /// Rows per tile.
    cell_h: u16,
    anchor_y: AnchorY,
    tile_size: i32,
    playfield: Playfield,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            tile_size: TILE_SIZE,
            playfield: Playfield::DEFAULT,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_field(mut self, tile_size: i32, playfield: Playfield) -> Self {
        self.tile_size = tile_size.max(1);
        self.playfield = playfield;
        self
    }

    /// Tiles across and down the field.
    pub fn grid_size(&self) -> (u16, u16) {
        let cols = 2 * self.playfield.tile_columns(self.tile_size) + 1;
        let rows = 2 * self.playfield.tile_rows(self.tile_size) + 1;
        (cols as u16, rows as u16)
    }

    /// Framed size in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        let (cols, rows) = self.grid_size();
        (cols * self.cell_w + 2, rows * self.cell_h + 2)
    }

    /// Grid cell of a world position, `None` off the field.
    pub fn tile_cell(&self, pos: Position) -> Option<(u16, u16)> {
        let half_c = self.playfield.tile_columns(self.tile_size);
        let half_r = self.playfield.tile_rows(self.tile_size);
        let col = pos.x.div_euclid(self.tile_size) + half_c;
        let row = half_r - pos.y.div_euclid(self.tile_size);
        if (0..=2 * half_c).contains(&col) && (0..=2 * half_r).contains(&row) {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }

    /// Allocation-free hot path; reuse `fb` across frames.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (cols, rows) = self.grid_size();
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let dot = CellStyle::plain(Rgb::new(70, 74, 86), FIELD_BG).dim();
        for row in 0..rows {
            for col in 0..cols {
                self.fill_tile(fb, start_x, start_y, col, row, '·', dot);
            }
        }
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), BLACK),
        );

        for item in scene.items {
            let Some((col, row)) = self.tile_cell(item.position) else {
                continue;
            };
            let (ch, fg) = match item.glyph {
                ItemGlyph::Ball(color) => ('●', palette(color)),
                ItemGlyph::Bomb => ('✸', Rgb::new(255, 120, 40)),
            };
            self.fill_tile(fb, start_x, start_y, col, row, ch, CellStyle::plain(fg, FIELD_BG).bold());
        }

        for sprite in scene.sprites.visible() {
            if let Some((col, row)) = self.tile_cell(sprite.position) {
                let style = CellStyle::plain(palette(sprite.color), FIELD_BG);
                self.fill_tile(fb, start_x, start_y, col, row, '█', style);
            }
        }

        if let Some((col, row)) = self.tile_cell(scene.sprites.head()) {
            let style = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(60, 64, 80)).bold();
            self.fill_tile(fb, start_x, start_y, col, row, ' ', style);
            let (px, py) = self.tile_origin(start_x, start_y, col, row);
            fb.put_char(px, py, head_glyph(scene.sprites.angle()), style);
        }

        self.draw_side_panel(fb, &scene.hud, viewport, start_x, start_y, frame_w);

        let overlay = match scene.status {
            RunStatus::Waiting => Some("READY"),
            RunStatus::Running => None,
            RunStatus::Dead => Some("GAME OVER"),
            RunStatus::RoundOver => Some("ROUND OVER"),
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn tile_origin(&self, start_x: u16, start_y: u16, col: u16, row: u16) -> (u16, u16) {
        (
            start_x + 1 + col * self.cell_w,
            start_y + 1 + row * self.cell_h,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.tile_origin(start_x, start_y, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &HudView,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), BLACK);

        let rows: [(&str, u64); 4] = [
            ("SCORE", hud.points),
            ("MULT", hud.multiplier as u64),
            ("LENGTH", hud.length as u64),
            ("MATCHES", hud.matches as u64),
        ];
        let mut y = start_y;
        for (name, n) in rows {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            if name == "MULT" {
                let x = fb.put_str(panel_x, y, "x", value);
                fb.put_u64(x, y, n, value);
            } else {
                fb.put_u64(panel_x, y, n, value);
            }
            y = y.saturating_add(2);
        }

        let hint = value.dim();
        fb.put_str(panel_x, y, "WASD/arrows", hint);
        fb.put_str(panel_x, y.saturating_add(1), "drag to swipe", hint);
        fb.put_str(panel_x, y.saturating_add(2), "q quit  r retry", hint);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, CellStyle::plain(Rgb::new(255, 255, 255), BLACK).bold());
    }
}
