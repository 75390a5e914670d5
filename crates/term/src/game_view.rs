//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Tiles are drawn as a block of `cell_w` x `cell_h` terminal cells with the
//! emoji centred. The block background darkens with the tile's total skin
//! tone, so heavily merged tiles stand out. Cells touched by the last move
//! are highlighted until the next move.

use crate::core::{parse, CombinationTable, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{MoveEvent, Position};

/// Background of an untoned tile
pub const TILE_BASE: Rgb = Rgb::new(238, 228, 218);

/// Background subtracted per level of skin tone
pub const TONE_SHADE_STEP: u8 = 12;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const MERGE_BG: Rgb = Rgb::new(246, 204, 110);
const SPAWN_BG: Rgb = Rgb::new(200, 232, 200);

/// Terminal viewport dimensions.
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

/// How a cell was touched by the last move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    Merged,
    Spawned,
    Annihilated,
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    table: CombinationTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 leaves a margin around a two-column emoji and keeps cells
        // roughly square on typical terminal fonts.
        Self::new(6, 3)
    }
}

impl GameView {
    /// `cell_w` is clamped to at least 2 so an emoji always fits.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            table: CombinationTable::standard(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board for an `n` x `n` game
    pub fn frame_size(&self, n: usize) -> (u16, u16) {
        let n = n as u16;
        (n * self.cell_w + 2, n * self.cell_h + 2)
    }

    /// Render the current game state into an existing framebuffer.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_events(snap, &[], viewport, fb);
    }

    /// Render and highlight the cells touched by `events` (the last move).
    pub fn render_into_with_events(
        &self,
        snap: &GameSnapshot,
        events: &[MoveEvent],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(snap.size);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Background for play area.
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            bg,
        );

        // Border.
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..snap.size {
            for x in 0..snap.size {
                let pos = Position::new(x, y);
                let highlight = highlight_at(events, pos);
                match snap.cell(x, y) {
                    Some(value) => self.draw_tile(fb, start_x, start_y, pos, value, highlight),
                    None => self.draw_empty_cell(fb, start_x, start_y, pos, highlight),
                }
            }
        }

        // Side panel (score/best/level/keys).
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.finished {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_events(
        &self,
        snap: &GameSnapshot,
        events: &[MoveEvent],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_events(snap, events, viewport, &mut fb);
        fb
    }

    /// Background for a tile value: lighter for fresh tiles, darker with tone.
    pub fn tile_background(&self, value: &str) -> Rgb {
        let tone = parse(value, &self.table)
            .map(|v| v.total_intensity())
            .unwrap_or(0);
        let shade = tone.saturating_mul(u32::from(TONE_SHADE_STEP)).min(255) as u8;
        TILE_BASE.darken(shade)
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

    fn draw_empty_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        highlight: Option<Highlight>,
    ) {
        let (ch, fg) = match highlight {
            Some(Highlight::Annihilated) => ('✶', Rgb::new(230, 90, 80)),
            _ => ('·', Rgb::new(90, 90, 100)),
        };
        let style = CellStyle {
            fg,
            bg: BOARD_BG,
            bold: false,
            dim: highlight.is_none(),
        };
        let (cx, cy) = self.cell_center(start_x, start_y, pos);
        fb.put_char(cx, cy, ch, style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        value: &str,
        highlight: Option<Highlight>,
    ) {
        let bg = match highlight {
            Some(Highlight::Merged) => MERGE_BG,
            Some(Highlight::Spawned) => SPAWN_BG,
            _ => self.tile_background(value),
        };
        let style = CellStyle {
            fg: Rgb::new(20, 20, 20),
            bg,
            bold: highlight.is_some(),
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, pos, ' ', style);
        let (cx, cy) = self.cell_center(start_x, start_y, pos);
        fb.put_wide(cx, cy, value, style);
    }

    /// Left column and middle row of the emoji inside a board cell
    fn cell_center(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        let px = start_x + 1 + pos.x as u16 * self.cell_w;
        let py = start_y + 1 + pos.y as u16 * self.cell_h;
        (px + (self.cell_w - 2) / 2, py + self.cell_h / 2)
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + pos.x as u16 * self.cell_w;
        let py = start_y + 1 + pos.y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("LEVEL", snap.level),
            ("MOVES", snap.moves),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, number, value);
            y = y.saturating_add(2);
        }

        if panel_w < 16 {
            return;
        }
        let dim = CellStyle { dim: true, ..value };
        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for line in [
            "←↑↓→ move",
            "wasd move",
            "drag swipe",
            "r    restart",
            "q    quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
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
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Strongest highlight the last move left on `pos`
fn highlight_at(events: &[MoveEvent], pos: Position) -> Option<Highlight> {
    events.iter().rev().find_map(|event| match event {
        MoveEvent::MergeInto { to, .. } if *to == pos => Some(Highlight::Merged),
        MoveEvent::Spawn { at, .. } if *at == pos => Some(Highlight::Spawned),
        MoveEvent::Annihilate { first, second, .. } if *first == pos || *second == pos => {
            Some(Highlight::Annihilated)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_darkens_tile_background() {
        let view = GameView::default();
        let light = view.tile_background("\u{1FAF1}");
        let dark = view.tile_background("\u{1FAF1}\u{1F3FF}");
        assert_eq!(light, TILE_BASE.darken(TONE_SHADE_STEP));
        assert_eq!(dark, TILE_BASE.darken(TONE_SHADE_STEP * 5));
        assert_eq!(view.tile_background("\u{1F527}"), TILE_BASE);
    }

    #[test]
    fn test_last_event_on_a_cell_wins() {
        let p = Position::new(1, 1);
        let events = [
            MoveEvent::Annihilate {
                first: p,
                second: Position::new(2, 1),
                key: "1FAF1".to_string(),
            },
            MoveEvent::Spawn {
                at: p,
                value: "\u{1FAF2}".to_string(),
            },
        ];
        assert_eq!(highlight_at(&events, p), Some(Highlight::Spawned));
        assert_eq!(
            highlight_at(&events, Position::new(2, 1)),
            Some(Highlight::Annihilated)
        );
        assert_eq!(highlight_at(&events, Position::new(0, 0)), None);
    }
}
