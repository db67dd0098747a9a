//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shapes::mask_rows;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{EndReason, GameStatus, PieceKind, BACKGROUND, BOARD_HEIGHT, BOARD_WIDTH};

const BLOCK: char = '█';
const EMPTY_DOT: char = '·';

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(20, 20, 28);

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

/// Lays out the well, the side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Outer size of the bordered well.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::plain(PANEL_BG, PANEL_BG).into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);
        self.draw_well(fb, snap, origin_x + 1, origin_y + 1);
        self.draw_side_panel(fb, snap, viewport, origin_x + frame_w + 2, origin_y);

        let overlay = match snap.status {
            GameStatus::Terminated(EndReason::ToppedOut) => Some("GAME OVER"),
            GameStatus::Terminated(EndReason::Quit) => Some("BYE"),
            GameStatus::Running if snap.paused => Some("PAUSED"),
            GameStatus::Running => None,
        };
        if let Some(text) = overlay {
            draw_centered(fb, origin_x, origin_y + frame_h / 2, frame_w, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, left: u16, top: u16) {
        let empty = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(70, 70, 80), WELL_BG)
        };
        for (y, row) in snap.grid.rows().iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                let px = left + x as u16 * self.cell_w;
                let py = top + y as u16;
                if color == BACKGROUND {
                    fb.fill_rect(px, py, self.cell_w, 1, ' ', empty);
                    fb.put_char(px, py, EMPTY_DOT, empty);
                } else {
                    fb.fill_rect(px, py, self.cell_w, 1, BLOCK, block_style(color));
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        top: u16,
    ) {
        if x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = top;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("PIECES", snap.pieces),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &number.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for &kind in &snap.next_queue {
            if y >= viewport.height {
                break;
            }
            y = self.draw_preview(fb, kind, x, y) + 1;
        }
    }

    /// Draw the rotation-0 shape of `kind`, trimmed to its filled rows.
    /// Returns the row below the preview.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) -> u16 {
        let style = block_style(kind.color());
        let mut row_y = y;
        for row in mask_rows(kind, 0) {
            if !row.iter().any(|&filled| filled) {
                continue;
            }
            for (col, &filled) in row.iter().enumerate() {
                if filled {
                    fb.fill_rect(x + col as u16 * self.cell_w, row_y, self.cell_w, 1, BLOCK, style);
                }
            }
            row_y += 1;
        }
        row_y
    }
}

fn block_style(color: Rgb) -> CellStyle {
    CellStyle::plain(color, WELL_BG)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::plain(Rgb::new(128, 128, 128), PANEL_BG);
    let right = x + w - 1;
    let bottom = y + h - 1;

    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x + w.saturating_sub(text_w) / 2, y, text, style);
}
