//! GameView: maps a `core::GameInfo` snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameInfo;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellLabel, GameState, BOARD_HEIGHT, BOARD_WIDTH, PIECE_GRID_SIZE};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for either game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    title: &'static str,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            title: "",
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

    /// Heading printed at the top of the side panel
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, info: &GameInfo, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in info.board.iter().enumerate() {
            for (x, &label) in row.iter().enumerate() {
                let px = start_x + 1 + (x as u16) * self.cell_w;
                let py = start_y + 1 + (y as u16) * self.cell_h;
                self.draw_cell(fb, px, py, label);
            }
        }

        self.draw_side_panel(fb, info, viewport, start_x, start_y, frame_w);

        if let Some(text) = overlay_text(info.state) {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, info: &GameInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(info, viewport, &mut fb);
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

    /// One board or preview cell at terminal position (px, py)
    fn draw_cell(&self, fb: &mut FrameBuffer, px: u16, py: u16, label: CellLabel) {
        let (ch, style) = cell_glyph(label);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        info: &GameInfo,
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

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        if !self.title.is_empty() {
            fb.put_str(panel_x, y, self.title, label);
            y = y.saturating_add(2);
        }

        for (name, v) in [
            ("SCORE", info.score),
            ("HIGH", info.high_score),
            ("LEVEL", info.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, info.step_interval_ms, value);
        fb.put_str(end, y, "ms", value);
        y = y.saturating_add(2);

        if info.has_next() {
            fb.put_str(panel_x, y, "NEXT", label);
            y = y.saturating_add(1);
            for (dy, row) in info.next.iter().enumerate() {
                for (dx, &cell) in row.iter().enumerate() {
                    let px = panel_x + (dx as u16) * self.cell_w;
                    let py = y + (dy as u16) * self.cell_h;
                    if cell.is_empty() {
                        continue;
                    }
                    self.draw_cell(fb, px, py, cell);
                }
            }
            y = y.saturating_add((PIECE_GRID_SIZE as u16) * self.cell_h + 1);
        }

        for line in state_hints(info.state) {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
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
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn cell_glyph(label: CellLabel) -> (char, CellStyle) {
    match label {
        CellLabel::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim()),
        CellLabel::Head => ('█', CellStyle::new(Rgb::new(140, 240, 120), PLAYFIELD_BG).bold()),
        CellLabel::Body => ('█', CellStyle::new(Rgb::new(80, 170, 220), PLAYFIELD_BG)),
        CellLabel::Food => ('●', CellStyle::new(Rgb::new(230, 80, 80), PLAYFIELD_BG).bold()),
    }
}

fn overlay_text(state: GameState) -> Option<&'static str> {
    match state {
        GameState::StartScreen => Some("PRESS S"),
        GameState::Paused => Some("PAUSED"),
        GameState::WonGameOver => Some("YOU WIN!"),
        GameState::LostGameOver => Some("GAME OVER"),
        GameState::Running | GameState::Terminated => None,
    }
}

fn state_hints(state: GameState) -> &'static [&'static str] {
    match state {
        GameState::StartScreen => &["S start", "Q quit"],
        GameState::Paused => &["P resume", "S restart", "Q quit"],
        GameState::WonGameOver | GameState::LostGameOver => &["S restart", "Q quit"],
        GameState::Running => &["P pause", "Q quit"],
        GameState::Terminated => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn every_label_has_a_distinct_look() {
        let glyphs: Vec<_> = [CellLabel::Empty, CellLabel::Head, CellLabel::Body, CellLabel::Food]
            .into_iter()
            .map(cell_glyph)
            .collect();
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn overlay_follows_state() {
        let view = GameView::default();
        let mut info = GameInfo::default();

        let fb = view.render(&info, Viewport::new(22, 22));
        assert!(screen_text(&fb).contains("PRESS S"));

        info.state = GameState::Running;
        let fb = view.render(&info, Viewport::new(22, 22));
        assert!(!screen_text(&fb).contains("PRESS S"));

        info.state = GameState::WonGameOver;
        let fb = view.render(&info, Viewport::new(22, 22));
        assert!(screen_text(&fb).contains("YOU WIN!"));
    }

    #[test]
    fn preview_is_drawn_only_when_present() {
        let view = GameView::default();
        let mut info = GameInfo::default();
        info.state = GameState::Running;

        let fb = view.render(&info, Viewport::new(60, 22));
        assert!(!screen_text(&fb).contains("NEXT"));

        info.next[1] = [CellLabel::Body; 4];
        let fb = view.render(&info, Viewport::new(60, 22));
        let text = screen_text(&fb);
        assert!(text.contains("NEXT"));
        assert!(text.contains("████████"));
    }
}
