//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::Matrix;
use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Phase};

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

/// Persistent player records shown beside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordsView {
    pub best_score: u32,
    pub games_played: u32,
    /// Name of the achievement unlocked by the game that just ended.
    pub unlocked: Option<&'static str>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const EMPTY_CELL: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::BLACK).bold();

/// Shown on the game-over screen when the game unlocked nothing.
pub const ENCOURAGEMENTS: [&str; 8] = [
    "KEEP GOING",
    "EVERY GAME COUNTS",
    "THE BLOCKS NEED YOU",
    "PRACTICE PAYS OFF",
    "NEXT ONE IS BETTER",
    "NEVER GIVE UP",
    "REFLEXES IMPROVING",
    "SHARPER EVERY GAME",
];

/// Picks a line that stays fixed for the rest of one game over.
fn encouragement(snap: &GameSnapshot) -> &'static str {
    let i = snap.episode_id.wrapping_add(snap.pieces_locked) as usize;
    ENCOURAGEMENTS[i % ENCOURAGEMENTS.len()]
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_records(snap, None, viewport, fb);
    }

    pub fn render_into_with_records(
        &self,
        snap: &GameSnapshot,
        records: Option<&RecordsView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_w = snap.width as u16;
        let board_h = snap.height as u16;
        let board_px_w = board_w * self.cell_w;
        let board_px_h = board_h * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.draw_box(start_x, start_y, frame_w, frame_h, BORDER);

        // Locked board cells.
        for y in 0..board_h {
            for x in 0..board_w {
                match snap.cell(x as usize, y as usize) {
                    Some(kind) => {
                        self.draw_board_cell(fb, start_x, start_y, x, y, kind.color(), false)
                    }
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Current piece; rows above the board are not drawn.
        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if x >= 0 && (x as u16) < board_w && y >= 0 && (y as u16) < board_h {
                    self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, active.color, true);
                }
            }
        }

        // Side panel.
        self.draw_side_panel(fb, snap, records, viewport, start_x, start_y, frame_w);

        let mid_y = start_y.saturating_add(frame_h / 2);
        match snap.phase {
            Phase::Ready => {
                fb.put_str_centered(start_x, frame_w, mid_y, "READY", OVERLAY);
                fb.put_str_centered(start_x, frame_w, mid_y + 1, "ENTER TO START", OVERLAY);
            }
            Phase::Paused => {
                fb.put_str_centered(start_x, frame_w, mid_y, "PAUSED", OVERLAY);
            }
            Phase::GameOver => {
                fb.put_str_centered(start_x, frame_w, mid_y.saturating_sub(1), "GAME OVER", OVERLAY);
                draw_final_score(fb, start_x, mid_y, frame_w, snap.score);
                match records.and_then(|r| r.unlocked) {
                    Some(name) => fb.put_str_centered(start_x, frame_w, mid_y + 1, name, OVERLAY),
                    None => fb.put_str_centered(
                        start_x,
                        frame_w,
                        mid_y + 1,
                        encouragement(snap),
                        VALUE,
                    ),
                };
                fb.put_str_centered(start_x, frame_w, mid_y + 2, "R TO RESTART", OVERLAY);
            }
            Phase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_records(
        &self,
        snap: &GameSnapshot,
        records: Option<&RecordsView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_records(snap, records, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', EMPTY_CELL);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: Color,
        bold: bool,
    ) {
        let style = CellStyle {
            bold,
            ..CellStyle::new(color.into(), PLAYFIELD_BG)
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Draw a piece matrix with its top-left at (x, y), one board cell per
    /// `cell_w` columns. Returns the number of rows used.
    fn draw_matrix(&self, fb: &mut FrameBuffer, x: u16, y: u16, matrix: &Matrix, color: Color) -> u16 {
        let style = CellStyle::new(color.into(), Rgb::BLACK).bold();
        let mut rows_used = 0;
        for (c, r) in matrix.cells() {
            let px = x.saturating_add(c as u16 * self.cell_w);
            fb.fill_rect(px, y.saturating_add(r as u16), self.cell_w, 1, '█', style);
            rows_used = rows_used.max(r as u16 + 1);
        }
        rows_used
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        records: Option<&RecordsView>,
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

        let (label, value, dim) = (LABEL, VALUE, VALUE.dim());

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        fb.put_str(panel_x + 7, y, "MAX", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.combo, value);
        fb.put_u32(panel_x + 7, y, snap.max_combo, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_duration_ms(panel_x, y, snap.play_time_ms, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let rows = self.draw_matrix(fb, panel_x, y, &next.matrix, next.color);
            y = y.saturating_add(rows.max(1));
        }
        y = y.saturating_add(1);

        if y >= viewport.height {
            return;
        }
        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        match records {
            Some(r) => {
                fb.put_u32(panel_x, y, r.best_score.max(snap.score), value);
                if panel_w >= 16 {
                    let w = fb.put_u32(panel_x + 8, y, r.games_played, dim);
                    fb.put_str(panel_x + 9 + w, y, "games", dim);
                }
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
    }
}

/// "SCORE n", centered over the board frame.
fn draw_final_score(fb: &mut FrameBuffer, start_x: u16, y: u16, frame_w: u16, score: u32) {
    let text_w = 6 + decimal_width(score as u64);
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let w = fb.put_str(x, y, "SCORE ", OVERLAY);
    fb.put_u32(x + w, y, score, OVERLAY);
}

fn decimal_width(mut v: u64) -> u16 {
    let mut w = 1;
    while v >= 10 {
        v /= 10;
        w += 1;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::PieceKind;

    #[test]
    fn decimal_width_counts_digits() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(1200), 4);
    }

    #[test]
    fn next_preview_uses_piece_color() {
        let mut state = GameState::with_seed(1);
        state.start();
        let mut snap = state.snapshot();
        snap.next = Some(PieceKind::O.into());

        let fb = GameView::default().render(&snap, Viewport::new(60, 22));
        let o = Rgb::from(PieceKind::O.color());
        let count = fb
            .cells()
            .iter()
            .filter(|c| c.ch == '█' && c.style.fg == o && c.style.bg == Rgb::new(0, 0, 0))
            .count();
        // 2x2 matrix, two columns per cell.
        assert_eq!(count, 8);
    }

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn encouragement_fills_the_unlock_line_when_nothing_unlocked() {
        let mut snap = GameState::with_seed(1).snapshot();
        snap.phase = Phase::GameOver;
        snap.episode_id = 3;
        snap.pieces_locked = 2;
        let records = RecordsView::default();

        let fb = GameView::default().render_with_records(&snap, Some(&records), Viewport::new(22, 22));
        // Frame is 22 rows tall, so mid_y is 11 and the line sits below it.
        assert!(row_text(&fb, 12).contains(ENCOURAGEMENTS[5]));

        let unlocked = RecordsView {
            unlocked: Some("Combo Master"),
            ..records
        };
        let fb = GameView::default().render_with_records(&snap, Some(&unlocked), Viewport::new(22, 22));
        assert!(row_text(&fb, 12).contains("Combo Master"));
        assert!(ENCOURAGEMENTS.iter().all(|line| !row_text(&fb, 12).contains(line)));
    }

    #[test]
    fn encouragements_fit_the_standard_frame() {
        // 10 cells, two columns each.
        assert!(ENCOURAGEMENTS.iter().all(|line| line.chars().count() <= 20));
    }
}
