//! Framebuffer: the grid of styled character cells one frame is drawn into.
//!
//! Drawing never allocates once the buffer has its size. Numbers are written
//! digit by digit rather than formatted, so the game view can redraw the side
//! panel every frame from the hot loop.

use crate::types::Color;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

/// Colors and weight of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Row-major grid of cells. Writes outside the grid are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    #[inline(always)]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` starting at (x, y). Returns the number of columns it occupies.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut w = 0u16;
        for ch in s.chars() {
            self.put_char(x.saturating_add(w), y, ch, style);
            w = w.saturating_add(1);
        }
        w
    }

    /// Write `s` centered inside the span `x..x + span`. Returns its left column.
    pub fn put_str_centered(&mut self, x: u16, span: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let text_w = s.chars().count().min(u16::MAX as usize) as u16;
        let left = x.saturating_add(span.saturating_sub(text_w) / 2);
        self.put_str(left, y, s, style);
        left
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Single-line box outline with its top-left corner at (x, y).
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x + w - 1;
        let bottom = y + h - 1;

        self.fill_rect(x + 1, y, w - 2, 1, '─', style);
        self.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
        self.fill_rect(x, y + 1, 1, h - 2, '│', style);
        self.fill_rect(right, y + 1, 1, h - 2, '│', style);

        self.put_char(x, y, '┌', style);
        self.put_char(right, y, '┐', style);
        self.put_char(x, bottom, '└', style);
        self.put_char(right, bottom, '┘', style);
    }

    /// Write `value` in decimal, left-padded with zeros to `min_digits`.
    ///
    /// Returns the number of columns written.
    pub fn put_u64_padded(
        &mut self,
        x: u16,
        y: u16,
        value: u64,
        min_digits: u16,
        style: CellStyle,
    ) -> u16 {
        // u64::MAX has 20 digits
        let mut digits = [b'0'; 20];
        let mut n = 0usize;
        let mut v = value;
        loop {
            digits[19 - n] = b'0' + (v % 10) as u8;
            n += 1;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        let n = n.max((min_digits as usize).min(digits.len()));

        for (i, &d) in digits[20 - n..].iter().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, d as char, style);
        }
        n as u16
    }

    pub fn put_u64(&mut self, x: u16, y: u16, value: u64, style: CellStyle) -> u16 {
        self.put_u64_padded(x, y, value, 1, style)
    }

    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        self.put_u64(x, y, value as u64, style)
    }

    /// Write milliseconds as `MM:SS`. Returns the number of columns written.
    pub fn put_duration_ms(&mut self, x: u16, y: u16, ms: u64, style: CellStyle) -> u16 {
        let secs = ms / 1000;
        let w = self.put_u64_padded(x, y, secs / 60, 2, style);
        self.put_char(x.saturating_add(w), y, ':', style);
        let w2 = self.put_u64_padded(x.saturating_add(w + 1), y, secs % 60, 2, style);
        w + 1 + w2
    }
}
