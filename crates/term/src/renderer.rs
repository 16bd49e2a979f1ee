//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! Frames are encoded into a reusable byte buffer and written with a single
//! flush. After the first frame only rows that differ from the previous frame
//! are touched, and inside those rows only the changed runs. Colors and
//! weight are re-sent only when they change.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Unchanged cells allowed inside one run before it is split in two.
///
/// Reprinting a few cells is shorter than the cursor move that skipping them needs.
const MERGE_GAP: usize = 3;

/// What one encoded frame touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Whole screen was cleared and redrawn.
    pub full: bool,
    pub runs: u32,
    pub cells: u32,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen.
    shown: FrameBuffer,
    needs_full: bool,
    buf: Vec<u8>,
    stats: FrameStats,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: FrameBuffer::new(0, 0),
            needs_full: true,
            buf: Vec::with_capacity(32 * 1024),
            stats: FrameStats::default(),
        }
    }

    /// Raw mode and the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::DisableLineWrap)?
            .queue(cursor::Hide)?;
        self.write_buf()
    }

    /// Undo everything `enter` changed.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(cursor::Show)?
            .queue(terminal::EnableLineWrap)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw the whole screen on the next frame, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Counters for the most recent `draw_swap`.
    pub fn last_stats(&self) -> FrameStats {
        self.stats
    }

    /// Show `fb`, then hand the previously shown frame back through `fb`.
    ///
    /// The caller redraws into the returned buffer, so steady-state frames
    /// neither clone nor allocate.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let prev = (!self.needs_full).then_some(&self.shown);
        self.stats = encode_frame(prev, fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.write_buf()?;
        }
        std::mem::swap(&mut self.shown, fb);
        self.needs_full = false;
        Ok(())
    }

    fn write_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn the screen showing `prev` into `next`.
///
/// `None`, or a `prev` of another size, means the screen contents are
/// unknown: it is cleared and every row is written.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<FrameStats> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    let mut stats = FrameStats {
        full: prev.is_none(),
        ..FrameStats::default()
    };
    let mut pen = Pen::default();

    if stats.full {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    for y in 0..next.height() {
        let Some(row) = next.row(y) else { break };
        match prev.and_then(|p| p.row(y)) {
            None => {
                pen.write_run(out, 0, y, row)?;
                stats.runs += 1;
                stats.cells += row.len() as u32;
            }
            Some(old) if old == row => {}
            Some(old) => {
                for_each_run(old, row, |start, len| {
                    pen.write_run(out, start as u16, y, &row[start..start + len])?;
                    stats.runs += 1;
                    stats.cells += len as u32;
                    Ok(())
                })?;
            }
        }
    }

    if pen.style.is_some() {
        out.queue(SetAttribute(Attribute::Reset))?.queue(ResetColor)?;
    }
    Ok(stats)
}

/// Call `f(start, len)` for each span of `next` that differs from `old`.
///
/// Spans separated by at most `MERGE_GAP` equal cells are reported as one.
fn for_each_run(
    old: &[Cell],
    next: &[Cell],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let w = next.len().min(old.len());
    let mut x = 0;
    while x < w {
        if old[x] == next[x] {
            x += 1;
            continue;
        }
        let start = x;
        let mut end = x + 1;
        x += 1;
        while x < w && x - end <= MERGE_GAP {
            if old[x] != next[x] {
                end = x + 1;
            }
            x += 1;
        }
        f(start, end - start)?;
    }
    Ok(())
}

/// Cursor position and style the terminal is known to have.
#[derive(Default)]
struct Pen {
    at: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl Pen {
    fn write_run(&mut self, out: &mut Vec<u8>, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        if self.at != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        for cell in cells {
            self.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        self.at = Some((x.saturating_add(cells.len() as u16), y));
        Ok(())
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let old = self.style;
        if old.is_some_and(|o| o == style) {
            return Ok(());
        }
        if old.map(|o| (o.bold, o.dim)) != Some((style.bold, style.dim)) {
            // NormalIntensity clears both bold and dim.
            out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if old.map(|o| o.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(term_color(style.fg)))?;
        }
        if old.map(|o| o.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(term_color(style.bg)))?;
        }
        self.style = Some(style);
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
