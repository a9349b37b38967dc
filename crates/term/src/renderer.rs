//! TerminalRenderer: pushes framebuffers out through crossterm.
//!
//! The output is any `Write`; the binary uses stdout, tests capture into a
//! `Vec<u8>`. A frame is repainted in full after `invalidate` or a size
//! change. Otherwise only the runs of cells that differ from the frame on
//! screen are sent.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// What the terminal currently shows; `None` forces a full repaint.
    front: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            front: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Raw mode plus the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize, for instance).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Paint `fb`, then hand the previous front buffer back through `fb`.
    ///
    /// The caller renders the next frame into whatever `fb` now holds; the
    /// view resizes it as needed, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut pen = Pen::default();
        match &self.front {
            Some(front) if front.width() == fb.width() && front.height() == fb.height() => {
                paint_changes(front, fb, &mut pen, &mut self.buf)?;
            }
            _ => {
                self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
                paint_all(fb, &mut pen, &mut self.buf)?;
            }
        }
        pen.finish(&mut self.buf)?;
        self.flush_buf()?;

        match self.front.as_mut() {
            Some(front) => std::mem::swap(front, fb),
            None => self.front = Some(std::mem::replace(fb, FrameBuffer::new(0, 0))),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Emits cells, switching colours only when the style changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn paint(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                queue_style(out, cell.style)?;
                self.style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> + '_ {
    fb.cells().chunks(usize::from(fb.width()).max(1))
}

fn paint_all(fb: &FrameBuffer, pen: &mut Pen, out: &mut Vec<u8>) -> Result<()> {
    for (y, row) in rows(fb).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        pen.paint(out, row)?;
    }
    Ok(())
}

/// Both frames must have the same size.
fn paint_changes(
    front: &FrameBuffer,
    back: &FrameBuffer,
    pen: &mut Pen,
    out: &mut Vec<u8>,
) -> Result<()> {
    for (y, (old, new)) in rows(front).zip(rows(back)).enumerate() {
        for run in changed_runs(old, new) {
            out.queue(cursor::MoveTo(run.start as u16, y as u16))?;
            pen.paint(out, &new[run])?;
        }
    }
    Ok(())
}

/// Maximal column ranges where `old` and `new` differ.
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let len = old.len().min(new.len());
    let differs = move |x: usize| old[x] != new[x];
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < len && !differs(x) {
            x += 1;
        }
        if x == len {
            return None;
        }
        let start = x;
        while x < len && differs(x) {
            x += 1;
        }
        Some(start..x)
    })
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
