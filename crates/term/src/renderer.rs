//! TerminalRenderer: presents a framebuffer on a real terminal.
//!
//! Every frame is written in full inside a synchronized update, so the
//! terminal shows either the previous frame or the new one, never a mix.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use crate::fb::FrameBuffer;

/// Where finished frames go
pub trait DisplaySurface {
    /// Size of the character grid in columns and rows, fixed at initialisation
    fn size(&self) -> (u16, u16);

    /// Show `fb` as one atomic write
    fn present(&mut self, fb: &FrameBuffer) -> Result<()>;
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    size: (u16, u16),
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            size: (0, 0),
            entered: false,
        }
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        self.size = terminal::size().context("querying terminal size")?;
        terminal::enable_raw_mode().context("entering raw mode")?;
        self.entered = true;

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle("Tetris"))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf().context("preparing terminal screen")?;
        Ok(())
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("restoring terminal screen")?;
        terminal::disable_raw_mode().context("leaving raw mode")?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for TerminalRenderer {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_full_into(fb, &mut self.buf)?;
        self.flush_buf().context("writing frame")
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::BeginSynchronizedUpdate)?;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &ch in fb.row(y) {
            out.queue(Print(ch))?;
        }
    }
    out.queue(terminal::EndSynchronizedUpdate)?;
    Ok(())
}
