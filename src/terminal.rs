//! Console output: the canvas shown with half-block glyphs, two pixels per
//! character cell.

use crate::canvas::Canvas;
use crate::grid::Viewport;
use crate::state::AppState;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};

/// Upper half block: the foreground paints the top pixel, the background the bottom one
const HALF_BLOCK: char = '▀';

/// Canvas pixels stacked in one character cell
pub const PIXELS_PER_ROW: u32 = 2;

/// Pixel viewport covered by a terminal of `cols` x `rows` characters
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols as u32, rows as u32 * PIXELS_PER_ROW)
}

/// Current terminal size as (columns, rows)
pub fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

/// Applies one terminal event to the application state.
///
/// Returns the new viewport when the terminal was resized.
pub fn handle_event(state: &mut AppState, event: &Event) -> Option<Viewport> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => state.quit = true,
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                    state.paused = !state.paused
                }
                KeyCode::Char('d') | KeyCode::Char('D') => state.debug = !state.debug,
                _ => {}
            }
            None
        }
        Event::Resize(cols, rows) => {
            state.viewport = viewport_for(*cols, *rows);
            Some(state.viewport)
        }
        _ => None,
    }
}

/// Raw mode plus alternate screen, restored on drop
pub struct TerminalSession<W: Write> {
    out: W,
}

impl<W: Write> TerminalSession<W> {
    /// Switches the terminal over; a failure part way is rolled back on drop
    pub fn enter(out: W) -> io::Result<Self> {
        let mut session = TerminalSession { out };
        terminal::enable_raw_mode()?;
        execute!(
            session.out,
            EnterAlternateScreen,
            DisableLineWrap,
            cursor::Hide
        )?;
        Ok(session)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    top: [u8; 3],
    bottom: [u8; 3],
}

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Flushes canvas frames to the terminal, redrawing only cells that changed
#[derive(Debug, Default)]
pub struct Presenter {
    cols: usize,
    rows: usize,
    previous: Vec<Option<Glyph>>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the next frame to be redrawn in full
    pub fn invalidate(&mut self) {
        self.previous.iter_mut().for_each(|glyph| *glyph = None);
    }

    /// Writes the cells of `canvas` that differ from the last frame.
    ///
    /// Returns how many character cells were redrawn.
    pub fn present<W: Write>(&mut self, out: &mut W, canvas: &Canvas) -> io::Result<usize> {
        let cols = canvas.width();
        let rows = canvas.height().div_ceil(PIXELS_PER_ROW as usize);
        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.previous = vec![None; cols * rows];
        }

        let rgb = |x: usize, y: usize| canvas.pixel(x, y).map(|[r, g, b, _]| [r, g, b]);
        let mut last_fg = None;
        let mut last_bg = None;
        let mut changed = 0;

        for row in 0..rows {
            for col in 0..cols {
                let top = rgb(col, row * 2).unwrap_or_default();
                let glyph = Glyph {
                    top,
                    bottom: rgb(col, row * 2 + 1).unwrap_or(top),
                };
                let index = row * cols + col;
                if self.previous[index] == Some(glyph) {
                    continue;
                }

                queue!(out, cursor::MoveTo(col as u16, row as u16))?;
                if last_fg != Some(glyph.top) {
                    queue!(out, SetForegroundColor(to_color(glyph.top)))?;
                    last_fg = Some(glyph.top);
                }
                if last_bg != Some(glyph.bottom) {
                    queue!(out, SetBackgroundColor(to_color(glyph.bottom)))?;
                    last_bg = Some(glyph.bottom);
                }
                queue!(out, Print(HALF_BLOCK))?;

                self.previous[index] = Some(glyph);
                changed += 1;
            }
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(changed)
    }

    /// Prints a status line over the top row; the covered cells are redrawn next frame
    pub fn overlay<W: Write>(&mut self, out: &mut W, text: &str) -> io::Result<()> {
        let width = text.chars().count().min(self.cols);
        let line: String = text.chars().take(width).collect();

        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::White),
            SetBackgroundColor(Color::Black),
            Print(line),
            ResetColor
        )?;
        out.flush()?;

        for glyph in self.previous.iter_mut().take(width) {
            *glyph = None;
        }
        Ok(())
    }
}
