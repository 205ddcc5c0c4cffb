//! Terminal ownership and cell-based output.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use tracing::debug;

use crate::color::Rgb;
use crate::graphics::FrameBuffer;

/// Upper half block; foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// Raw mode, alternate screen and mouse capture, released on drop
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on the guard restores the terminal even if setup fails
        let mut session = TerminalSession { out: io::stdout() };
        execute!(
            session.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        debug!("terminal session started");
        Ok(session)
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            EndSynchronizedUpdate,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        debug!("terminal session ended");
    }
}

/// Current terminal size as `(columns, rows)`
pub fn viewport_size() -> (u16, u16) {
    termsize::get()
        .map(|size| (size.cols, size.rows))
        .or_else(|| terminal::size().ok())
        .filter(|&(cols, rows)| cols > 0 && rows > 0)
        .unwrap_or((80, 24))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    fn blank() -> Self {
        Cell {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Grid of terminal cells for one frame
pub struct Canvas {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::blank(); width as usize * height as usize],
        }
    }

    /// Packs two pixel rows into each cell row
    pub fn from_frame(frame: &FrameBuffer) -> Self {
        let width = frame.width as u16;
        let height = (frame.height / 2) as u16;
        let mut canvas = Canvas::new(width, height);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let top = frame.pixel(x, y * 2);
                let bottom = frame.pixel(x, y * 2 + 1);
                canvas.cells[y * width as usize + x] = Cell {
                    ch: HALF_BLOCK,
                    fg: top.to_color(),
                    bg: bottom.to_color(),
                };
            }
        }
        canvas
    }

    #[cfg(test)]
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, fg: Rgb, bg: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = Cell {
            ch,
            fg: fg.to_color(),
            bg: bg.to_color(),
        };
    }

    /// Writes `text` starting at `(x, y)`, clipped at the right edge
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            let column = x.saturating_add(offset);
            if column >= self.width {
                break;
            }
            self.put(column, y, ch, fg, bg);
        }
    }

    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, bg: Rgb) {
        for row in y..y.saturating_add(height) {
            for column in x..x.saturating_add(width) {
                self.put(column, row, ' ', bg, bg);
            }
        }
    }

    /// Box outline with a filled interior
    pub fn draw_box(&mut self, x: u16, y: u16, width: u16, height: u16, fg: Rgb, bg: Rgb) {
        if width < 2 || height < 2 {
            return;
        }
        self.fill(x, y, width, height, bg);
        let x1 = x + width - 1;
        let y1 = y + height - 1;
        for column in x + 1..x1 {
            self.put(column, y, '─', fg, bg);
            self.put(column, y1, '─', fg, bg);
        }
        for row in y + 1..y1 {
            self.put(x, row, '│', fg, bg);
            self.put(x1, row, '│', fg, bg);
        }
        self.put(x, y, '╭', fg, bg);
        self.put(x1, y, '╮', fg, bg);
        self.put(x, y1, '╰', fg, bg);
        self.put(x1, y1, '╯', fg, bg);
    }
}

/// Writes canvases to the terminal, only touching cells that changed
#[derive(Default)]
pub struct Presenter {
    previous: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Presenter {
    /// Forces the next frame to be drawn in full
    pub fn invalidate(&mut self) {
        self.previous.clear();
    }

    pub fn present<W: Write>(&mut self, out: &mut W, canvas: &Canvas) -> io::Result<()> {
        if canvas.width != self.width || canvas.height != self.height || self.previous.is_empty() {
            self.width = canvas.width;
            self.height = canvas.height;
            // Sentinel cells that never match, so everything is redrawn
            self.previous = vec![
                Cell {
                    ch: '\0',
                    fg: Color::Reset,
                    bg: Color::Reset,
                };
                canvas.cells.len()
            ];
            queue!(out, ResetColor, terminal::Clear(terminal::ClearType::All))?;
        }

        queue!(out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None;
        let mut cur_bg = None;
        let mut cursor_at = None;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                let i = y as usize * canvas.width as usize + x as usize;
                let cell = canvas.cells[i];
                if self.previous[i] == cell {
                    continue;
                }
                self.previous[i] = cell;

                if cursor_at != Some((x, y)) {
                    queue!(out, cursor::MoveTo(x, y))?;
                }
                if cur_bg != Some(cell.bg) {
                    cur_bg = Some(cell.bg);
                    queue!(out, SetBackgroundColor(cell.bg))?;
                }
                if cur_fg != Some(cell.fg) {
                    cur_fg = Some(cell.fg);
                    queue!(out, SetForegroundColor(cell.fg))?;
                }
                queue!(out, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rows_pack_into_half_blocks() {
        let mut frame = FrameBuffer::new(2, 4);
        frame.pixels[0] = Rgb::WHITE;
        frame.pixels[2] = Rgb::new(1, 2, 3);
        let canvas = Canvas::from_frame(&frame);
        assert_eq!((canvas.width, canvas.height), (2, 2));
        let cell = canvas.cell(0, 0).expect("inside");
        assert_eq!(cell.ch, HALF_BLOCK);
        assert_eq!(cell.fg, Rgb::WHITE.to_color());
        assert_eq!(cell.bg, Rgb::new(1, 2, 3).to_color());
        assert!(canvas.cell(2, 0).is_none());
    }

    #[test]
    fn text_is_clipped_at_the_edge() {
        let mut canvas = Canvas::new(5, 1);
        canvas.put_str(3, 0, "Saturn", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(canvas.cell(3, 0).map(|c| c.ch), Some('S'));
        assert_eq!(canvas.cell(4, 0).map(|c| c.ch), Some('a'));
        canvas.put_str(0, 3, "ignored", Rgb::WHITE, Rgb::BLACK);
    }

    #[test]
    fn unchanged_frames_write_almost_nothing() {
        let mut canvas = Canvas::new(10, 4);
        canvas.put_str(0, 0, "Mercury", Rgb::WHITE, Rgb::BLACK);
        let mut presenter = Presenter::default();

        let mut first = Vec::new();
        presenter.present(&mut first, &canvas).expect("in-memory write");
        let mut second = Vec::new();
        presenter.present(&mut second, &canvas).expect("in-memory write");
        assert!(second.len() < first.len());
        assert!(!String::from_utf8_lossy(&second).contains("Mercury"));

        canvas.put_str(0, 0, "Venus", Rgb::WHITE, Rgb::BLACK);
        let mut third = Vec::new();
        presenter.present(&mut third, &canvas).expect("in-memory write");
        assert!(String::from_utf8_lossy(&third).contains('V'));

        presenter.invalidate();
        let mut full = Vec::new();
        presenter.present(&mut full, &canvas).expect("in-memory write");
        assert!(full.len() > third.len());
    }

    #[test]
    fn boxes_get_rounded_corners() {
        let mut canvas = Canvas::new(6, 3);
        canvas.draw_box(0, 0, 6, 3, Rgb::WHITE, Rgb::BLACK);
        assert_eq!(canvas.cell(0, 0).map(|c| c.ch), Some('╭'));
        assert_eq!(canvas.cell(5, 2).map(|c| c.ch), Some('╯'));
        assert_eq!(canvas.cell(2, 1).map(|c| c.ch), Some(' '));
    }
}
