use crate::{TermInt, Coords};
use crate::config::GameConfig;
use crate::render::Surface;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{ensure, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Attribute, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

const CELL_GLYPH: &str = "██";
// Every grid cell takes two terminal columns so that cells look roughly square
const CHARS_PER_CELL: TermInt = 2;

/// Where the board's grid cells land in the terminal: one row and
/// `CHARS_PER_CELL` columns per cell, offset by the border.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Layout {
    cell_size: u32,
    columns: TermInt,
    rows: TermInt,
}

impl Layout {
    fn new(config: &GameConfig) -> Self {
        Layout {
            cell_size: config.cell_size,
            columns: cells_covering(config.width, config.cell_size),
            rows: cells_covering(config.height, config.cell_size),
        }
    }

    fn board_width(&self) -> TermInt {
        self.columns * CHARS_PER_CELL
    }

    /// Terminal position of the grid cell containing pixel (`x`, `y`), if it is on the board.
    fn to_term(&self, x: i64, y: i64) -> Option<Coords> {
        let size = i64::from(self.cell_size);
        let (col, row) = (x.div_euclid(size), y.div_euclid(size));

        if (0..i64::from(self.columns)).contains(&col) && (0..i64::from(self.rows)).contains(&row) {
            Some((1 + col as TermInt * CHARS_PER_CELL, 1 + row as TermInt))
        } else {
            None
        }
    }

    /// Terminal positions of every on-board cell the `size` square at (`x`, `y`) touches.
    fn cells_touched(&self, x: i64, y: i64, size: u32) -> Vec<Coords> {
        let mut cells = vec![];
        if size == 0 {
            return cells;
        }

        let step = i64::from(self.cell_size);
        let last = i64::from(size) - 1;
        let mut py = y.div_euclid(step) * step;

        while py <= y + last {
            let mut px = x.div_euclid(step) * step;
            while px <= x + last {
                cells.extend(self.to_term(px, py));
                px += step;
            }
            py += step;
        }

        cells
    }

    /// Where text anchored at pixel (`x`, `y`) starts, and how many characters of it fit.
    /// Anchors off the board are pulled onto it, and the text is shifted left when it
    /// would run past the right border.
    fn text_span(&self, x: i64, y: i64, len: usize) -> (Coords, usize) {
        let size = i64::from(self.cell_size);
        let col = x.div_euclid(size).max(0).min(i64::from(self.columns) - 1) as TermInt;
        let row = y.div_euclid(size).max(0).min(i64::from(self.rows) - 1) as TermInt;

        let width = self.board_width();
        let shown = len.min(width as usize) as TermInt;
        let left = (1 + col * CHARS_PER_CELL).min(1 + width - shown);

        ((left, 1 + row), shown as usize)
    }
}

/// Draws the board inside a border in the terminal's alternate screen, with a
/// status line underneath.
pub struct TermManager {
    stdout: Stdout,
    layout: Layout,
}

impl TermManager {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let layout = Layout::new(config);
        let (columns, rows) = (layout.columns, layout.rows);

        let (term_width, term_height) = terminal::size()?;
        let needed = (u32::from(columns) * u32::from(CHARS_PER_CELL) + 2, u32::from(rows) + 3);
        ensure!(
            u32::from(term_width) >= needed.0 && u32::from(term_height) >= needed.1,
            "the terminal is {}x{} but the board needs {}x{}",
            term_width, term_height, needed.0, needed.1
        );

        Ok(TermManager { stdout: stdout(), layout })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Waits up to `timeout` for input, then returns every key event that is queued.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        let width = self.layout.board_width() + 2;
        let height = self.layout.rows + 2;
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..height - 1 {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Prints `lines` centered on the board. The next board clear wipes them.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let board_width = self.layout.board_width();
        let top = 1 + self.layout.rows.saturating_sub(lines.len() as TermInt) / 2;

        for (i, line) in lines.iter().enumerate() {
            let line: String = line.chars().take(board_width as usize).collect();
            let left = 1 + (board_width - line.chars().count() as TermInt) / 2;
            queue!(self.stdout, cursor::MoveTo(left, top + i as TermInt), style::Print(line))?;
        }

        self.flush()
    }

    /// Replaces the line under the board.
    pub fn show_status(&mut self, status: &str) -> Result<()> {
        let y = self.layout.rows + 2;
        queue!(
            self.stdout,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(status)
        )?;
        self.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

impl Surface for TermManager {
    fn clear(&mut self, width: u32, height: u32) -> Result<()> {
        let columns = cells_covering(width, self.layout.cell_size).min(self.layout.columns);
        let rows = cells_covering(height, self.layout.cell_size).min(self.layout.rows);
        let blank = " ".repeat((columns * CHARS_PER_CELL) as usize);

        for y in 0..rows {
            queue!(self.stdout, cursor::MoveTo(1, 1 + y), style::Print(&blank))?;
        }

        Ok(())
    }

    fn fill_rect(&mut self, x: i64, y: i64, size: u32, color: Color) -> Result<()> {
        for pos in self.layout.cells_touched(x, y, size) {
            queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                style::SetForegroundColor(color),
                style::Print(CELL_GLYPH),
                style::ResetColor
            )?;
        }

        Ok(())
    }

    fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Color) -> Result<()> {
        let (pos, shown) = self.layout.text_span(x, y, text.chars().count());
        let text: String = text.chars().take(shown).collect();
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::SetAttribute(Attribute::Bold),
            style::Print(text),
            style::SetAttribute(Attribute::Reset),
            style::ResetColor
        )?;

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Number of grid cells needed to cover `pixels`, counting a partial cell as a whole one.
fn cells_covering(pixels: u32, cell_size: u32) -> TermInt {
    let (pixels, cell_size) = (u64::from(pixels), u64::from(cell_size));
    let cells = (pixels + cell_size - 1) / cell_size;
    cells.min(u64::from(TermInt::MAX)) as TermInt
}
