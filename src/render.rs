use anyhow::Result;
use crossterm::style::Color;

pub const SNAKE_COLOR: Color = Color::White;
pub const HEAD_COLOR: Color = Color::Red;
pub const FOOD_COLOR: Color = Color::Green;
pub const ALERT_COLOR: Color = Color::Red;

/// Snake squares are this much smaller than a cell, so adjacent segments stay apart.
pub const SEGMENT_GAP: u32 = 2;

/// Something the game can draw on. Coordinates and sizes are in pixels, with
/// `pixel = grid coordinate * cell size`.
pub trait Surface {
    fn clear(&mut self, width: u32, height: u32) -> Result<()>;

    /// Fills the `size` by `size` square whose top-left corner is at (`x`, `y`).
    fn fill_rect(&mut self, x: i64, y: i64, size: u32, color: Color) -> Result<()>;

    fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Color) -> Result<()>;

    /// Makes everything drawn so far visible.
    fn flush(&mut self) -> Result<()>;
}
