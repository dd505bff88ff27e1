//! Console renderer
//!
//! One glyph per cell, separated by spaces. Row 0 is the bottom of the grid,
//! so rows are printed in reverse.

use std::io::{self, Write};
use thermosand_core::world::Grid;

/// Clear the terminal and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render the grid top row first, one line per row
pub fn render_frame(grid: &Grid) -> String {
    let mut frame = String::with_capacity(grid.rows() * grid.cols() * 2);

    for row in grid.cells().chunks(grid.cols()).rev() {
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                frame.push(' ');
            }
            frame.push(cell.material().glyph());
        }
        frame.push('\n');
    }

    frame
}

/// Clear the screen and write one frame
pub fn draw(grid: &Grid, out: &mut impl Write) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN.as_bytes())?;
    out.write_all(render_frame(grid).as_bytes())?;
    out.flush()
}
