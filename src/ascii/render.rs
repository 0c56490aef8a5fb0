//! Character grid assembly and serialization.

use std::fmt;

use super::charset::CharacterRamp;
use super::mapping::map_row_into;
use crate::bitmap::PixelGrid;

/// Row-major grid of glyphs with the same dimensions as its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl AsciiGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Each row as a string, top to bottom, without line terminators.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks_exact(self.width)
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Render every pixel of `grid` as a glyph from `ramp`.
pub fn render(grid: &PixelGrid, ramp: &CharacterRamp, invert: bool) -> AsciiGrid {
    let mut cells = Vec::with_capacity(grid.samples().len());
    let mut row_buffer = Vec::with_capacity(grid.width());

    for row in grid.rows() {
        map_row_into(row, ramp, invert, &mut row_buffer);
        cells.extend_from_slice(&row_buffer);
    }

    AsciiGrid {
        width: grid.width(),
        height: grid.height(),
        cells,
    }
}

/// Encode the grid as UTF-8 text.
///
/// Every row, the last one included, is terminated by a single `\n`.
pub fn serialize(grid: &AsciiGrid) -> Vec<u8> {
    grid.to_string().into_bytes()
}
