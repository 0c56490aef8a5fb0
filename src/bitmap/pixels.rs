//! Pixel array extraction.
//!
//! Rows are stored bottom-up, each one padded to a multiple of 4 bytes, with
//! channels in blue-green-red order. The decoder locates every pixel directly
//! from its row and column so padding bytes are never read as color.

use super::errors::DecodeError;
use super::header::BitmapDescriptor;

/// A single RGB color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    /// Largest possible [`brightness_sum`](Self::brightness_sum).
    pub const MAX_BRIGHTNESS_SUM: u16 = 255 * 3;

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a sample from bytes stored in blue-green-red order.
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self::new(bgr[2], bgr[1], bgr[0])
    }

    /// Sum of the three channels (0-765).
    pub fn brightness_sum(&self) -> u16 {
        u16::from(self.red) + u16::from(self.green) + u16::from(self.blue)
    }
}

/// Row-major grid of color samples. Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    samples: Vec<ColorSample>,
}

impl PixelGrid {
    /// Build a grid from row-major samples.
    ///
    /// Returns `None` if either dimension is zero or `samples.len()` is not
    /// `width * height`.
    pub fn from_samples(width: usize, height: usize, samples: Vec<ColorSample>) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != samples.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y` (row 0 is the top).
    pub fn get(&self, x: usize, y: usize) -> Option<ColorSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(y * self.width + x).copied()
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ColorSample]> {
        self.samples.chunks_exact(self.width)
    }

    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }
}

/// Decode the pixel array described by `desc` into a top-down grid.
///
/// Only the `image_data_size` bytes starting at the pixel array offset are
/// read. A declared size too small for `width x height` pixels is
/// [`DecodeError::TruncatedPixelData`].
pub fn decode_pixels(buf: &[u8], desc: &BitmapDescriptor) -> Result<PixelGrid, DecodeError> {
    let width = desc.width() as usize;
    let height = desc.height() as usize;
    let bytes_per_pixel = desc.bytes_per_pixel();
    let padded_row_len = desc.padded_row_len();
    let base = desc.pixel_array_offset() as usize;

    log::debug!(
        "Decoding {}x{} pixels: {} bytes/pixel, {} bytes/row ({} padding)",
        width,
        height,
        bytes_per_pixel,
        padded_row_len,
        desc.padding_len()
    );

    let pixel_count = width
        .checked_mul(height)
        .ok_or(DecodeError::TruncatedPixelData {
            offset: base,
            needed: usize::MAX,
            len: buf.len(),
        })?;

    // Reads never go past the declared pixel array, even when the buffer
    // holds more bytes after it.
    let image_data_size = desc.image_data_size() as usize;
    let data = base
        .checked_add(image_data_size)
        .and_then(|end| buf.get(..end))
        .ok_or(DecodeError::TruncatedPixelData {
            offset: base,
            needed: image_data_size,
            len: buf.len(),
        })?;

    // The last pixel sits furthest into the array; checking it up front means
    // no partially built grid is ever thrown away.
    let last_offset = pixel_offset(base, height - 1, width - 1, padded_row_len, bytes_per_pixel)
        .ok_or(DecodeError::TruncatedPixelData {
            offset: base,
            needed: usize::MAX,
            len: data.len(),
        })?;
    check_bounds(data, last_offset, bytes_per_pixel)?;

    let mut samples = vec![ColorSample::default(); pixel_count];

    for file_row in 0..height {
        let grid_row = height - 1 - file_row;
        let row_start = base + file_row * padded_row_len;
        let row = &data[row_start..row_start + desc.row_len()];

        for (col, bgr) in row.chunks_exact(bytes_per_pixel).enumerate() {
            samples[grid_row * width + col] = ColorSample::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }
    }

    Ok(PixelGrid {
        width,
        height,
        samples,
    })
}

/// Byte offset of the pixel at (`file_row`, `col`), counting rows in file order.
fn pixel_offset(
    base: usize,
    file_row: usize,
    col: usize,
    padded_row_len: usize,
    bytes_per_pixel: usize,
) -> Option<usize> {
    file_row
        .checked_mul(padded_row_len)?
        .checked_add(col.checked_mul(bytes_per_pixel)?)?
        .checked_add(base)
}

fn check_bounds(buf: &[u8], offset: usize, needed: usize) -> Result<(), DecodeError> {
    match offset.checked_add(needed) {
        Some(end) if end <= buf.len() => Ok(()),
        _ => Err(DecodeError::TruncatedPixelData {
            offset,
            needed,
            len: buf.len(),
        }),
    }
}
