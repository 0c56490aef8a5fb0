//! Brightness to character mapping.

use super::charset::CharacterRamp;
use crate::bitmap::ColorSample;

/// Map a sample's brightness to an index into a ramp of `ramp_len` glyphs.
///
/// Computes `round((ramp_len - 1) * brightness_sum / 765)` rounding halves up,
/// done in integers as `(2 * (ramp_len - 1) * sum + 765) / 1530`. Since 765
/// is odd the quotient is never exactly on a half, so any half-rounding rule
/// gives the same result.
///
/// # Example
/// ```
/// use bitmap_ascii::ascii::ramp_index;
/// use bitmap_ascii::bitmap::ColorSample;
///
/// // 382 / 765 * 7 = 3.495..., 383 / 765 * 7 = 3.504...
/// assert_eq!(ramp_index(ColorSample::new(128, 127, 127), 8), 3);
/// assert_eq!(ramp_index(ColorSample::new(128, 128, 127), 8), 4);
/// ```
pub fn ramp_index(sample: ColorSample, ramp_len: usize) -> usize {
    if ramp_len == 0 {
        return 0;
    }
    let max = usize::from(ColorSample::MAX_BRIGHTNESS_SUM);
    let sum = usize::from(sample.brightness_sum());
    (2 * (ramp_len - 1) * sum + max) / (2 * max)
}

/// Map one sample to its glyph.
///
/// With `invert` the brightest pixels take the first glyph instead of the last.
pub fn map_sample(sample: ColorSample, ramp: &CharacterRamp, invert: bool) -> char {
    let index = ramp_index(sample, ramp.len());
    let index = if invert {
        ramp.last_index() - index
    } else {
        index
    };
    ramp.glyphs()[index]
}

/// Map a row of samples to glyphs, reusing `buffer`.
///
/// Returns the number of characters written.
pub fn map_row_into(
    samples: &[ColorSample],
    ramp: &CharacterRamp,
    invert: bool,
    buffer: &mut Vec<char>,
) -> usize {
    buffer.clear();
    buffer.reserve(samples.len());
    buffer.extend(samples.iter().map(|&s| map_sample(s, ramp, invert)));
    samples.len()
}
