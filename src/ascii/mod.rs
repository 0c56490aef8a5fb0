//! ASCII renderer module for converting decoded bitmaps to ASCII art.
//!
//! 1. **Character mapping** - Quantize each pixel's channel sum into a ramp index
//! 2. **Rendering** - Build an [`AsciiGrid`] with one glyph per pixel
//! 3. **Serialization** - Newline-terminated UTF-8 rows for console or file
//!
//! # Character Ramps
//!
//! [`CharacterRamp::default`] is the 8-level ramp `@#%/-'. `. Custom ramps are
//! parsed from `[c,c,...]` with [`CharacterRamp::parse`].

mod charset;
mod mapping;
mod render;

pub use charset::{CharacterRamp, RampError, DEFAULT_RAMP, MIN_RAMP_LEN};
pub use mapping::{map_row_into, map_sample, ramp_index};
pub use render::{render, serialize, AsciiGrid};
