//! bitmap-ascii library crate.
//!
//! Decodes uncompressed 24-bit bitmaps and renders them as ASCII art:
//!
//! ```
//! use bitmap_ascii::{ascii, bitmap};
//!
//! # fn demo(bytes: &[u8]) -> Result<(), bitmap::DecodeError> {
//! let desc = bitmap::parse_header(bytes)?;
//! let pixels = bitmap::decode_pixels(bytes, &desc)?;
//! let art = ascii::render(&pixels, &ascii::CharacterRamp::default(), false);
//! let text = ascii::serialize(&art);
//! # let _ = text;
//! # Ok(())
//! # }
//! ```

pub mod ascii;
pub mod bitmap;
pub mod cli;
pub mod config;
