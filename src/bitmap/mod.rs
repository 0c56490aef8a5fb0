//! Uncompressed 24-bit bitmap decoding.
//!
//! Decoding happens in two steps:
//!
//! 1. **Header parsing** - [`read_header`] reads the fixed-offset fields into a
//!    [`RawHeader`], which [`RawHeader::validate`] turns into a [`BitmapDescriptor`]
//!    ([`parse_header`] does both)
//! 2. **Pixel extraction** - [`decode_pixels`] walks the padded, bottom-up
//!    pixel array into a top-down [`PixelGrid`]

mod errors;
pub mod header;
mod pixels;

pub use errors::DecodeError;
pub use header::{
    parse_header, read_header, BitmapDescriptor, RawHeader, MIN_HEADER_LEN,
    SUPPORTED_BITS_PER_PIXEL,
};
pub use pixels::{decode_pixels, ColorSample, PixelGrid};

/// Parse the header and decode the pixel array in one call.
pub fn decode(buf: &[u8]) -> Result<(BitmapDescriptor, PixelGrid), DecodeError> {
    let desc = parse_header(buf)?;
    let grid = decode_pixels(buf, &desc)?;
    Ok((desc, grid))
}
