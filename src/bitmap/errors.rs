//! Error types for bitmap decoding.

/// Errors that can occur while decoding a bitmap buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A header field runs past the end of the buffer
    #[error(
        "Truncated input: need {width} bytes at offset {offset}, but the buffer is only {len} bytes long"
    )]
    TruncatedInput {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// Bits per pixel outside the supported set
    #[error("Image bits per pixel ({bits_per_pixel}) not supported. Supported: {supported:?}")]
    UnsupportedFormat {
        bits_per_pixel: u16,
        supported: &'static [u16],
    },

    /// Width or height is zero
    #[error("Invalid image dimensions {width}x{height}: width and height must be greater than 0")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data extends past the end of the buffer
    #[error(
        "Truncated pixel data: need {needed} bytes at offset {offset}, but the buffer is only {len} bytes long"
    )]
    TruncatedPixelData {
        offset: usize,
        needed: usize,
        len: usize,
    },
}
