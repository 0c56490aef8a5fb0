//! Bitmap file header and DIB header decoding.
//!
//! Only the fields needed to locate and walk the pixel array are kept. Every
//! field sits at a fixed offset: the offset of the previous field plus its width.

use std::fmt;

use super::errors::DecodeError;

/// Bit depths the pixel decoder understands.
pub const SUPPORTED_BITS_PER_PIXEL: &[u16] = &[24];

/// A fixed-position field in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub width: usize,
}

impl Field {
    const fn first(width: usize) -> Self {
        Self { offset: 0, width }
    }

    /// The field that immediately follows this one.
    const fn then(self, width: usize) -> Self {
        Self {
            offset: self.offset + self.width,
            width,
        }
    }

    /// Offset one past the last byte of this field.
    pub const fn end(self) -> usize {
        self.offset + self.width
    }
}

// BITMAPFILEHEADER
pub const SIGNATURE: Field = Field::first(2);
pub const FILE_SIZE: Field = SIGNATURE.then(4);
pub const RESERVED_1: Field = FILE_SIZE.then(2);
pub const RESERVED_2: Field = RESERVED_1.then(2);
pub const PIXEL_ARRAY_OFFSET: Field = RESERVED_2.then(4);

// BITMAPINFOHEADER
pub const DIB_HEADER_SIZE: Field = PIXEL_ARRAY_OFFSET.then(4);
pub const WIDTH: Field = DIB_HEADER_SIZE.then(4);
pub const HEIGHT: Field = WIDTH.then(4);
pub const PLANES: Field = HEIGHT.then(2);
pub const BITS_PER_PIXEL: Field = PLANES.then(2);
pub const COMPRESSION: Field = BITS_PER_PIXEL.then(4);
pub const IMAGE_DATA_SIZE: Field = COMPRESSION.then(4);

/// Smallest buffer that can hold every field we read.
pub const MIN_HEADER_LEN: usize = IMAGE_DATA_SIZE.end();

/// Borrow `width` bytes at `offset`, or fail if they run past the buffer.
fn field_bytes(buf: &[u8], offset: usize, width: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(width)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DecodeError::TruncatedInput {
            offset,
            width,
            len: buf.len(),
        })
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16_le(buf: &[u8], offset: usize) -> Result<u16, DecodeError> {
    let bytes = field_bytes(buf, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u32` at `offset`.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let bytes = field_bytes(buf, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Validated geometry and storage parameters of a bitmap.
///
/// Only [`RawHeader::validate`] creates one, so every instance satisfies:
/// - `bits_per_pixel` is in [`SUPPORTED_BITS_PER_PIXEL`]
/// - `width > 0` and `height > 0`
/// - `pixel_array_offset + image_data_size` fits inside the buffer it was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapDescriptor {
    signature: [u8; 2],
    file_size: u32,
    pixel_array_offset: u32,
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    image_data_size: u32,
}

impl BitmapDescriptor {
    /// Two-byte tag at the start of the file (usually `BM`).
    pub fn signature(&self) -> [u8; 2] {
        self.signature
    }

    /// Signature rendered as text, byte by byte.
    pub fn signature_str(&self) -> String {
        self.signature.iter().map(|&b| b as char).collect()
    }

    pub fn file_size(&self) -> u32 {
        self.file_size
    }

    pub fn pixel_array_offset(&self) -> u32 {
        self.pixel_array_offset
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Size of the pixel array, either declared or derived from the buffer length.
    pub fn image_data_size(&self) -> u32 {
        self.image_data_size
    }

    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel / 8)
    }

    /// Bytes of pixel data in one row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Filler bytes that bring a row up to a multiple of 4.
    pub fn padding_len(&self) -> usize {
        (4 - self.row_len() % 4) % 4
    }

    /// Stored length of one row, including padding.
    pub fn padded_row_len(&self) -> usize {
        self.row_len() + self.padding_len()
    }
}

impl fmt::Display for BitmapDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dump(
            f,
            self.signature,
            self.file_size,
            self.pixel_array_offset,
            self.width,
            self.height,
            self.bits_per_pixel,
            self.image_data_size as usize,
        )
    }
}

/// Header fields exactly as stored, before any validation.
///
/// Lets callers show the header of a file that [`RawHeader::validate`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub pixel_array_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// Declared size, zero when the writer left it out
    pub image_data_size: u32,
    /// Length of the buffer the fields were read from
    pub buffer_len: usize,
}

impl RawHeader {
    /// Declared image size, or the bytes after the pixel array offset when
    /// none is declared.
    pub fn effective_image_size(&self) -> usize {
        if self.image_data_size == 0 {
            self.buffer_len
                .saturating_sub(self.pixel_array_offset as usize)
        } else {
            self.image_data_size as usize
        }
    }

    /// Check the fields and build a [`BitmapDescriptor`].
    ///
    /// A declared image data size of zero (allowed for uncompressed bitmaps)
    /// is replaced by the number of bytes between the pixel array offset and
    /// the end of the buffer.
    pub fn validate(&self) -> Result<BitmapDescriptor, DecodeError> {
        let len = self.buffer_len;

        if !SUPPORTED_BITS_PER_PIXEL.contains(&self.bits_per_pixel) {
            return Err(DecodeError::UnsupportedFormat {
                bits_per_pixel: self.bits_per_pixel,
                supported: SUPPORTED_BITS_PER_PIXEL,
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.file_size as usize != len {
            log::warn!(
                "Header declares a file size of {} bytes, but {} bytes were read",
                self.file_size,
                len
            );
        }

        let offset = self.pixel_array_offset as usize;
        let available = len
            .checked_sub(offset)
            .ok_or(DecodeError::TruncatedPixelData {
                offset,
                needed: 0,
                len,
            })?;

        let image_data_size = if self.image_data_size == 0 {
            log::warn!(
                "Image size not declared, deriving {} bytes from buffer length",
                available
            );
            u32::try_from(available).map_err(|_| DecodeError::TruncatedPixelData {
                offset,
                needed: available,
                len,
            })?
        } else if self.image_data_size as usize > available {
            return Err(DecodeError::TruncatedPixelData {
                offset,
                needed: self.image_data_size as usize,
                len,
            });
        } else {
            self.image_data_size
        };

        Ok(BitmapDescriptor {
            signature: self.signature,
            file_size: self.file_size,
            pixel_array_offset: self.pixel_array_offset,
            width: self.width,
            height: self.height,
            bits_per_pixel: self.bits_per_pixel,
            image_data_size,
        })
    }
}

impl fmt::Display for RawHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dump(
            f,
            self.signature,
            self.file_size,
            self.pixel_array_offset,
            self.width,
            self.height,
            self.bits_per_pixel,
            self.effective_image_size(),
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn write_dump(
    f: &mut fmt::Formatter<'_>,
    signature: [u8; 2],
    file_size: u32,
    pixel_array_offset: u32,
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    image_size: usize,
) -> fmt::Result {
    let signature: String = signature.iter().map(|&b| b as char).collect();
    writeln!(f, "signature:          {}", signature)?;
    writeln!(f, "file size:          {}", file_size)?;
    writeln!(f, "pixel array offset: {}", pixel_array_offset)?;
    writeln!(f, "width:              {}", width)?;
    writeln!(f, "height:             {}", height)?;
    writeln!(f, "bits per pixel:     {}", bits_per_pixel)?;
    write!(f, "image size:         {}", image_size)
}

/// Read the header fields at the start of `buf` without validating them.
pub fn read_header(buf: &[u8]) -> Result<RawHeader, DecodeError> {
    let signature = field_bytes(buf, SIGNATURE.offset, SIGNATURE.width)?;
    let header = RawHeader {
        signature: [signature[0], signature[1]],
        file_size: read_u32_le(buf, FILE_SIZE.offset)?,
        pixel_array_offset: read_u32_le(buf, PIXEL_ARRAY_OFFSET.offset)?,
        width: read_u32_le(buf, WIDTH.offset)?,
        height: read_u32_le(buf, HEIGHT.offset)?,
        bits_per_pixel: read_u16_le(buf, BITS_PER_PIXEL.offset)?,
        image_data_size: read_u32_le(buf, IMAGE_DATA_SIZE.offset)?,
        buffer_len: buf.len(),
    };
    log::debug!("Header: {:?}", header);
    Ok(header)
}

/// Parse and validate the bitmap header at the start of `buf`.
pub fn parse_header(buf: &[u8]) -> Result<BitmapDescriptor, DecodeError> {
    read_header(buf)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal 54-byte header with no pixel data appended.
    fn make_header(width: u32, height: u32, bpp: u16, image_size: u32) -> Vec<u8> {
        let mut buf = vec![0u8; 54];
        buf[0..2].copy_from_slice(b"BM");
        buf[2..6].copy_from_slice(&54u32.to_le_bytes());
        buf[10..14].copy_from_slice(&54u32.to_le_bytes());
        buf[14..18].copy_from_slice(&40u32.to_le_bytes());
        buf[18..22].copy_from_slice(&width.to_le_bytes());
        buf[22..26].copy_from_slice(&height.to_le_bytes());
        buf[26..28].copy_from_slice(&1u16.to_le_bytes());
        buf[28..30].copy_from_slice(&bpp.to_le_bytes());
        buf[34..38].copy_from_slice(&image_size.to_le_bytes());
        buf
    }

    #[test]
    fn test_field_offsets_match_layout() {
        assert_eq!(SIGNATURE.offset, 0);
        assert_eq!(FILE_SIZE.offset, 2);
        assert_eq!(RESERVED_1.offset, 6);
        assert_eq!(RESERVED_2.offset, 8);
        assert_eq!(PIXEL_ARRAY_OFFSET.offset, 10);
        assert_eq!(DIB_HEADER_SIZE.offset, 14);
        assert_eq!(WIDTH.offset, 18);
        assert_eq!(HEIGHT.offset, 22);
        assert_eq!(PLANES.offset, 26);
        assert_eq!(BITS_PER_PIXEL.offset, 28);
        assert_eq!(COMPRESSION.offset, 30);
        assert_eq!(IMAGE_DATA_SIZE.offset, 34);
        assert_eq!(MIN_HEADER_LEN, 38);
    }

    #[test]
    fn test_read_le_values() {
        let buf = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(read_u16_le(&buf, 0).unwrap(), 0x1234);
        assert_eq!(read_u16_le(&buf, 2).unwrap(), 0x5678);
        assert_eq!(read_u32_le(&buf, 0).unwrap(), 0x5678_1234);
    }

    #[test]
    fn test_read_past_end_fails() {
        let buf = [0u8; 5];
        // Field width fits the buffer, but not at this offset
        assert_eq!(
            read_u32_le(&buf, 2),
            Err(DecodeError::TruncatedInput {
                offset: 2,
                width: 4,
                len: 5
            })
        );
        assert!(read_u16_le(&buf, 4).is_err());
        assert!(read_u16_le(&buf, usize::MAX).is_err());
    }

    #[test]
    fn test_parse_valid_header() {
        let mut buf = make_header(2, 3, 24, 24);
        buf.resize(54 + 24, 0);
        let desc = parse_header(&buf).unwrap();
        assert_eq!(desc.signature(), *b"BM");
        assert_eq!(desc.signature_str(), "BM");
        assert_eq!(desc.pixel_array_offset(), 54);
        assert_eq!(desc.width(), 2);
        assert_eq!(desc.height(), 3);
        assert_eq!(desc.bits_per_pixel(), 24);
        assert_eq!(desc.image_data_size(), 24);
        assert_eq!(desc.bytes_per_pixel(), 3);
        assert_eq!(desc.row_len(), 6);
        assert_eq!(desc.padding_len(), 2);
        assert_eq!(desc.padded_row_len(), 8);
    }

    #[test]
    fn test_zero_image_size_is_derived() {
        let mut buf = make_header(1, 1, 24, 0);
        buf.resize(54 + 4, 0);
        let desc = parse_header(&buf).unwrap();
        assert_eq!(desc.image_data_size(), 4);
    }

    #[test]
    fn test_short_buffer_is_truncated_input() {
        let buf = make_header(1, 1, 24, 0);
        let result = parse_header(&buf[..MIN_HEADER_LEN - 1]);
        assert!(matches!(result, Err(DecodeError::TruncatedInput { .. })));

        assert!(matches!(
            parse_header(&[]),
            Err(DecodeError::TruncatedInput { offset: 0, .. })
        ));
    }

    #[test]
    fn test_unsupported_bits_per_pixel() {
        let buf = make_header(1, 1, 32, 0);
        assert_eq!(
            parse_header(&buf),
            Err(DecodeError::UnsupportedFormat {
                bits_per_pixel: 32,
                supported: SUPPORTED_BITS_PER_PIXEL
            })
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let buf = make_header(0, 4, 24, 0);
        assert_eq!(
            parse_header(&buf),
            Err(DecodeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        let buf = make_header(4, 0, 24, 0);
        assert!(matches!(
            parse_header(&buf),
            Err(DecodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_declared_size_larger_than_buffer() {
        let buf = make_header(2, 2, 24, 16);
        assert!(matches!(
            parse_header(&buf),
            Err(DecodeError::TruncatedPixelData { needed: 16, .. })
        ));
    }

    #[test]
    fn test_pixel_offset_past_end() {
        let mut buf = make_header(1, 1, 24, 0);
        buf[10..14].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            parse_header(&buf),
            Err(DecodeError::TruncatedPixelData { offset: 1000, .. })
        ));
    }

    #[test]
    fn test_raw_header_dump_for_rejected_file() {
        let buf = make_header(3, 2, 32, 0);
        let raw = read_header(&buf).unwrap();
        assert_eq!(raw.bits_per_pixel, 32);
        assert_eq!(raw.effective_image_size(), 0);
        let dump = raw.to_string();
        assert!(dump.contains("width:              3\n"));
        assert!(dump.contains("bits per pixel:     32\n"));
        assert!(matches!(
            raw.validate(),
            Err(DecodeError::UnsupportedFormat {
                bits_per_pixel: 32,
                ..
            })
        ));
    }

    #[test]
    fn test_raw_dump_matches_validated_dump() {
        let mut buf = make_header(1, 1, 24, 0);
        buf.resize(58, 0);
        let raw = read_header(&buf).unwrap();
        let desc = raw.validate().unwrap();
        assert_eq!(raw.to_string(), desc.to_string());
    }

    #[test]
    fn test_header_dump_format() {
        let mut buf = make_header(1, 1, 24, 4);
        buf.resize(58, 0);
        buf[2..6].copy_from_slice(&58u32.to_le_bytes());
        let dump = parse_header(&buf).unwrap().to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "signature:          BM",
                "file size:          58",
                "pixel array offset: 54",
                "width:              1",
                "height:             1",
                "bits per pixel:     24",
                "image size:         4",
            ]
        );
    }
}
