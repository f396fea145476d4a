//! JPEG marker segment scanning.
//!
//! A JPEG stream is a chain of marker segments. Every segment starts with a
//! two-byte big-endian marker (`0xFFxx`). Most markers are followed by a
//! two-byte length that counts itself but not the marker. EXIF metadata
//! lives in an APP1 segment whose payload starts with `"Exif\0\0"`, followed
//! directly by a TIFF header.
//!
//! ```text
//! FF D8                      SOI
//! FF E1 LL LL 'Exif' 00 00   APP1 + length + identifier
//! 49 49 2A 00 ...            TIFF header (base of all EXIF offsets)
//! ...
//! FF DA                      SOS (entropy-coded data follows)
//! ```
//!
//! The scan is a single forward pass that gives up at the first anomaly.

use tracing::trace;

use crate::error::JpegError;
use crate::io::ByteReader;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: u16 = 0xFFD8;

/// End Of Image marker
pub const EOI: u16 = 0xFFD9;

/// Start Of Scan marker
pub const SOS: u16 = 0xFFDA;

/// Application segment 1 (EXIF, XMP) marker
pub const APP1: u16 = 0xFFE1;

/// Identifier at the start of an EXIF APP1 payload
pub const EXIF_IDENTIFIER: &[u8; 4] = b"Exif";

/// Smallest buffer that can hold SOI, an APP1 header and the EXIF identifier
pub const MIN_JPEG_LEN: usize = 12;

/// Smallest APP1 length that can hold the length field and `"Exif\0\0"`
const MIN_APP1_LENGTH: u16 = 8;

/// Smallest length of any other segment (the length field itself)
const MIN_SEGMENT_LENGTH: u16 = 2;

// =============================================================================
// Scanner
// =============================================================================

/// Check whether the buffer starts with the JPEG start-of-image marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    ByteReader::new(data).read_u16_be(0) == Some(SOI)
}

/// Locate the TIFF header of the first EXIF APP1 segment.
///
/// Returns the absolute buffer position of the TIFF header. APP1 segments
/// that carry something other than EXIF (XMP, for example) are skipped.
/// The scan stops at the start of scan data or at the end-of-image marker.
///
/// # Errors
/// - `TooShort` if the buffer is smaller than [`MIN_JPEG_LEN`]
/// - `NotJpeg` if the buffer does not start with SOI
/// - `BrokenMarker` if a marker is out of bounds or lacks the 0xFF prefix
/// - `InvalidSegmentLength` if a segment length is missing or too small
/// - `NoExifSegment` if the marker chain ends without an EXIF segment
pub fn locate_exif(reader: &ByteReader<'_>) -> Result<usize, JpegError> {
    if reader.len() < MIN_JPEG_LEN {
        return Err(JpegError::TooShort {
            required: MIN_JPEG_LEN,
            actual: reader.len(),
        });
    }

    let soi = reader
        .read_u16_be(0)
        .ok_or(JpegError::BrokenMarker { offset: 0 })?;
    if soi != SOI {
        return Err(JpegError::NotJpeg(soi));
    }

    let mut offset = 2usize;
    loop {
        let marker = reader
            .read_u16_be(offset)
            .ok_or(JpegError::BrokenMarker { offset })?;
        if marker & 0xFF00 != 0xFF00 {
            return Err(JpegError::BrokenMarker { offset });
        }
        if marker == SOS || marker == EOI {
            trace!(offset, marker, "Reached end of marker segments");
            return Err(JpegError::NoExifSegment);
        }

        let length_offset = offset + 2;
        let length =
            reader
                .read_u16_be(length_offset)
                .ok_or(JpegError::InvalidSegmentLength {
                    offset: length_offset,
                    length: 0,
                })?;

        if marker == APP1 {
            if length < MIN_APP1_LENGTH {
                return Err(JpegError::InvalidSegmentLength {
                    offset: length_offset,
                    length,
                });
            }
            let identifier = reader
                .read(length_offset + 2, EXIF_IDENTIFIER.len())
                .ok_or(JpegError::BrokenMarker { offset })?;
            if identifier == EXIF_IDENTIFIER {
                let tiff_base = length_offset + 8;
                trace!(offset, tiff_base, "Found EXIF APP1 segment");
                return Ok(tiff_base);
            }
            trace!(offset, length, "Skipping non-EXIF APP1 segment");
        } else if length < MIN_SEGMENT_LENGTH {
            return Err(JpegError::InvalidSegmentLength {
                offset: length_offset,
                length,
            });
        }

        offset = length_offset + length as usize;
    }
}

// =============================================================================
// Tests
// =============================================================================
