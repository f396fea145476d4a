//! TIFF header and directory parsing.
//!
//! An EXIF payload is a small TIFF file embedded in the APP1 segment. All
//! offsets inside it are relative to the start of its header, which sits
//! at an arbitrary position in the JPEG buffer. [`TiffHeader`] records that
//! base position so offsets can be resolved to absolute buffer positions.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to IFD0 (4 bytes, relative to byte 0)
//! ```
//!
//! # IFD Structure
//!
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+12N:   N entries of 12 bytes (tag u16, type u16, count u32, value/offset u32)
//! ```

use crate::error::TiffError;
use crate::io::{ByteOrder, ByteReader};

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Upper bound on the entry count of a single IFD.
///
/// Real cameras write a few dozen entries. Anything above this is treated as
/// corruption and the directory is not walked.
pub const MAX_IFD_ENTRIES: u16 = 200;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Absolute buffer position of the header; all TIFF offsets are relative to it
    pub base: usize,

    /// Byte order for all multi-byte values in the payload
    pub byte_order: ByteOrder,

    /// Offset of IFD0, relative to `base`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the TIFF header that starts at absolute position `base`.
    ///
    /// The version field is not checked; some writers put junk there and the
    /// directory that follows is still readable.
    ///
    /// # Errors
    /// - `HeaderTruncated` if fewer than 8 bytes are available at `base`
    /// - `InvalidByteOrder` if the signature is neither II nor MM
    pub fn parse(reader: &ByteReader<'_>, base: usize) -> Result<Self, TiffError> {
        if !reader.contains(base, TIFF_HEADER_SIZE) {
            return Err(TiffError::HeaderTruncated { offset: base });
        }

        // "II" and "MM" are palindromes, so the read order doesn't matter here
        let signature = reader
            .read_u16_be(base)
            .ok_or(TiffError::HeaderTruncated { offset: base })?;
        // Anything but "II" or "MM" is a corrupt header, not an implied big-endian one
        let byte_order =
            ByteOrder::from_signature(signature).ok_or(TiffError::InvalidByteOrder(signature))?;

        let first_ifd_offset = reader
            .read_u32(base + 4, byte_order)
            .ok_or(TiffError::HeaderTruncated { offset: base })?;

        Ok(TiffHeader {
            base,
            byte_order,
            first_ifd_offset,
        })
    }

    /// Convert an offset relative to the header into an absolute buffer position.
    #[inline]
    pub fn resolve(&self, offset: u32) -> Option<usize> {
        self.base.checked_add(offset as usize)
    }

    /// Absolute position of IFD0.
    #[inline]
    pub fn first_ifd_position(&self) -> Option<usize> {
        self.resolve(self.first_ifd_offset)
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Absolute buffer position of the entry
    pub position: usize,

    /// Tag ID
    pub tag_id: u16,

    /// Parsed field type, `None` if the type value is unknown
    pub field_type: Option<FieldType>,

    /// Raw field type value
    pub field_type_raw: u16,

    /// Number of values
    pub count: u32,

    /// Raw contents of the value/offset field
    pub value_offset: u32,
}

impl IfdEntry {
    /// Decode the entry at absolute position `position`.
    ///
    /// Returns `None` unless all 12 bytes are inside the buffer.
    pub fn read(reader: &ByteReader<'_>, position: usize, byte_order: ByteOrder) -> Option<Self> {
        if !reader.contains(position, IFD_ENTRY_SIZE) {
            return None;
        }

        let tag_id = reader.read_u16(position, byte_order)?;
        let field_type_raw = reader.read_u16(position + 2, byte_order)?;
        let count = reader.read_u32(position + 4, byte_order)?;
        let value_offset = reader.read_u32(position + 8, byte_order)?;

        Some(IfdEntry {
            position,
            tag_id,
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count,
            value_offset,
        })
    }

    /// Whether the value is stored in the entry's own value field.
    ///
    /// Values of an unknown type are always assumed to be stored at an offset.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.field_type
            .is_some_and(|field_type| field_type.fits_inline(self.count))
    }

    /// Absolute buffer position of the entry's value.
    ///
    /// Inline values start at byte 8 of the entry; other values are at the
    /// header-relative offset held in the value field.
    pub fn data_position(&self, header: &TiffHeader) -> Option<usize> {
        if self.is_inline() {
            self.position.checked_add(8)
        } else {
            header.resolve(self.value_offset)
        }
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// An Image File Directory located in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ifd {
    /// Absolute buffer position of the entry count field
    pub position: usize,

    /// Declared number of entries (never above [`MAX_IFD_ENTRIES`])
    pub entry_count: u16,

    /// Byte order used to decode the entries
    pub byte_order: ByteOrder,
}

impl Ifd {
    /// Read the directory header at absolute position `position`.
    ///
    /// # Errors
    /// - `InvalidIfdOffset` if the entry count lies outside the buffer
    /// - `TooManyEntries` if the entry count exceeds [`MAX_IFD_ENTRIES`]
    pub fn parse(
        reader: &ByteReader<'_>,
        header: &TiffHeader,
        position: usize,
    ) -> Result<Self, TiffError> {
        let entry_count = reader
            .read_u16(position, header.byte_order)
            .ok_or(TiffError::InvalidIfdOffset(position as u64))?;

        if entry_count > MAX_IFD_ENTRIES {
            return Err(TiffError::TooManyEntries {
                count: entry_count,
                limit: MAX_IFD_ENTRIES,
            });
        }

        Ok(Ifd {
            position,
            entry_count,
            byte_order: header.byte_order,
        })
    }

    /// Absolute buffer position of the `index`-th entry.
    #[inline]
    pub fn entry_position(&self, index: u16) -> Option<usize> {
        self.position
            .checked_add(IFD_COUNT_SIZE)?
            .checked_add(index as usize * IFD_ENTRY_SIZE)
    }

    /// Iterate over the entries that are fully inside the buffer.
    ///
    /// Iteration stops at the first entry that would cross the end of the
    /// buffer, even if the declared count is larger.
    pub fn entries<'a>(&self, reader: ByteReader<'a>) -> IfdEntries<'a> {
        IfdEntries {
            reader,
            ifd: *self,
            index: 0,
        }
    }
}

/// Iterator over the entries of an [`Ifd`].
pub struct IfdEntries<'a> {
    reader: ByteReader<'a>,
    ifd: Ifd,
    index: u16,
}

impl Iterator for IfdEntries<'_> {
    type Item = IfdEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.ifd.entry_count {
            return None;
        }

        let position = self.ifd.entry_position(self.index)?;
        match IfdEntry::read(&self.reader, position, self.ifd.byte_order) {
            Some(entry) => {
                self.index += 1;
                Some(entry)
            }
            None => {
                // Truncated directory: stop for good
                self.index = self.ifd.entry_count;
                None
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
