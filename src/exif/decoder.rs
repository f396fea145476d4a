//! EXIF directory walk and tag dispatch.
//!
//! The walk is a pure function over the input buffer. Every anomaly ends the
//! affected part of the walk and is logged at debug or trace level; the
//! fields found up to that point are kept.

use tracing::{debug, trace};

use crate::error::TiffError;
use crate::format::jpeg::locate_exif;
use crate::format::tiff::{
    exposure_program_name, flash_description, format_aperture, format_exposure_time,
    format_focal_length, metering_mode_name, white_balance_name, ExifTag, FieldType, Ifd,
    IfdEntry, Rational, TiffHeader,
};
use crate::io::ByteReader;

use super::record::{ExifMetadata, MetadataValue};

/// Deepest directory level that is walked. IFD0 is level 0 and the Exif
/// SubIFD is level 1; pointers found in the SubIFD are not followed.
pub const MAX_DIRECTORY_DEPTH: u8 = 1;

// =============================================================================
// Entry Point
// =============================================================================

/// Extract EXIF fields from a complete JPEG buffer.
///
/// Never fails: a buffer that is not a JPEG, has no EXIF segment, or is
/// corrupt yields the fields that could be decoded before the problem,
/// possibly none.
pub fn extract_exif(data: &[u8]) -> ExifMetadata {
    let reader = ByteReader::new(data);
    let mut metadata = ExifMetadata::new();

    let tiff_base = match locate_exif(&reader) {
        Ok(base) => base,
        Err(err) => {
            debug!(error = %err, "No EXIF payload");
            return metadata;
        }
    };

    if let Err(err) = decode_tiff(&reader, tiff_base, &mut metadata) {
        debug!(error = %err, tiff_base, "EXIF decode stopped early");
    }

    debug!(fields = metadata.len(), "EXIF decode finished");
    metadata
}

/// Decode the TIFF payload that starts at absolute position `tiff_base`.
///
/// Fields are added to `metadata` as they are found, so on error it holds
/// everything decoded before the failure.
pub fn decode_tiff(
    reader: &ByteReader<'_>,
    tiff_base: usize,
    metadata: &mut ExifMetadata,
) -> Result<(), TiffError> {
    let header = TiffHeader::parse(reader, tiff_base)?;
    trace!(byte_order = ?header.byte_order, ifd0 = header.first_ifd_offset, "TIFF header");

    let position = header
        .first_ifd_position()
        .ok_or(TiffError::InvalidIfdOffset(header.first_ifd_offset as u64))?;

    decode_directory(reader, &header, position, 0, metadata)
}

// =============================================================================
// Directory Walk
// =============================================================================

/// Walk one directory, dispatching each entry.
///
/// `depth` is 0 for IFD0. A SubIFD pointer is followed only while `depth` is
/// below [`MAX_DIRECTORY_DEPTH`]; a failure inside the SubIFD does not stop
/// the walk of the enclosing directory.
pub fn decode_directory(
    reader: &ByteReader<'_>,
    header: &TiffHeader,
    position: usize,
    depth: u8,
    metadata: &mut ExifMetadata,
) -> Result<(), TiffError> {
    let ifd = Ifd::parse(reader, header, position)?;
    trace!(position, depth, entries = ifd.entry_count, "Walking directory");

    for entry in ifd.entries(*reader) {
        match dispatch_entry(reader, header, &entry) {
            TagOutcome::Found { field, value } => {
                trace!(tag = entry.tag_id, field, %value, "Decoded field");
                metadata.insert(field, value);
            }
            TagOutcome::SubIfd(sub_position) if depth < MAX_DIRECTORY_DEPTH => {
                if let Err(err) =
                    decode_directory(reader, header, sub_position, depth + 1, metadata)
                {
                    debug!(error = %err, sub_position, "SubIFD decode stopped early");
                }
            }
            TagOutcome::SubIfd(sub_position) => {
                trace!(sub_position, depth, "Nested SubIFD pointer not followed");
            }
            TagOutcome::TypeMismatch { expected, actual } => {
                trace!(tag = entry.tag_id, ?expected, actual, "Skipping entry with wrong type");
            }
            TagOutcome::OutOfBounds => {
                trace!(tag = entry.tag_id, "Skipping entry with out of bounds value");
            }
            TagOutcome::InvalidValue => {
                trace!(tag = entry.tag_id, "Skipping entry with unusable value");
            }
            TagOutcome::Unrecognized => {}
        }
    }

    Ok(())
}

// =============================================================================
// Tag Dispatch
// =============================================================================

/// What a single directory entry contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagOutcome {
    /// A field was decoded
    Found {
        field: &'static str,
        value: MetadataValue,
    },

    /// The entry points to a SubIFD at this absolute position
    SubIfd(usize),

    /// A known tag carried a type it is not decoded from
    TypeMismatch { expected: FieldType, actual: u16 },

    /// The value lies outside the buffer
    OutOfBounds,

    /// The value was read but cannot be displayed (zero denominator, empty text)
    InvalidValue,

    /// The tag is not one we decode
    Unrecognized,
}

/// Decode one entry into a field, a SubIFD pointer, or a reason to skip it.
pub(crate) fn dispatch_entry(
    reader: &ByteReader<'_>,
    header: &TiffHeader,
    entry: &IfdEntry,
) -> TagOutcome {
    let Some(tag) = ExifTag::from_u16(entry.tag_id) else {
        return TagOutcome::Unrecognized;
    };

    let Some(data_position) = entry
        .data_position(header)
        .filter(|&position| position < reader.len())
    else {
        return TagOutcome::OutOfBounds;
    };

    if tag == ExifTag::ExifIfdPointer {
        return match header.resolve(entry.value_offset) {
            Some(position) => TagOutcome::SubIfd(position),
            None => TagOutcome::OutOfBounds,
        };
    }

    if let Some(expected) = tag.required_type() {
        if entry.field_type != Some(expected) {
            return TagOutcome::TypeMismatch {
                expected,
                actual: entry.field_type_raw,
            };
        }
    }

    // A zero count carries no value, whatever the value field holds
    if entry.count == 0 {
        return TagOutcome::InvalidValue;
    }

    let Some(field) = tag.field_name() else {
        return TagOutcome::Unrecognized;
    };

    match decode_value(reader, header, tag, entry.count, data_position) {
        Ok(value) => TagOutcome::Found { field, value },
        Err(outcome) => outcome,
    }
}

fn decode_value(
    reader: &ByteReader<'_>,
    header: &TiffHeader,
    tag: ExifTag,
    count: u32,
    position: usize,
) -> Result<MetadataValue, TagOutcome> {
    let order = header.byte_order;

    match tag.required_type() {
        Some(FieldType::Ascii) => {
            let window = usize::try_from(count)
                .unwrap_or(usize::MAX)
                .min(tag.max_string_len());
            let text = reader.read_string(position, window);
            // Blank strings are omitted rather than reported as ""
            if text.is_empty() {
                return Err(TagOutcome::InvalidValue);
            }
            Ok(MetadataValue::Text(text))
        }
        Some(FieldType::Short) => {
            let value = reader
                .read_u16(position, order)
                .ok_or(TagOutcome::OutOfBounds)?;
            Ok(match tag {
                ExifTag::ExposureProgram => exposure_program_name(value).into(),
                ExifTag::MeteringMode => metering_mode_name(value).into(),
                ExifTag::Flash => flash_description(value).into(),
                ExifTag::WhiteBalance => white_balance_name(value).into(),
                _ => value.into(),
            })
        }
        Some(FieldType::Rational) => {
            let rational =
                Rational::read(reader, position, order).ok_or(TagOutcome::OutOfBounds)?;
            let text = match tag {
                ExifTag::ExposureTime => format_exposure_time(rational),
                ExifTag::FNumber => format_aperture(rational),
                ExifTag::FocalLength => format_focal_length(rational),
                _ => None,
            };
            text.map(MetadataValue::Text)
                .ok_or(TagOutcome::InvalidValue)
        }
        _ => Err(TagOutcome::Unrecognized),
    }
}

// =============================================================================
// Tests
// =============================================================================
