//! TIFF structure parsing for EXIF payloads.
//!
//! # Key Concepts
//!
//! - **Byte order**: The payload declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **Relative offsets**: Every offset inside the payload is relative to the
//!   start of the TIFF header, not to the start of the JPEG file.
//!
//! - **Inline vs offset values**: Values of four bytes or less are stored in
//!   the entry itself, larger values at an offset pointed to by the entry.

mod parser;
mod tags;
mod values;

pub use parser::{
    Ifd, IfdEntries, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, MAX_IFD_ENTRIES,
    TIFF_HEADER_SIZE,
};
pub use tags::{ExifTag, FieldType};
pub use values::{
    exposure_program_name, flash_description, format_aperture, format_exposure_time,
    format_focal_length, metering_mode_name, white_balance_name, Rational,
};
