//! EXIF metadata extraction.
//!
//! [`extract_exif`] takes the raw bytes of a JPEG file and returns the camera
//! fields it could decode:
//!
//! 1. The segment scanner finds the APP1 `"Exif"` payload
//! 2. The TIFF header gives the byte order and the position of IFD0
//! 3. IFD0 is walked entry by entry; known tags become fields
//! 4. The Exif SubIFD pointer is followed once and walked the same way
//!
//! Decoding never fails. Anything malformed ends the walk at that point and
//! the fields already found are returned.

mod decoder;
mod record;

pub use decoder::{decode_directory, decode_tiff, extract_exif, MAX_DIRECTORY_DEPTH};
pub use record::{ExifMetadata, MetadataValue};
