//! Reading images from disk or memory and producing their metadata.
//!
//! This is the imperative shell around the decoder: it gathers the basic
//! attributes (name, size, type, modification time, pixel dimensions), runs
//! [`extract_exif`] over the bytes, and assembles the result. A file that
//! cannot be read is the only failure; anything wrong with the image content
//! just means fewer fields.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Local};
use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::error::ProbeError;
use crate::exif::extract_exif;
use crate::metadata::{assemble, BasicAttributes, Dimensions, ImageMetadata};

/// MIME type used when the content and the file name are both unrecognized.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// =============================================================================
// Attribute Detection
// =============================================================================

/// Determine the MIME type of an image.
///
/// The content is sniffed first; the file name extension is the fallback.
pub fn detect_mime_type(file_name: &str, data: &[u8]) -> String {
    image::guess_format(data)
        .ok()
        .or_else(|| ImageFormat::from_path(file_name).ok())
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
}

/// Read pixel dimensions from the image header without decoding pixels.
///
/// Returns `None` for formats the decoder does not support or for headers
/// that cannot be parsed.
pub fn read_dimensions(data: &[u8]) -> Option<Dimensions> {
    let reader = match ImageReader::new(Cursor::new(data)).with_guessed_format() {
        Ok(reader) => reader,
        Err(err) => {
            debug!(error = %err, "Could not sniff image format");
            return None;
        }
    };

    match reader.into_dimensions() {
        Ok((width, height)) => Some(Dimensions { width, height }),
        Err(err) => {
            debug!(error = %err, "Could not read image dimensions");
            None
        }
    }
}

// =============================================================================
// Probing
// =============================================================================

/// Produce the metadata of an image held in memory.
///
/// `mime_type` is used as given when present and non-empty; otherwise it is
/// detected from the content and name.
pub fn probe_bytes(
    file_name: &str,
    data: &[u8],
    mime_type: Option<&str>,
    last_modified: Option<DateTime<Local>>,
) -> ImageMetadata {
    let mime_type = match mime_type {
        Some(mime_type) if !mime_type.is_empty() => mime_type.to_string(),
        _ => detect_mime_type(file_name, data),
    };

    let mut basic = BasicAttributes::new(file_name, data.len() as u64, mime_type);
    if let Some(last_modified) = last_modified {
        basic = basic.with_last_modified(last_modified);
    }
    if let Some(Dimensions { width, height }) = read_dimensions(data) {
        basic = basic.with_dimensions(width, height);
    }

    let exif = extract_exif(data);
    debug!(
        file_name,
        size = data.len(),
        exif_fields = exif.len(),
        "Probed image"
    );

    assemble(&basic, &exif)
}

/// Produce the metadata of an image file.
///
/// # Errors
/// - `NotAFile` if the path is not a regular file
/// - `Read` if the file or its attributes cannot be read
pub fn probe_file(path: impl AsRef<Path>) -> Result<ImageMetadata, ProbeError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let attributes = fs::metadata(path).map_err(|err| ProbeError::Read {
        path: display.clone(),
        message: err.to_string(),
    })?;
    if !attributes.is_file() {
        return Err(ProbeError::NotAFile(display));
    }

    let data = fs::read(path).map_err(|err| ProbeError::Read {
        path: display.clone(),
        message: err.to_string(),
    })?;

    let last_modified = attributes.modified().ok().map(DateTime::<Local>::from);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(probe_bytes(&file_name, &data, None, last_modified))
}

// =============================================================================
// Tests
// =============================================================================
