use thiserror::Error;

/// Reasons the JPEG segment scan did not reach an EXIF payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JpegError {
    /// Buffer is too small to hold a JPEG with an EXIF segment
    #[error("Buffer too small: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// First two bytes are not the start-of-image marker
    #[error("Not a JPEG stream: expected SOI 0xFFD8, got 0x{0:04X}")]
    NotJpeg(u16),

    /// Marker chain broken (out of bounds or missing 0xFF prefix)
    #[error("Broken marker chain at offset {offset}")]
    BrokenMarker { offset: usize },

    /// Segment length field too small for the segment type
    #[error("Invalid segment length {length} at offset {offset}")]
    InvalidSegmentLength { offset: usize, length: u16 },

    /// Marker chain ended without an APP1 "Exif" segment
    #[error("No EXIF segment found")]
    NoExifSegment,
}

/// Errors that can occur when parsing the TIFF structure inside an EXIF payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Not enough bytes for the TIFF header
    #[error("TIFF header truncated at offset {offset}")]
    HeaderTruncated { offset: usize },

    /// Invalid byte-order signature (not II or MM)
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// IFD offset points outside the buffer
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// IFD entry count above the safety cap
    #[error("IFD entry count {count} exceeds limit of {limit}")]
    TooManyEntries { count: u16, limit: u16 },
}

/// Errors from probing a file on disk
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// The file could not be opened or read
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The path does not refer to a regular file
    #[error("Not a file: {0}")]
    NotAFile(String),
}

/// Errors surfaced by the HTTP layer
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    /// The multipart form had no `image` field
    #[error("No image file provided")]
    MissingImage,

    /// The request body could not be parsed as multipart form data
    #[error("Invalid multipart request: {0}")]
    InvalidMultipart(String),

    /// The upload exceeded the configured body limit
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    /// Anything else that went wrong while handling the upload
    #[error("Failed to process image: {0}")]
    Processing(String),
}
