//! # EXIF Probe
//!
//! Camera metadata extraction from JPEG files.
//!
//! The core is a small, dependency-free decoder that walks the JPEG marker
//! chain, finds the APP1 `"Exif"` segment, and decodes the TIFF directories
//! inside it into a flat set of display-ready fields (camera make and model,
//! capture date, ISO, exposure time, aperture, focal length, and a few
//! shooting-mode fields). Around it sit a file probe, an HTTP endpoint and a
//! command line tool.
//!
//! ## Features
//!
//! - **Never fails on bad input**: truncated or corrupt files yield the
//!   fields decoded before the damage, possibly none
//! - **Both byte orders**: little-endian ("II") and big-endian ("MM") payloads
//! - **Bounded work**: every read is bounds-checked and directories are capped
//!   at 200 entries with a single level of SubIFD recursion
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked buffer reader
//! - [`mod@format`] - JPEG segment scanning and TIFF structure parsing
//! - [`exif`] - Directory walk, tag dispatch, and the extracted field map
//! - [`metadata`] - Merging file attributes with EXIF fields
//! - [`probe`] - Reading files and uploads into merged metadata
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_probe::extract_exif;
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! let exif = extract_exif(&data);
//! if let Some(make) = exif.get("Make") {
//!     println!("Shot on {}", make);
//! }
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;
pub mod metadata;
pub mod probe;
pub mod server;

// Re-export commonly used types
pub use config::{Cli, Command, InspectConfig, OutputFormat, ServeConfig};
pub use error::{JpegError, ProbeError, ServerError, TiffError};
pub use exif::{extract_exif, ExifMetadata, MetadataValue};
pub use format::tiff::{ExifTag, FieldType, Rational, TiffHeader};
pub use format::{is_jpeg, locate_exif};
pub use io::{ByteOrder, ByteReader};
pub use metadata::{assemble, BasicAttributes, Dimensions, ImageMetadata, Section};
pub use probe::{probe_bytes, probe_file};
pub use server::{create_router, ErrorResponse, RouterConfig};
