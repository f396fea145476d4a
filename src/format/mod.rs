//! Binary container formats walked by the EXIF decoder.
//!
//! - [`jpeg`]: marker segment scanning to find the EXIF APP1 payload
//! - [`tiff`]: the TIFF structure embedded in that payload

pub mod jpeg;
pub mod tiff;

pub use jpeg::{is_jpeg, locate_exif};
