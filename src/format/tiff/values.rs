//! Typed value reading and display formatting.
//!
//! Rationals are formatted from their integer parts where possible so that
//! one-decimal output rounds the exact fraction (half up) instead of the
//! nearest binary float.

use crate::io::{ByteOrder, ByteReader};

// =============================================================================
// Rational
// =============================================================================

/// An unsigned TIFF rational: two u32 values, numerator first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// Create a rational from its parts.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Read a rational at absolute position `position`.
    ///
    /// Both halves must be inside the buffer.
    pub fn read(reader: &ByteReader<'_>, position: usize, byte_order: ByteOrder) -> Option<Self> {
        if !reader.contains(position, 8) {
            return None;
        }
        Some(Self {
            numerator: reader.read_u32(position, byte_order)?,
            denominator: reader.read_u32(position + 4, byte_order)?,
        })
    }

    /// Floating point value, or `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            return None;
        }
        Some(self.numerator as f64 / self.denominator as f64)
    }

    /// The value in tenths, rounded half up. `None` when the denominator is zero.
    pub fn round_tenths(self) -> Option<u64> {
        if self.denominator == 0 {
            return None;
        }
        let numerator = self.numerator as u64 * 20 + self.denominator as u64;
        Some(numerator / (self.denominator as u64 * 2))
    }
}

fn format_one_decimal(value: Rational) -> Option<String> {
    let tenths = value.round_tenths()?;
    Some(format!("{}.{}", tenths / 10, tenths % 10))
}

// =============================================================================
// Rational Formatters
// =============================================================================

/// Format an exposure time.
///
/// Values of one second or more render as `"<v> sec"`; shorter exposures as
/// the reciprocal fraction `"1/<n> sec"`. Zero or an invalid rational yields
/// `None`.
pub fn format_exposure_time(value: Rational) -> Option<String> {
    let seconds = value.to_f64()?;
    if seconds >= 1.0 {
        Some(format!("{} sec", seconds))
    } else if seconds > 0.0 {
        Some(format!("1/{} sec", (1.0 / seconds).round() as u64))
    } else {
        None
    }
}

/// Format an F-number as `"f/<n.n>"`.
pub fn format_aperture(value: Rational) -> Option<String> {
    format_one_decimal(value).map(|n| format!("f/{}", n))
}

/// Format a focal length as `"<n.n> mm"`.
pub fn format_focal_length(value: Rational) -> Option<String> {
    format_one_decimal(value).map(|n| format!("{} mm", n))
}

// =============================================================================
// Enumerated Short Values
// =============================================================================

fn unknown(value: u16) -> String {
    format!("Unknown ({})", value)
}

/// Display name of an ExposureProgram value.
pub fn exposure_program_name(value: u16) -> String {
    let name = match value {
        0 => "Not defined",
        1 => "Manual",
        2 => "Normal program",
        3 => "Aperture priority",
        4 => "Shutter priority",
        5 => "Creative program",
        6 => "Action program",
        7 => "Portrait mode",
        8 => "Landscape mode",
        _ => return unknown(value),
    };
    name.to_string()
}

/// Display name of a MeteringMode value.
pub fn metering_mode_name(value: u16) -> String {
    let name = match value {
        0 => "Unknown",
        1 => "Average",
        2 => "Center-weighted average",
        3 => "Spot",
        4 => "Multi-spot",
        5 => "Pattern",
        6 => "Partial",
        255 => "Other",
        _ => return unknown(value),
    };
    name.to_string()
}

/// Describe the Flash bit field. Only bit 0 (fired) is reported.
pub fn flash_description(value: u16) -> String {
    if value & 0x0001 != 0 {
        "Flash fired".to_string()
    } else {
        "Flash did not fire".to_string()
    }
}

/// Display name of a WhiteBalance value.
pub fn white_balance_name(value: u16) -> String {
    match value {
        0 => "Auto".to_string(),
        1 => "Manual".to_string(),
        _ => unknown(value),
    }
}

// =============================================================================
// Tests
// =============================================================================
