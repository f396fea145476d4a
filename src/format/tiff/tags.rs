//! TIFF field type and EXIF tag definitions.
//!
//! This module defines the vocabulary for decoding EXIF directories:
//! - Field types that determine how values are encoded
//! - Tag IDs that identify the metadata fields we extract

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// The unit size of a type decides whether an entry's value fits in the
/// 4-byte value field of the entry or lives elsewhere in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two Longs: numerator then denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SByte = 6,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two SLongs: numerator then denominator (8 bytes)
    SRational = 10,

    /// IEEE single precision float (4 bytes)
    Float = 11,

    /// IEEE double precision float (8 bytes)
    Double = 12,
}

impl FieldType {
    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Check if `count` values of this type fit in the 4-byte value field.
    ///
    /// A zero count holds nothing, so it is never inline.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        count > 0 && self.size_in_bytes() as u64 * count as u64 <= Self::INLINE_THRESHOLD
    }
}

// =============================================================================
// EXIF Tags
// =============================================================================

/// Tag IDs recognised by the decoder.
///
/// IFD0 and the Exif SubIFD share this table. Tags not listed here are
/// ignored during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // Camera identification
    // -------------------------------------------------------------------------
    /// Camera manufacturer
    Make = 0x010F,

    /// Camera model
    Model = 0x0110,

    /// Date and time the picture was taken ("YYYY:MM:DD HH:MM:SS")
    DateTimeOriginal = 0x9003,

    // -------------------------------------------------------------------------
    // Exposure
    // -------------------------------------------------------------------------
    /// Exposure time in seconds
    ExposureTime = 0x829A,

    /// F-number of the lens
    FNumber = 0x829D,

    /// Class of program used to set exposure
    ExposureProgram = 0x8822,

    /// ISO speed rating
    IsoSpeed = 0x8827,

    /// Metering mode
    MeteringMode = 0x9207,

    /// Flash status bits
    Flash = 0x9209,

    /// Lens focal length in millimetres
    FocalLength = 0x920A,

    /// White balance mode
    WhiteBalance = 0xA403,

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------
    /// Offset of the Exif SubIFD, relative to the TIFF header
    ExifIfdPointer = 0x8769,
}

impl ExifTag {
    /// Create an ExifTag from its numeric value.
    ///
    /// Returns `None` for unrecognized tags. Unknown tags are not an error;
    /// they are simply ignored during decoding.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x010F => Some(ExifTag::Make),
            0x0110 => Some(ExifTag::Model),
            0x9003 => Some(ExifTag::DateTimeOriginal),
            0x829A => Some(ExifTag::ExposureTime),
            0x829D => Some(ExifTag::FNumber),
            0x8822 => Some(ExifTag::ExposureProgram),
            0x8827 => Some(ExifTag::IsoSpeed),
            0x9207 => Some(ExifTag::MeteringMode),
            0x9209 => Some(ExifTag::Flash),
            0x920A => Some(ExifTag::FocalLength),
            0xA403 => Some(ExifTag::WhiteBalance),
            0x8769 => Some(ExifTag::ExifIfdPointer),
            _ => None,
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Name of the metadata field this tag populates.
    ///
    /// The pointer tag populates nothing itself.
    pub const fn field_name(self) -> Option<&'static str> {
        match self {
            ExifTag::Make => Some("Make"),
            ExifTag::Model => Some("Model"),
            ExifTag::DateTimeOriginal => Some("creationDate"),
            ExifTag::ExposureTime => Some("exposureTime"),
            ExifTag::FNumber => Some("aperture"),
            ExifTag::ExposureProgram => Some("exposureProgram"),
            ExifTag::IsoSpeed => Some("iso"),
            ExifTag::MeteringMode => Some("meteringMode"),
            ExifTag::Flash => Some("flash"),
            ExifTag::FocalLength => Some("focalLength"),
            ExifTag::WhiteBalance => Some("whiteBalance"),
            ExifTag::ExifIfdPointer => None,
        }
    }

    /// Field type a tag must carry to be decoded.
    ///
    /// The pointer tag is followed regardless of its declared type.
    pub const fn required_type(self) -> Option<FieldType> {
        match self {
            ExifTag::Make | ExifTag::Model | ExifTag::DateTimeOriginal => Some(FieldType::Ascii),
            ExifTag::ExposureTime | ExifTag::FNumber | ExifTag::FocalLength => {
                Some(FieldType::Rational)
            }
            ExifTag::IsoSpeed
            | ExifTag::ExposureProgram
            | ExifTag::MeteringMode
            | ExifTag::Flash
            | ExifTag::WhiteBalance => Some(FieldType::Short),
            ExifTag::ExifIfdPointer => None,
        }
    }

    /// Maximum number of bytes read for an ASCII tag.
    pub const fn max_string_len(self) -> usize {
        match self {
            ExifTag::DateTimeOriginal => 20,
            _ => 100,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
