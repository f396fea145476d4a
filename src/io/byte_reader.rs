//! Bounds-checked access to an in-memory byte buffer.
//!
//! Every read in the decoder goes through [`ByteReader`]. A read that would
//! touch a byte outside the buffer returns `None` instead of panicking, which
//! lets the higher layers treat truncated or corrupt files as "nothing more to
//! extract" rather than as a failure.

// =============================================================================
// ByteOrder
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
pub const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
pub const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Byte order (endianness) of multi-byte values.
///
/// JPEG marker codes and segment lengths are always big-endian. Values
/// inside an EXIF payload use whatever order the TIFF header declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Map a TIFF byte-order signature to a byte order.
    ///
    /// The signature is two identical ASCII bytes, so it reads the same in
    /// either order. Returns `None` for anything other than "II" or "MM".
    pub fn from_signature(signature: u16) -> Option<Self> {
        match signature {
            BYTE_ORDER_LITTLE_ENDIAN => Some(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Decode a u16 from exactly two bytes.
    #[inline]
    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Decode a u32 from exactly four bytes.
    #[inline]
    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

// =============================================================================
// ByteReader
// =============================================================================

/// Read-only, bounds-checked view over a complete file buffer.
///
/// Offsets are absolute positions in the buffer. The reader is `Copy` and
/// borrows the buffer, so it can be handed to every stage of the decoder
/// without cloning any bytes.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that `len` bytes starting at `offset` lie inside the buffer.
    #[inline]
    pub fn contains(&self, offset: usize, len: usize) -> bool {
        matches!(offset.checked_add(len), Some(end) if end <= self.data.len())
    }

    /// Return the byte window `[offset, offset + len)`, or `None` if any part
    /// of it falls outside the buffer.
    ///
    /// This is the only place that indexes into the buffer.
    #[inline]
    pub fn read(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.read(offset, 1).map(|b| b[0])
    }

    /// Read a u16 using the given byte order.
    #[inline]
    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Option<u16> {
        self.read(offset, 2).map(|b| order.u16_from([b[0], b[1]]))
    }

    /// Read a u32 using the given byte order.
    #[inline]
    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Option<u32> {
        self.read(offset, 4)
            .map(|b| order.u32_from([b[0], b[1], b[2], b[3]]))
    }

    /// Read a big-endian u16, the layout of JPEG markers and segment lengths.
    #[inline]
    pub fn read_u16_be(&self, offset: usize) -> Option<u16> {
        self.read_u16(offset, ByteOrder::BigEndian)
    }

    /// Read a NUL-terminated ASCII string of at most `max_len` bytes.
    ///
    /// The window is clamped to the end of the buffer and the string stops at
    /// the first zero byte. Each byte maps to the code point of the same value,
    /// and surrounding whitespace is trimmed. An offset at or past the end of
    /// the buffer yields an empty string.
    pub fn read_string(&self, offset: usize, max_len: usize) -> String {
        let available = self.data.len().saturating_sub(offset);
        let len = max_len.min(available);
        if len == 0 {
            return String::new();
        }

        let Some(bytes) = self.read(offset, len) else {
            return String::new();
        };

        let text: String = bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();

        text.trim().to_string()
    }
}
