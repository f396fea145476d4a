//! End-to-end decoder tests over complete JPEG buffers.
//!
//! Tests verify:
//! - Non-JPEG and undersized input yields no fields
//! - Field decoding and formatting for IFD0 and the Exif SubIFD
//! - Identical results for little-endian and big-endian payloads
//! - Graceful degradation on truncated, capped or mutated input

use exif_probe::{extract_exif, ByteOrder, ExifMetadata, MetadataValue};

use super::test_utils::{
    camera_jpeg, camera_tiff, exif_segment, jpeg_with_exif, jpeg_with_segments, segment,
    u16_bytes, Directory, TiffBuilder, TAG_EXIF_IFD_POINTER, TAG_EXPOSURE_TIME, TAG_F_NUMBER,
    TAG_FOCAL_LENGTH, TAG_ISO, TAG_MAKE, TAG_MODEL,
};

fn text<'a>(metadata: &'a ExifMetadata, name: &str) -> Option<&'a str> {
    metadata.get(name).and_then(MetadataValue::as_text)
}

fn decode_ifd0(directory: Directory) -> ExifMetadata {
    extract_exif(&jpeg_with_exif(
        &TiffBuilder::little_endian().ifd0(directory).build(),
    ))
}

// =============================================================================
// Format Mismatch
// =============================================================================

#[test]
fn test_short_buffers_are_empty() {
    let jpeg = camera_jpeg(ByteOrder::LittleEndian);
    for len in 0..12 {
        assert!(extract_exif(&jpeg[..len]).is_empty(), "length {}", len);
    }
}

#[test]
fn test_non_jpeg_is_empty() {
    let tiff = camera_tiff(ByteOrder::LittleEndian);
    assert!(extract_exif(&tiff).is_empty());

    let mut png_like = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png_like.extend(exif_segment(&tiff));
    assert!(extract_exif(&png_like).is_empty());

    let mut swapped = camera_jpeg(ByteOrder::LittleEndian);
    swapped[1] = 0xD9;
    assert!(extract_exif(&swapped).is_empty());
}

#[test]
fn test_jpeg_without_exif_is_empty() {
    let jpeg = jpeg_with_segments(&[]);
    assert!(extract_exif(&jpeg).is_empty());
}

// =============================================================================
// Field Decoding
// =============================================================================

#[test]
fn test_make_decoded() {
    let metadata = decode_ifd0(Directory::new().ascii(TAG_MAKE, "Canon"));
    assert_eq!(text(&metadata, "Make"), Some("Canon"));
    assert_eq!(metadata.len(), 1);
}

#[test]
fn test_camera_sample_fields() {
    let metadata = extract_exif(&camera_jpeg(ByteOrder::LittleEndian));

    assert_eq!(text(&metadata, "Make"), Some("Canon"));
    assert_eq!(text(&metadata, "Model"), Some("Canon EOS 5D Mark IV"));
    assert_eq!(text(&metadata, "creationDate"), Some("2023:07:14 18:22:05"));
    assert_eq!(text(&metadata, "exposureTime"), Some("1/250 sec"));
    assert_eq!(text(&metadata, "aperture"), Some("f/2.8"));
    assert_eq!(text(&metadata, "focalLength"), Some("50.0 mm"));
    assert_eq!(metadata.get("iso"), Some(&MetadataValue::Number(400)));
    assert_eq!(text(&metadata, "exposureProgram"), Some("Aperture priority"));
    assert_eq!(text(&metadata, "meteringMode"), Some("Pattern"));
    assert_eq!(text(&metadata, "flash"), Some("Flash did not fire"));
    assert_eq!(text(&metadata, "whiteBalance"), Some("Auto"));
    assert_eq!(metadata.len(), 11);
}

#[test]
fn test_exposure_time_rules() {
    let cases: [(u32, u32, Option<&str>); 5] = [
        (1, 250, Some("1/250 sec")),
        (2, 1, Some("2 sec")),
        (10, 4, Some("2.5 sec")),
        (1, 0, None),
        (0, 1, None),
    ];
    for (numerator, denominator, expected) in cases {
        let metadata =
            decode_ifd0(Directory::new().rational(TAG_EXPOSURE_TIME, numerator, denominator));
        assert_eq!(
            text(&metadata, "exposureTime"),
            expected,
            "{}/{}",
            numerator,
            denominator
        );
    }
}

#[test]
fn test_aperture_and_focal_length() {
    let metadata = decode_ifd0(
        Directory::new()
            .rational(TAG_F_NUMBER, 28, 10)
            .rational(TAG_FOCAL_LENGTH, 35, 2),
    );
    assert_eq!(text(&metadata, "aperture"), Some("f/2.8"));
    assert_eq!(text(&metadata, "focalLength"), Some("17.5 mm"));
}

#[test]
fn test_ifd0_exposure_tags_extracted() {
    let metadata = decode_ifd0(
        Directory::new()
            .short(TAG_ISO, 1600)
            .rational(TAG_EXPOSURE_TIME, 1, 30),
    );
    assert_eq!(metadata.get("iso"), Some(&MetadataValue::Number(1600)));
    assert_eq!(text(&metadata, "exposureTime"), Some("1/30 sec"));
}

#[test]
fn test_sub_ifd_iso_without_ifd0_iso() {
    let tiff = TiffBuilder::little_endian()
        .ifd0(Directory::new().ascii(TAG_MODEL, "X100V"))
        .sub_ifd(Directory::new().short(TAG_ISO, 400))
        .build();
    let metadata = extract_exif(&jpeg_with_exif(&tiff));

    assert_eq!(metadata.get("iso"), Some(&MetadataValue::Number(400)));
    assert_eq!(text(&metadata, "Model"), Some("X100V"));
}

#[test]
fn test_inline_ascii() {
    let metadata = decode_ifd0(Directory::new().ascii(TAG_MAKE, "LG"));
    assert_eq!(text(&metadata, "Make"), Some("LG"));

    let metadata = decode_ifd0(
        Directory::new()
            .raw(TAG_MAKE, 2, 0, &[])
            .ascii(TAG_MODEL, "G8"),
    );
    assert!(!metadata.contains_key("Make"));
    assert_eq!(text(&metadata, "Model"), Some("G8"));
}

#[test]
fn test_ascii_read_stops_at_count() {
    let metadata = decode_ifd0(
        Directory::new()
            .raw(TAG_MAKE, 2, 5, b"CanonEOS R5\0")
            .raw(TAG_MODEL, 2, 4, b"X-T5"),
    );
    assert_eq!(text(&metadata, "Make"), Some("Canon"));
    assert_eq!(text(&metadata, "Model"), Some("X-T5"));
}

#[test]
fn test_blank_strings_omitted() {
    let metadata = decode_ifd0(
        Directory::new()
            .ascii(TAG_MAKE, "")
            .ascii(TAG_MODEL, "    ")
            .short(TAG_ISO, 200),
    );
    assert!(!metadata.contains_key("Make"));
    assert!(!metadata.contains_key("Model"));
    assert_eq!(metadata.len(), 1);
}

// =============================================================================
// Skipped Entries
// =============================================================================

#[test]
fn test_type_mismatch_skips_single_field() {
    let metadata = decode_ifd0(
        Directory::new()
            .long(TAG_ISO, 400)
            .raw(TAG_MAKE, 7, 5, b"Sony\0")
            .ascii(TAG_MODEL, "ILCE-7M3")
            .rational(TAG_F_NUMBER, 4, 1),
    );
    assert!(!metadata.contains_key("iso"));
    assert!(!metadata.contains_key("Make"));
    assert_eq!(text(&metadata, "Model"), Some("ILCE-7M3"));
    assert_eq!(text(&metadata, "aperture"), Some("f/4.0"));
}

#[test]
fn test_unknown_tags_ignored() {
    let metadata = decode_ifd0(
        Directory::new()
            .short(0x0112, 6)
            .long(0x8825, 1234)
            .raw(0x927C, 7, 8, &[0xAB; 8])
            .ascii(TAG_MAKE, "Apple"),
    );
    assert_eq!(metadata.len(), 1);
    assert_eq!(text(&metadata, "Make"), Some("Apple"));
}

#[test]
fn test_non_exif_app1_skipped() {
    let xmp = segment(0xFFE1, b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>");
    let tiff = TiffBuilder::little_endian()
        .ifd0(Directory::new().ascii(TAG_MAKE, "FUJIFILM"))
        .build();
    let jpeg = jpeg_with_segments(&[xmp, exif_segment(&tiff)]);

    assert_eq!(text(&extract_exif(&jpeg), "Make"), Some("FUJIFILM"));
}

#[test]
fn test_only_first_exif_segment_used() {
    let first = TiffBuilder::little_endian()
        .ifd0(Directory::new().ascii(TAG_MAKE, "First"))
        .build();
    let second = TiffBuilder::little_endian()
        .ifd0(Directory::new().ascii(TAG_MODEL, "Second"))
        .build();
    let jpeg = jpeg_with_segments(&[exif_segment(&first), exif_segment(&second)]);

    let metadata = extract_exif(&jpeg);
    assert_eq!(text(&metadata, "Make"), Some("First"));
    assert!(!metadata.contains_key("Model"));
}

#[test]
fn test_invalid_byte_order_is_empty() {
    let mut tiff = camera_tiff(ByteOrder::LittleEndian);
    tiff[0] = b'I';
    tiff[1] = b'M';
    assert!(extract_exif(&jpeg_with_exif(&tiff)).is_empty());
}

// =============================================================================
// Byte Order
// =============================================================================

#[test]
fn test_big_endian_matches_little_endian() {
    let little = extract_exif(&camera_jpeg(ByteOrder::LittleEndian));
    let big = extract_exif(&camera_jpeg(ByteOrder::BigEndian));

    assert_eq!(little.len(), 11);
    assert_eq!(little, big);
}

#[test]
fn test_big_endian_header_bytes() {
    let tiff = camera_tiff(ByteOrder::BigEndian);
    assert_eq!(&tiff[..4], &[0x4D, 0x4D, 0x00, 0x2A]);
    assert_eq!(
        text(&extract_exif(&jpeg_with_exif(&tiff)), "exposureTime"),
        Some("1/250 sec")
    );
}

// =============================================================================
// Safety Caps
// =============================================================================

fn ifd0_with_capped_sub_ifd(order: ByteOrder) -> Vec<u8> {
    let sized = TiffBuilder::new(order)
        .ifd0(
            Directory::new()
                .ascii(TAG_MAKE, "Canon")
                .long(TAG_EXIF_IFD_POINTER, 0),
        )
        .build();
    let sub_offset = sized.len() as u32;

    let mut tiff = TiffBuilder::new(order)
        .ifd0(
            Directory::new()
                .ascii(TAG_MAKE, "Canon")
                .long(TAG_EXIF_IFD_POINTER, sub_offset),
        )
        .build();
    tiff.extend_from_slice(&u16_bytes(order, 60000));
    tiff.extend_from_slice(&[0u8; 48]);
    tiff
}

#[test]
fn test_entry_cap_on_ifd0() {
    let mut tiff = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    tiff.extend_from_slice(&60000u16.to_le_bytes());
    for _ in 0..4 {
        tiff.extend_from_slice(&TAG_MAKE.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&4u32.to_le_bytes());
        tiff.extend_from_slice(b"abc\0");
    }

    assert!(extract_exif(&jpeg_with_exif(&tiff)).is_empty());
}

#[test]
fn test_entry_cap_on_sub_ifd_keeps_ifd0() {
    let metadata = extract_exif(&jpeg_with_exif(&ifd0_with_capped_sub_ifd(
        ByteOrder::LittleEndian,
    )));
    assert_eq!(metadata.len(), 1);
    assert_eq!(text(&metadata, "Make"), Some("Canon"));
}

#[test]
fn test_sub_ifd_pointer_loop_terminates() {
    // The SubIFD points back at IFD0
    let tiff = TiffBuilder::big_endian()
        .ifd0(Directory::new().ascii(TAG_MAKE, "Loop"))
        .sub_ifd(
            Directory::new()
                .long(TAG_EXIF_IFD_POINTER, 8)
                .short(TAG_ISO, 100),
        )
        .build();
    let metadata = extract_exif(&jpeg_with_exif(&tiff));

    assert_eq!(text(&metadata, "Make"), Some("Loop"));
    assert_eq!(metadata.get("iso"), Some(&MetadataValue::Number(100)));
}

// =============================================================================
// Degradation
// =============================================================================

/// Every field of `partial` must be in `full` with the same value, except
/// that strings cut off by the end of the buffer may be a prefix.
fn assert_degraded_subset(partial: &ExifMetadata, full: &ExifMetadata, cut: usize) {
    for (name, value) in partial.iter() {
        let expected = full
            .get(name)
            .unwrap_or_else(|| panic!("cut {}: unexpected field {}", cut, name));
        match (value, expected) {
            (MetadataValue::Text(got), MetadataValue::Text(want)) => {
                assert!(
                    want.starts_with(got.as_str()),
                    "cut {}: {} = {:?}, expected prefix of {:?}",
                    cut,
                    name,
                    got,
                    want
                );
            }
            _ => assert_eq!(value, expected, "cut {}: field {}", cut, name),
        }
    }
}

#[test]
fn test_truncation_is_monotonic() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let jpeg = camera_jpeg(order);
        let full = extract_exif(&jpeg);

        for cut in 0..=jpeg.len() {
            let partial = extract_exif(&jpeg[..cut]);
            assert_degraded_subset(&partial, &full, cut);
        }

        assert_eq!(extract_exif(&jpeg[..jpeg.len()]), full);
    }
}

#[test]
fn test_truncation_eventually_drops_everything() {
    let jpeg = camera_jpeg(ByteOrder::LittleEndian);
    // SOI + APP0 (18) + APP1 header (10) + TIFF header (8)
    assert!(extract_exif(&jpeg[..2 + 18 + 10 + 8]).is_empty());
}

#[test]
fn test_mutated_buffers_never_panic() {
    let original = camera_jpeg(ByteOrder::LittleEndian);
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for _ in 0..2000 {
        let mut mutated = original.clone();
        let flips = 1 + (next() % 8) as usize;
        for _ in 0..flips {
            let index = (next() % mutated.len() as u64) as usize;
            mutated[index] = next() as u8;
        }
        let _ = extract_exif(&mutated);
    }
}
