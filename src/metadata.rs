//! Merging file attributes and EXIF fields into one flat record.
//!
//! [`assemble`] puts the attributes known from the file itself first
//! (name, size, type, modification time, pixel dimensions) and then appends
//! every EXIF field whose name is not already taken. The result serializes
//! to a flat JSON object and can be grouped into display sections.

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::exif::{ExifMetadata, MetadataValue};

// =============================================================================
// Field Names
// =============================================================================

pub const FILE_NAME: &str = "fileName";
pub const FILE_SIZE: &str = "fileSize";
pub const FILE_TYPE: &str = "fileType";
pub const LAST_MODIFIED: &str = "lastModified";
pub const DIMENSIONS: &str = "dimensions";
pub const RESOLUTION: &str = "resolution";
pub const CREATION_DATE: &str = "creationDate";

/// Camera fields in display order, with their labels.
const CAMERA_FIELDS: &[(&str, &str)] = &[
    ("Make", "Camera Make"),
    ("Model", "Camera Model"),
    ("iso", "ISO Speed"),
    ("exposureTime", "Exposure Time"),
    ("aperture", "Aperture (F-Stop)"),
    ("focalLength", "Focal Length"),
    ("exposureProgram", "Exposure Program"),
    ("meteringMode", "Metering Mode"),
    ("flash", "Flash"),
    ("whiteBalance", "White Balance"),
];

/// Fields shown in the basic section.
const BASIC_FIELDS: &[&str] = &[
    FILE_NAME,
    FILE_SIZE,
    FILE_TYPE,
    DIMENSIONS,
    RESOLUTION,
    LAST_MODIFIED,
    CREATION_DATE,
];

/// Format used for `lastModified`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Basic Attributes
// =============================================================================

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Attributes of the file itself, obtained without looking at EXIF.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicAttributes {
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub last_modified: Option<DateTime<Local>>,
    pub dimensions: Option<Dimensions>,
}

impl BasicAttributes {
    pub fn new(file_name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            last_modified: None,
            dimensions: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Local>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Dimensions { width, height });
        self
    }
}

/// Format a byte count as kilobytes with two decimals, rounding half up.
pub fn format_file_size(size_bytes: u64) -> String {
    let hundredths = (size_bytes as u128 * 200 + 1024) / 2048;
    format!("{}.{:02} KB", hundredths / 100, hundredths % 100)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// ImageMetadata
// =============================================================================

/// The merged metadata record.
///
/// Fields keep the order in which they were added. A field, once set, is
/// never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    fields: Vec<(String, MetadataValue)>,
}

impl ImageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field unless one of the same name exists. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> bool {
        let name = name.into();
        if self.contains_key(&name) {
            return false;
        }
        self.fields.push((name, value.into()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Group the fields into display sections.
    ///
    /// Sections are basic file information, camera settings, and everything
    /// else. Empty sections are left out. Resolution is shown in preference
    /// to the bare dimensions.
    pub fn sections(&self) -> Vec<Section> {
        let mut basic = Section::new("Basic Information");
        basic.push_field(self, "File Name", FILE_NAME);
        basic.push_field(self, "File Size", FILE_SIZE);
        basic.push_field(self, "File Type", FILE_TYPE);
        if !basic.push_field(self, "Resolution", RESOLUTION) {
            basic.push_field(self, "Resolution", DIMENSIONS);
        }
        basic.push_field(self, "Last Modified", LAST_MODIFIED);
        basic.push_field(self, "Creation Date", CREATION_DATE);

        let mut camera = Section::new("Camera Information");
        for (name, label) in CAMERA_FIELDS {
            camera.push_field(self, label, name);
        }

        let mut other = Section::new("Other");
        for (name, value) in self.iter() {
            let shown = BASIC_FIELDS.contains(&name)
                || CAMERA_FIELDS.iter().any(|(camera_name, _)| *camera_name == name);
            if !shown {
                other.rows.push((name.to_string(), value.to_string()));
            }
        }

        [basic, camera, other]
            .into_iter()
            .filter(|section| !section.rows.is_empty())
            .collect()
    }
}

impl Serialize for ImageMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A titled group of `(label, value)` rows for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn push_field(&mut self, metadata: &ImageMetadata, label: &str, name: &str) -> bool {
        match metadata.get(name) {
            Some(value) => {
                self.rows.push((label.to_string(), value.to_string()));
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Merge basic attributes with decoded EXIF fields.
///
/// Basic attributes come first. EXIF fields are appended in decode order and
/// never replace a basic attribute of the same name.
pub fn assemble(basic: &BasicAttributes, exif: &ExifMetadata) -> ImageMetadata {
    let mut metadata = ImageMetadata::new();

    metadata.insert(FILE_NAME, basic.file_name.as_str());
    metadata.insert(FILE_SIZE, format_file_size(basic.size_bytes));
    metadata.insert(FILE_TYPE, basic.mime_type.as_str());
    if let Some(last_modified) = &basic.last_modified {
        metadata.insert(LAST_MODIFIED, format_timestamp(last_modified));
    }
    if let Some(Dimensions { width, height }) = basic.dimensions {
        metadata.insert(DIMENSIONS, format!("{} × {}", width, height));
        metadata.insert(RESOLUTION, format!("{} × {} pixels", width, height));
    }

    for (name, value) in exif.iter() {
        metadata.insert(name, value.clone());
    }

    metadata
}

// =============================================================================
// Tests
// =============================================================================
