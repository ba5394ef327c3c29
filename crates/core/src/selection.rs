//! The image the user picked for analysis.
//!
//! Format and dimensions are sniffed from the header bytes only; the
//! payload itself is sent untouched.

use std::io::Cursor;

use serde::Serialize;

/// MIME type used when the header does not match a known image format.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Pixel dimensions read from the image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone)]
pub struct ImageSelection {
    file_name: String,
    bytes: Vec<u8>,
    mime_type: &'static str,
    dimensions: Option<ImageDimensions>,
}

impl ImageSelection {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME_TYPE);
        let dimensions = read_dimensions(&bytes);

        Self {
            file_name: file_name.into(),
            bytes,
            mime_type,
            dimensions,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// `None` when the header could not be decoded.
    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A zero-byte file counts as no selection.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSelection")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

fn read_dimensions(bytes: &[u8]) -> Option<ImageDimensions> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some(ImageDimensions { width, height })
}
