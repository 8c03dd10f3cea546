//! Binary payloads exchanged with hosts.
//!
//! A [`Blob`] is what a drive file, an embedded sheet image or a fetched URL
//! resolves to: raw bytes plus the content type the host reported.

use std::fmt;
use std::io::Cursor;

use bytes::Bytes;

use crate::common::Result;

/// Raw bytes with a MIME content type.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Bytes,
    content_type: String,
    name: Option<String>,
}

impl Blob {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            name: None,
        }
    }

    /// Build a blob whose content type is sniffed from the payload.
    ///
    /// Payloads that are not a recognizable image get
    /// `application/octet-stream`.
    pub fn sniffed(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let content_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");
        Self::new(bytes, content_type)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the reported content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.contains("image")
    }

    /// Intrinsic pixel dimensions read from the image header.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let reader = image::ImageReader::new(Cursor::new(&self.bytes[..])).with_guessed_format()?;
        Ok(reader.into_dimensions()?)
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("content_type", &self.content_type)
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
