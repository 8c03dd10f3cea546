//! File storage, structural document access and remote fetch.

use crate::common::{Blob, Result};

/// Link sharing state of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    /// Only the owner can read the file
    Private,
    /// Anyone holding the link can view the file
    AnyoneWithLink,
}

/// File storage service.
pub trait Drive {
    /// Download a file.
    fn file_blob(&self, file_id: &str) -> Result<Blob>;

    /// Create an empty document and return its id.
    fn create_document(&mut self, name: &str) -> Result<String>;

    /// Append an image to a document, titled `alt_title`.
    fn append_image(&mut self, document_id: &str, blob: &Blob, alt_title: &str) -> Result<()>;

    /// `(alt title, content URI)` of every image in a document.
    ///
    /// The URIs are only fetchable by third parties while the document is
    /// shared.
    fn image_content_uris(&self, document_id: &str) -> Result<Vec<(String, String)>>;

    fn set_sharing(&mut self, file_id: &str, sharing: Sharing) -> Result<()>;

    /// Move a file to the trash.
    fn trash(&mut self, file_id: &str) -> Result<()>;
}

/// An inline or positioned object of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub object_id: String,
    pub title: Option<String>,
    pub content_uri: Option<String>,
}

/// Request to swap an embedded image for the image at `uri`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceImageRequest {
    pub image_object_id: String,
    pub uri: String,
}

/// Structural document API.
pub trait DocsApi {
    /// Inline and positioned objects of a document.
    fn embedded_images(&self, document_id: &str) -> Result<Vec<EmbeddedImage>>;

    /// Apply replacement requests in one batch.
    fn batch_replace_images(&mut self, document_id: &str, requests: &[ReplaceImageRequest]) -> Result<()>;
}

/// Download of remote images.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<Blob>;
}
