//! In-memory drive, structural document API and image fetcher.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::common::{Blob, Error, Result};
use crate::host::{DocsApi, Drive, EmbeddedImage, ImageFetcher, ReplaceImageRequest, Sharing};

/// A mutation recorded by [`MemoryDrive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveEvent {
    Created(String),
    /// `(document id, alt title)`
    ImageAppended(String, String),
    Shared(String, Sharing),
    Trashed(String),
}

/// A drive holding files and documents in memory.
///
/// Reads are not recorded; every mutation is appended to [`MemoryDrive::events`].
#[derive(Debug, Default)]
pub struct MemoryDrive {
    files: HashMap<String, Blob>,
    documents: Vec<String>,
    document_images: HashMap<String, Vec<(String, Blob)>>,
    sharing: HashMap<String, Sharing>,
    trashed: HashSet<String>,
    events: Vec<DriveEvent>,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_file(&mut self, file_id: impl Into<String>, blob: Blob) {
        self.files.insert(file_id.into(), blob);
    }

    /// Ids of documents created through [`Drive::create_document`], in order.
    pub fn created_documents(&self) -> &[String] {
        &self.documents
    }

    pub fn events(&self) -> &[DriveEvent] {
        &self.events
    }

    pub fn sharing(&self, file_id: &str) -> Option<Sharing> {
        self.sharing.get(file_id).copied()
    }

    pub fn is_trashed(&self, file_id: &str) -> bool {
        self.trashed.contains(file_id)
    }

    fn live_document(&mut self, document_id: &str) -> Result<&mut Vec<(String, Blob)>> {
        if self.trashed.contains(document_id) {
            return Err(Error::Host(format!("document {} is in the trash", document_id)));
        }
        self.document_images
            .get_mut(document_id)
            .ok_or_else(|| Error::Host(format!("document {} does not exist", document_id)))
    }
}

impl Drive for MemoryDrive {
    fn file_blob(&self, file_id: &str) -> Result<Blob> {
        if self.trashed.contains(file_id) {
            return Err(Error::Host(format!("file {} is in the trash", file_id)));
        }
        self.files
            .get(file_id)
            .cloned()
            .ok_or_else(|| Error::Host(format!("file {} does not exist", file_id)))
    }

    fn create_document(&mut self, name: &str) -> Result<String> {
        let id = format!("memory-doc-{}", self.documents.len() + 1);
        log::debug!("creating in-memory document '{}' as {}", name, id);
        self.documents.push(id.clone());
        self.document_images.insert(id.clone(), Vec::new());
        self.events.push(DriveEvent::Created(id.clone()));
        Ok(id)
    }

    fn append_image(&mut self, document_id: &str, blob: &Blob, alt_title: &str) -> Result<()> {
        self.live_document(document_id)?
            .push((alt_title.to_string(), blob.clone()));
        self.events
            .push(DriveEvent::ImageAppended(document_id.to_string(), alt_title.to_string()));
        Ok(())
    }

    fn image_content_uris(&self, document_id: &str) -> Result<Vec<(String, String)>> {
        let images = self
            .document_images
            .get(document_id)
            .ok_or_else(|| Error::Host(format!("document {} does not exist", document_id)))?;
        Ok(images
            .iter()
            .enumerate()
            .map(|(i, (title, _))| (title.clone(), format!("memory://{}/{}", document_id, i)))
            .collect())
    }

    fn set_sharing(&mut self, file_id: &str, sharing: Sharing) -> Result<()> {
        self.sharing.insert(file_id.to_string(), sharing);
        self.events.push(DriveEvent::Shared(file_id.to_string(), sharing));
        Ok(())
    }

    fn trash(&mut self, file_id: &str) -> Result<()> {
        self.trashed.insert(file_id.to_string());
        self.events.push(DriveEvent::Trashed(file_id.to_string()));
        Ok(())
    }
}

/// Structural document API over in-memory embedded objects.
#[derive(Debug, Default)]
pub struct MemoryDocsApi {
    images: HashMap<String, Vec<EmbeddedImage>>,
    requests: HashMap<String, Vec<ReplaceImageRequest>>,
    failing: bool,
}

impl MemoryDocsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(mut self, document_id: impl Into<String>, images: Vec<EmbeddedImage>) -> Self {
        self.images.insert(document_id.into(), images);
        self
    }

    /// Reject every batch request.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Requests applied to a document so far.
    pub fn requests(&self, document_id: &str) -> &[ReplaceImageRequest] {
        self.requests.get(document_id).map(Vec::as_slice).unwrap_or_default()
    }
}

impl DocsApi for MemoryDocsApi {
    fn embedded_images(&self, document_id: &str) -> Result<Vec<EmbeddedImage>> {
        Ok(self.images.get(document_id).cloned().unwrap_or_default())
    }

    fn batch_replace_images(&mut self, document_id: &str, requests: &[ReplaceImageRequest]) -> Result<()> {
        if self.failing {
            return Err(Error::Host(format!("batch update of {} was rejected", document_id)));
        }
        if let Some(images) = self.images.get_mut(document_id) {
            for request in requests {
                if let Some(image) = images.iter_mut().find(|i| i.object_id == request.image_object_id) {
                    image.content_uri = Some(request.uri.clone());
                }
            }
        }
        self.requests
            .entry(document_id.to_string())
            .or_default()
            .extend_from_slice(requests);
        Ok(())
    }
}

/// Serves images from a fixed URL table.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    blobs: HashMap<String, Blob>,
    fetches: Cell<usize>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, blob: Blob) -> Self {
        self.blobs.insert(url.into(), blob);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ImageFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Blob> {
        self.fetches.set(self.fetches.get() + 1);
        self.blobs
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("{} is not reachable", url)))
    }
}
