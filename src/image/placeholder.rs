//! Replacing existing placeholder images.
//!
//! Instead of text tokens, templates may carry real images whose title (alt
//! text) is the placeholder. Their content is swapped for the cell's image.
//!
//! Document hosts can only swap an embedded image for a URL. Blobs are
//! therefore staged in a scratch document that is shared for the duration of
//! the batch request:
//!
//! ```text
//! CREATE_SCRATCH -> APPEND_BLOBS -> PUBLISH -> BATCH_REPLACE -> UNPUBLISH -> DELETE_SCRATCH
//! ```
//!
//! [`ScratchDocument`] owns the last two steps: they run when it is closed
//! and, failing that, when it is dropped, so an error in the batch request
//! never leaves a shared document behind.

use std::collections::HashMap;

use crate::common::{Blob, Error, Result};
use crate::extract::CellRecord;
use crate::host::{DocsApi, Drive, ImageData, ReplaceImageRequest, Sharing, SlidePage};

/// Name given to scratch documents.
pub const SCRATCH_DOCUMENT_NAME: &str = "tempDoc by templet";

/// Lifecycle of a scratch document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchState {
    Created,
    Published,
    Unpublished,
    Deleted,
}

/// A temporary document used to turn blobs into fetchable URIs.
pub struct ScratchDocument<'a> {
    drive: &'a mut dyn Drive,
    id: String,
    state: ScratchState,
}

impl<'a> ScratchDocument<'a> {
    pub fn create(drive: &'a mut dyn Drive, name: &str) -> Result<Self> {
        let id = drive.create_document(name)?;
        log::debug!("created scratch document {}", id);
        Ok(Self {
            drive,
            id,
            state: ScratchState::Created,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ScratchState {
        self.state
    }

    pub fn append_image(&mut self, blob: &Blob, alt_title: &str) -> Result<()> {
        self.drive.append_image(&self.id, blob, alt_title)
    }

    /// Content URI of every staged image keyed by its alt title.
    pub fn content_uris(&self) -> Result<HashMap<String, String>> {
        Ok(self.drive.image_content_uris(&self.id)?.into_iter().collect())
    }

    /// Share the document so its content URIs can be fetched.
    pub fn publish(&mut self) -> Result<()> {
        self.drive.set_sharing(&self.id, Sharing::AnyoneWithLink)?;
        self.state = ScratchState::Published;
        Ok(())
    }

    /// Revoke sharing and trash the document.
    pub fn close(mut self) -> Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> Result<()> {
        let mut first_error = None;
        if self.state == ScratchState::Published {
            match self.drive.set_sharing(&self.id, Sharing::Private) {
                Ok(()) => self.state = ScratchState::Unpublished,
                Err(e) => first_error = Some(e),
            }
        }
        if self.state != ScratchState::Deleted {
            match self.drive.trash(&self.id) {
                // A trashed file is no longer reachable through its link.
                Ok(()) => self.state = ScratchState::Deleted,
                Err(e) => {
                    first_error.get_or_insert(e);
                },
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for ScratchDocument<'_> {
    fn drop(&mut self) {
        if self.state == ScratchState::Deleted {
            return;
        }
        if let Err(e) = self.cleanup() {
            log::error!("failed to clean up scratch document {}: {}", self.id, e);
        }
    }
}

/// Replace page images titled with a placeholder by the row's images.
///
/// Returns the number of images replaced.
pub fn replace_page_images(page: &mut dyn SlidePage, row: &[CellRecord]) -> Result<usize> {
    let mut by_title: HashMap<String, Vec<_>> = HashMap::new();
    for (image, title) in page.images() {
        by_title.entry(title.trim().to_string()).or_default().push(image);
    }

    let mut count = 0;
    for record in row {
        let Some(data) = record.to.content.image_data() else {
            continue;
        };
        for &image in by_title.get(&record.from).into_iter().flatten() {
            page.replace_image(image, &data)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Replace embedded document images titled with a placeholder.
///
/// Link payloads are sent as-is; blobs are staged through a
/// [`ScratchDocument`] on `drive`, which is required only when there are
/// blobs to stage.
///
/// Returns the number of replacement requests issued.
pub fn replace_document_images(
    docs: &mut dyn DocsApi,
    drive: Option<&mut dyn Drive>,
    document_id: &str,
    row: &[CellRecord],
) -> Result<usize> {
    let mut by_title: HashMap<String, Vec<String>> = HashMap::new();
    for object in docs.embedded_images(document_id)? {
        let Some(title) = object.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        by_title.entry(title.to_string()).or_default().push(object.object_id);
    }

    // Later records win when two placeholders share an object.
    let mut targets: Vec<(String, ImageData)> = Vec::new();
    for record in row {
        let Some(data) = record.to.content.image_data() else {
            continue;
        };
        for object_id in by_title.get(&record.from).into_iter().flatten() {
            targets.retain(|(id, _)| id != object_id);
            targets.push((object_id.clone(), data.clone()));
        }
    }
    if targets.is_empty() {
        return Ok(0);
    }

    let has_blobs = targets.iter().any(|(_, data)| matches!(data, ImageData::Blob(_)));
    if !has_blobs {
        let requests = requests_from(targets, &HashMap::new())?;
        docs.batch_replace_images(document_id, &requests)?;
        return Ok(requests.len());
    }

    let drive = drive.ok_or(Error::MissingObject("drive"))?;
    let mut scratch = ScratchDocument::create(drive, SCRATCH_DOCUMENT_NAME)?;
    for (object_id, data) in &targets {
        if let ImageData::Blob(blob) = data {
            scratch.append_image(blob, object_id)?;
        }
    }
    let uris = scratch.content_uris()?;
    scratch.publish()?;
    let requests = requests_from(targets, &uris)?;
    docs.batch_replace_images(document_id, &requests)?;
    scratch.close()?;
    Ok(requests.len())
}

fn requests_from(
    targets: Vec<(String, ImageData)>,
    staged: &HashMap<String, String>,
) -> Result<Vec<ReplaceImageRequest>> {
    targets
        .into_iter()
        .map(|(object_id, data)| {
            let uri = match data {
                ImageData::Url(url) => url,
                ImageData::Blob(_) => staged.get(&object_id).cloned().ok_or_else(|| {
                    Error::Host(format!("staged image for object {} has no content URI", object_id))
                })?,
            };
            Ok(ReplaceImageRequest {
                image_object_id: object_id,
                uri,
            })
        })
        .collect()
}
