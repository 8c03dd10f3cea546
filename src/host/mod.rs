//! Collaborator traits implemented by host adapters.
//!
//! The engine never creates or destroys documents, decks or shapes. It reads
//! and mutates what the caller hands in through these narrow interfaces:
//!
//! - [`TemplateDocument`]: a linear document body searched occurrence by
//!   occurrence
//! - [`SlideDeck`] / [`SlidePage`]: pages of independently addressable shapes
//!   and table cells
//! - [`Drive`]: file storage, sharing and trash
//! - [`DocsApi`]: structural document access for placeholder images
//! - [`ImageFetcher`]: download of remote images
//!
//! Every call is a blocking request against a live session; the engine issues
//! them strictly in order and leaves retries and timeouts to the adapter.

pub mod document;
pub mod drive;
pub mod slides;

pub use document::{ContainerKind, ElementId, TemplateDocument, TextMatch, TextPosition};
pub use drive::{DocsApi, Drive, EmbeddedImage, ImageFetcher, ReplaceImageRequest, Sharing};
pub use slides::{FrameId, SlideDeck, SlidePage};

use crate::common::Blob;

/// Handle to an image a host inserted or already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// Image payload handed to a host.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    Blob(Blob),
    /// A URL the host downloads itself
    Url(String),
}
