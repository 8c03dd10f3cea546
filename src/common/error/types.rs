//! Unified error types for Templet.
//!
//! Every fallible operation in the crate, including the collaborator traits
//! implemented by host adapters, reports failures through this one type.
use thiserror::Error;

/// Main error type for Templet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request combines its sources or targets incorrectly
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A required object was not given when the operation ran
    #[error("Required object '{0}' is not given.")]
    MissingObject(&'static str),

    /// The header row contains the same token more than once
    #[error("Same header values are existing: '{0}'. Please confirm the header row.")]
    DuplicateHeader(String),

    /// An image placeholder resolved to no blob, link or file id
    #[error("A blob or a direct link or file ID of the image was not found for placeholder '{placeholder}'.")]
    ImageNotFound { placeholder: String },

    /// A drive file used as an image is not an image
    #[error("MimeType of {0} cannot be used.")]
    UnsupportedMimeType(String),

    /// Placeholder-image replacement in documents needs the document structure API
    #[error(
        "When \"useImageAsPlaceholder\" is true, the document structure API must be available. Enable it and run again."
    )]
    DocsApiUnavailable,

    /// A manually supplied search/replace pair is malformed
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Failure reported by a host collaborator (document, slide or drive service)
    #[error("Host error: {0}")]
    Host(String),

    /// Remote image download failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Option loading or validation failed
    #[error("Config error: {0}")]
    Config(String),

    /// Image payload could not be decoded
    #[error("Image error: {0}")]
    Image(String),
}

/// Result type for Templet operations.
pub type Result<T> = std::result::Result<T, Error>;
