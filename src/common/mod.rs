//! Common types, traits, and utilities shared across the extractor, the
//! rewriters and the host collaborators.

// Submodule declarations
pub mod blob;
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use blob::Blob;
pub use error::{Error, Result};
pub use style::RGBColor;
