//! Unified error types for Templet.
//!
//! This module provides the single error type shared by the extractor, the
//! rewriters and the collaborator traits, plus conversions from the
//! third-party error types the crate touches.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
