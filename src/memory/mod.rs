//! In-memory hosts.
//!
//! Every collaborator trait has an implementation here that keeps its state
//! in plain collections and records each mutation, for tests and dry runs.
//!
//! ```rust
//! use templet::memory::{MemoryCell, MemoryDocument, MemoryRange};
//! use templet::{TemplateRequest, sheet_range_to_documents};
//!
//! let range = MemoryRange::new(["{{name}}"])
//!     .row([MemoryCell::text("Ada")])
//!     .row([MemoryCell::text("Grace")]);
//! let mut first = MemoryDocument::new("a").paragraph("Hello {{name}}");
//! let mut second = MemoryDocument::new("b").paragraph("Hello {{name}}");
//!
//! let request = TemplateRequest::new()
//!     .with_range(&range)
//!     .with_document(&mut first)
//!     .with_document(&mut second);
//! sheet_range_to_documents(request, |_| {})?;
//! assert_eq!(second.text(0), "Hello Grace");
//! # Ok::<(), templet::common::Error>(())
//! ```

pub mod document;
pub mod drive;
pub mod sheet;
pub mod slides;

pub use document::{InlineImage, MemoryDocument, StyleCall};
pub use drive::{DriveEvent, MemoryDocsApi, MemoryDrive, MemoryFetcher};
pub use sheet::{MemoryCell, MemoryRange};
pub use slides::{MemoryDeck, MemoryPage, PageImage, SlideStyleCall};
