//! Templet - Fill placeholder tokens in documents and slide decks from
//! spreadsheet rows
//!
//! Each row of a spreadsheet range (or each list of manual search/replace
//! items) fills one container: a document, a page of a slide deck, or a whole
//! deck. Header cells are the placeholder tokens, e.g. `{{name}}`, and may
//! carry control directives after underscores:
//!
//! | Directive | Effect |
//! |---|---|
//! | `noStyle` | replace text without reapplying the cell's styles |
//! | `image` | the cell holds an image (link, `=IMAGE()` formula, or embedded image) |
//! | `fileId` | with `image`, the cell holds a drive file id |
//! | `width:<n>` / `height:<n>` | image size in pixels |
//! | `header` | marks the column; has no effect on its own |
//!
//! # Features
//!
//! - **Rich-text preservation**: bold, italic, font family, strikethrough,
//!   underline, foreground color, font size and links captured per run and
//!   reapplied at every occurrence
//! - **Image substitution**: inline images in documents, shapes swapped for
//!   images on slides, or existing titled images replaced in place
//! - **Host agnostic**: hosts plug in through the traits of [`host`];
//!   [`memory`] provides in-memory hosts
//! - **Remote images**: the `fetch` feature adds a blocking HTTP fetcher
//!
//! # Example
//!
//! ```rust
//! use templet::memory::{MemoryCell, MemoryDocument, MemoryRange};
//! use templet::extract::SourceRun;
//! use templet::{TemplateRequest, sheet_range_to_documents};
//!
//! # fn main() -> templet::Result<()> {
//! let range = MemoryRange::new(["{{name}}", "{{team_noStyle}}"])
//!     .row([
//!         MemoryCell::styled("Ada Lovelace", vec![SourceRun::new(0, 3).bold(true)]),
//!         MemoryCell::text("Engines"),
//!     ]);
//! let mut letter = MemoryDocument::new("letter").paragraph("Dear {{name}} ({{team_noStyle}})");
//!
//! let request = TemplateRequest::new().with_range(&range).with_document(&mut letter);
//! sheet_range_to_documents(request, |event| println!("{}: {}", event.status, event.message))?;
//!
//! assert_eq!(letter.text(0), "Dear Ada Lovelace (Engines)");
//! # Ok(())
//! # }
//! ```

/// Shared types: errors, colors, units and binary payloads
pub mod common;

/// Template options and item loading
pub mod config;

/// Control directives embedded in header tokens
pub mod directive;

/// Template runs and their entry operations
pub mod engine;

/// Rich-text extraction from spreadsheet ranges and manual items
pub mod extract;

/// HTTP image download
#[cfg(feature = "fetch")]
pub mod fetch;

/// Collaborator traits implemented by host adapters
pub mod host;

/// Image substitution strategies
pub mod image;

/// In-memory hosts for tests and dry runs
pub mod memory;

/// Placeholder location and rewriting
pub mod rewrite;

/// Style properties and their setters
pub mod style_table;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::TemplateOptions;
pub use engine::{
    ProgressEvent, ProgressStatus, TemplateApp, TemplateRequest, sheet_range_to_documents, sheet_range_to_slides,
    values_to_documents, values_to_slides,
};
#[cfg(feature = "fetch")]
pub use fetch::HttpImageFetcher;
