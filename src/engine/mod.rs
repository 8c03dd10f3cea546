//! Template runs.
//!
//! A run pairs one source (a spreadsheet range or manual items) with one kind
//! of target (documents or slide decks) and fills the targets in order, one
//! row per container:
//!
//! | Operation | Source | Targets |
//! |---|---|---|
//! | [`sheet_range_to_documents`] | range | documents |
//! | [`sheet_range_to_slides`] | range | pages of the first deck, or whole decks |
//! | [`values_to_documents`] | items | documents |
//! | [`values_to_slides`] | items | pages of the first deck, or whole decks |
//!
//! Rows and containers are consumed in lockstep. When their counts differ,
//! the extra rows or containers are left alone and a single warning reports
//! both counts.
//!
//! # Example
//!
//! ```rust
//! use templet::memory::{MemoryCell, MemoryDeck, MemoryPage, MemoryRange};
//! use templet::{ProgressStatus, TemplateRequest, sheet_range_to_slides};
//!
//! let range = MemoryRange::new(["{{title}}"])
//!     .row([MemoryCell::text("First")])
//!     .row([MemoryCell::text("Second")]);
//! let mut deck = MemoryDeck::new(vec![MemoryPage::new().shape("{{title}}", 0.0, 0.0)]);
//!
//! let mut warnings = Vec::new();
//! let request = TemplateRequest::new().with_range(&range).with_deck(&mut deck);
//! sheet_range_to_slides(request, |event| {
//!     if event.status == ProgressStatus::Warning {
//!         warnings.push(event.message.clone());
//!     }
//! })?;
//! assert_eq!(warnings.len(), 1);
//! # Ok::<(), templet::common::Error>(())
//! ```

mod progress;
#[cfg(test)]
mod tests;

pub use progress::{ProgressEvent, ProgressStatus};

use progress::Progress;

use crate::common::{Error, Result};
use crate::config::{ResolvedOptions, TemplateOptions};
use crate::extract::{CellRecord, DataModel, Item, SheetRange};
use crate::host::{DocsApi, Drive, ImageFetcher, SlideDeck, SlidePage, TemplateDocument};
use crate::image::placeholder::{replace_document_images, replace_page_images};
use crate::image::{self, require_image};
use crate::rewrite::slide::FrameIndex;
use crate::rewrite::{self, RewriteContext};

/// Everything a run needs, gathered before validation.
///
/// # Examples
///
/// ```rust
/// use templet::TemplateRequest;
/// use templet::config::TemplateOptions;
/// use templet::extract::Item;
/// use templet::memory::MemoryDocument;
///
/// let mut doc = MemoryDocument::new("doc").paragraph("{{a}}");
/// let request = TemplateRequest::new()
///     .with_items(vec![vec![Item::new("{{a}}", "1")]])
///     .with_document(&mut doc)
///     .with_options(TemplateOptions::new().with_style_of_spreadsheet(false));
/// ```
#[derive(Default)]
pub struct TemplateRequest<'a> {
    range: Option<&'a dyn SheetRange>,
    items: Option<Vec<Vec<Item>>>,
    documents: Option<Vec<&'a mut dyn TemplateDocument>>,
    slides: Option<Vec<&'a mut dyn SlideDeck>>,
    options: TemplateOptions,
    services: Services<'a>,
}

impl<'a> TemplateRequest<'a> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: &'a dyn SheetRange) -> Self {
        self.range = Some(range);
        self
    }

    /// One list of search/replace items per target container.
    pub fn with_items(mut self, items: Vec<Vec<Item>>) -> Self {
        self.items = Some(items);
        self
    }

    /// Append one target document.
    pub fn with_document(mut self, document: &'a mut dyn TemplateDocument) -> Self {
        self.documents.get_or_insert_with(Vec::new).push(document);
        self
    }

    pub fn with_documents(mut self, documents: Vec<&'a mut dyn TemplateDocument>) -> Self {
        self.documents.get_or_insert_with(Vec::new).extend(documents);
        self
    }

    /// Append one target slide deck.
    pub fn with_deck(mut self, deck: &'a mut dyn SlideDeck) -> Self {
        self.slides.get_or_insert_with(Vec::new).push(deck);
        self
    }

    pub fn with_decks(mut self, decks: Vec<&'a mut dyn SlideDeck>) -> Self {
        self.slides.get_or_insert_with(Vec::new).extend(decks);
        self
    }

    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Drive used for `fileId` cells and for staging placeholder images.
    pub fn with_drive(mut self, drive: &'a mut dyn Drive) -> Self {
        self.services.drive = Some(drive);
        self
    }

    pub fn with_docs_api(mut self, docs_api: &'a mut dyn DocsApi) -> Self {
        self.services.docs_api = Some(docs_api);
        self
    }

    /// Fetcher for link-sourced images inserted into documents.
    pub fn with_fetcher(mut self, fetcher: &'a dyn ImageFetcher) -> Self {
        self.services.fetcher = Some(fetcher);
        self
    }
}

/// Collaborators shared by every container of a run.
#[derive(Default)]
struct Services<'a> {
    drive: Option<&'a mut dyn Drive>,
    docs_api: Option<&'a mut dyn DocsApi>,
    fetcher: Option<&'a dyn ImageFetcher>,
}

fn drive_slot<'s>(slot: &'s mut Option<&mut dyn Drive>) -> Option<&'s mut dyn Drive> {
    match slot {
        Some(drive) => Some(&mut **drive),
        None => None,
    }
}

/// A validated run.
pub struct TemplateApp<'a> {
    range: Option<&'a dyn SheetRange>,
    items: Option<Vec<Vec<Item>>>,
    documents: Option<Vec<&'a mut dyn TemplateDocument>>,
    slides: Option<Vec<&'a mut dyn SlideDeck>>,
    options: ResolvedOptions,
    services: Services<'a>,
}

impl<'a> TemplateApp<'a> {
    /// Validate a request.
    ///
    /// # Errors
    ///
    /// Exactly one of range and items, and exactly one of documents and
    /// slide decks, must be given. Link colors must parse.
    pub fn new(request: TemplateRequest<'a>) -> Result<Self> {
        if request.range.is_some() == request.items.is_some() {
            return Err(Error::InvalidRequest(
                "Please set a range object or an items of array.".to_string(),
            ));
        }
        if request.documents.is_some() == request.slides.is_some() {
            return Err(Error::InvalidRequest(
                "Please set a document object or a slide object.".to_string(),
            ));
        }
        let options = request.options.resolve()?;
        Ok(Self {
            range: request.range,
            items: request.items,
            documents: request.documents,
            slides: request.slides,
            options,
            services: request.services,
        })
    }

    /// Fill documents from the rows of the range.
    pub fn sheet_range_to_documents<F>(mut self, progress: F) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let range = self.range.ok_or(Error::MissingObject("range"))?;
        let mut documents = self.documents.take().ok_or(Error::MissingObject("document"))?;
        if self.options.use_image_as_placeholder && self.services.docs_api.is_none() {
            return Err(Error::DocsApiUnavailable);
        }
        let model = DataModel::from_range(range, self.services.drive.as_deref())?;
        let placeholder_images = self.options.use_image_as_placeholder;
        self.fill_documents(&model, "rows", &mut documents, placeholder_images, &mut Progress::new(progress))
    }

    /// Fill slide pages (or decks) from the rows of the range.
    pub fn sheet_range_to_slides<F>(mut self, progress: F) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let range = self.range.ok_or(Error::MissingObject("range"))?;
        let mut decks = self.slides.take().ok_or(Error::MissingObject("slide"))?;
        let model = DataModel::from_range(range, self.services.drive.as_deref())?;
        let placeholder_images = self.options.use_image_as_placeholder;
        self.fill_slides(&model, "rows", &mut decks, placeholder_images, &mut Progress::new(progress))
    }

    /// Fill documents from manual item lists.
    pub fn values_to_documents<F>(mut self, progress: F) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let items = self.items.take().ok_or(Error::MissingObject("items"))?;
        let mut documents = self.documents.take().ok_or(Error::MissingObject("document"))?;
        let model = DataModel::from_items(&items)?;
        self.fill_documents(&model, "items", &mut documents, false, &mut Progress::new(progress))
    }

    /// Fill slide pages (or decks) from manual item lists.
    pub fn values_to_slides<F>(mut self, progress: F) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let items = self.items.take().ok_or(Error::MissingObject("items"))?;
        let mut decks = self.slides.take().ok_or(Error::MissingObject("slide"))?;
        let model = DataModel::from_items(&items)?;
        self.fill_slides(&model, "items", &mut decks, false, &mut Progress::new(progress))
    }

    fn fill_documents<F>(
        &mut self,
        model: &DataModel,
        source: &str,
        documents: &mut [&'a mut dyn TemplateDocument],
        placeholder_images: bool,
        progress: &mut Progress<F>,
    ) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let ctx = RewriteContext {
            directives: model.directives(),
            styles: &self.options.styles,
            link_color: self.options.doc_link_color,
            use_style: self.options.use_style,
        };
        for (i, (doc, row)) in documents.iter_mut().zip(model.rows()).enumerate() {
            progress.process(format!("Start: document {}", i + 1));
            fill_document(&ctx, &mut **doc, row, &mut self.services, placeholder_images)?;
            progress.process(format!("End: document {}", i + 1));
        }
        progress.mismatch(model.len(), source, documents.len(), "documents");
        Ok(())
    }

    fn fill_slides<F>(
        &self,
        model: &DataModel,
        source: &str,
        decks: &mut [&'a mut dyn SlideDeck],
        placeholder_images: bool,
        progress: &mut Progress<F>,
    ) -> Result<()>
    where
        F: FnMut(&ProgressEvent),
    {
        let ctx = RewriteContext {
            directives: model.directives(),
            styles: &self.options.styles,
            link_color: self.options.slide_link_color,
            use_style: self.options.use_style,
        };

        if !self.options.rows_to_each_page {
            for (i, (deck, row)) in decks.iter_mut().zip(model.rows()).enumerate() {
                progress.process(format!("Start: slide deck {}", i + 1));
                match deck.page_mut(0) {
                    Some(page) => fill_page(&ctx, page, row, placeholder_images)?,
                    None => progress.warning(format!("Slide deck {} has no pages and was skipped.", i + 1)),
                }
                progress.process(format!("End: slide deck {}", i + 1));
            }
            progress.mismatch(model.len(), source, decks.len(), "slide decks");
            return Ok(());
        }

        let Some(deck) = decks.first_mut() else {
            progress.mismatch(model.len(), source, 0, "pages");
            return Ok(());
        };
        let page_count = deck.page_count();
        for (i, row) in model.rows().iter().take(page_count).enumerate() {
            progress.process(format!("Start: page {} in a slide deck", i + 1));
            let page = deck
                .page_mut(i)
                .ok_or_else(|| Error::Host(format!("page {} of the slide deck is not available", i + 1)))?;
            fill_page(&ctx, page, row, placeholder_images)?;
            progress.process(format!("End: page {} in a slide deck", i + 1));
        }
        progress.mismatch(model.len(), source, page_count, "pages");
        Ok(())
    }
}

fn fill_document(
    ctx: &RewriteContext<'_>,
    doc: &mut dyn TemplateDocument,
    row: &[CellRecord],
    services: &mut Services<'_>,
    placeholder_images: bool,
) -> Result<()> {
    for record in row {
        if !record.to.content.is_image() {
            rewrite::document::replace_text_placeholder(ctx, doc, record)?;
            continue;
        }
        let data = require_image(record)?;
        if placeholder_images {
            continue;
        }
        image::document::insert_image_placeholder(ctx, doc, record, &data, services.fetcher)?;
    }

    if placeholder_images {
        let docs_api = services.docs_api.as_deref_mut().ok_or(Error::DocsApiUnavailable)?;
        let replaced = replace_document_images(docs_api, drive_slot(&mut services.drive), doc.id(), row)?;
        log::debug!("replaced {} placeholder image(s) in {}", replaced, doc.id());
    }
    Ok(())
}

fn fill_page(
    ctx: &RewriteContext<'_>,
    page: &mut dyn SlidePage,
    row: &[CellRecord],
    placeholder_images: bool,
) -> Result<()> {
    let index = FrameIndex::build(&*page);
    for record in row {
        if !record.to.content.is_image() {
            rewrite::slide::replace_text_placeholder(ctx, page, &index, record)?;
            continue;
        }
        let data = require_image(record)?;
        if !placeholder_images {
            image::slide::insert_image_placeholder(ctx, page, &index, record, &data)?;
        }
    }

    if placeholder_images {
        let replaced = replace_page_images(page, row)?;
        log::debug!("replaced {} placeholder image(s) on the page", replaced);
    }
    Ok(())
}

/// Fill each document with one row of the range.
///
/// Requires a range and documents. With `useImageAsPlaceholder`, a document
/// structure API is required as well.
pub fn sheet_range_to_documents<F>(request: TemplateRequest<'_>, progress: F) -> Result<()>
where
    F: FnMut(&ProgressEvent),
{
    TemplateApp::new(request)?.sheet_range_to_documents(progress)
}

/// Fill slide pages, or whole decks, with the rows of the range.
///
/// Requires a range and slide decks.
pub fn sheet_range_to_slides<F>(request: TemplateRequest<'_>, progress: F) -> Result<()>
where
    F: FnMut(&ProgressEvent),
{
    TemplateApp::new(request)?.sheet_range_to_slides(progress)
}

/// Fill each document with one list of search/replace items.
pub fn values_to_documents<F>(request: TemplateRequest<'_>, progress: F) -> Result<()>
where
    F: FnMut(&ProgressEvent),
{
    TemplateApp::new(request)?.values_to_documents(progress)
}

/// Fill slide pages, or whole decks, with lists of search/replace items.
pub fn values_to_slides<F>(request: TemplateRequest<'_>, progress: F) -> Result<()>
where
    F: FnMut(&ProgressEvent),
{
    TemplateApp::new(request)?.values_to_slides(progress)
}
