//! Rich-text extraction.
//!
//! Turns a spreadsheet range (or a manual list of search/replace items) into
//! a [`DataModel`]: the header row, the directives parsed from it, and one
//! [`CellRecord`] per data cell carrying plain text, style runs and a resolved
//! [`CellContent`].
//!
//! # Image columns
//!
//! A column is an image column when its header contains `image`. Its cells
//! resolve, in order, to:
//!
//! 1. a drive file when the header also contains `fileId` and the cell has
//!    text (the file must be an image),
//! 2. a direct link when the cell has text,
//! 3. the URL argument of an `=IMAGE("...")` formula when the cell is empty,
//! 4. the image embedded in the cell, fetched in one batch after extraction.

pub mod formula;
pub mod model;
pub mod source;

pub use model::{CellContent, CellRecord, Item, ItemValue, Replacement, StyledRun};
pub use source::{CellValue, RichTextValue, SheetImage, SheetRange, SourceRun};

use crate::common::{Error, RGBColor, Result};
use crate::directive::HeaderDirectives;
use crate::host::Drive;
use crate::style_table::TextStyle;

/// Header substring marking an image column.
pub const IMAGE_MARKER: &str = "image";

/// Header substring marking an image column whose cells hold drive file ids.
pub const FILE_ID_MARKER: &str = "fileId";

/// Extracted rows aligned to their header.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    header: Vec<String>,
    directives: HeaderDirectives,
    rows: Vec<Vec<CellRecord>>,
}

impl DataModel {
    /// Extract a data model from a spreadsheet range.
    ///
    /// `drive` is only consulted for `fileId` image columns.
    ///
    /// # Errors
    ///
    /// Fails on duplicate header tokens before any cell is read, when a
    /// `fileId` cell does not name an image file, and on host failures.
    pub fn from_range(range: &dyn SheetRange, drive: Option<&dyn Drive>) -> Result<Self> {
        let mut display = range.display_values()?.into_iter();
        let header = display.next().unwrap_or_default();
        let directives = HeaderDirectives::parse(&header)?;

        let values = range.values()?;
        let formulas = range.formulas()?;
        let rich_text = range.rich_text_values()?;

        let mut has_image_values = false;
        let mut rows = Vec::with_capacity(display.len());
        for (i, row) in display.enumerate() {
            // Grids include the header row.
            let r = i + 1;
            let mut records = Vec::with_capacity(header.len());
            for (j, text) in row.into_iter().enumerate() {
                let Some(from) = header.get(j) else {
                    break;
                };
                let value = values.get(r).and_then(|row| row.get(j));
                has_image_values |= value.is_some_and(CellValue::is_image);
                let cell = CellSource {
                    from,
                    text,
                    formula: formulas
                        .get(r)
                        .and_then(|row| row.get(j))
                        .map_or("", String::as_str),
                    rich: rich_text.get(r).and_then(|row| row.get(j)),
                };
                records.push(cell.extract(drive)?);
            }
            rows.push(records);
        }

        let mut model = Self {
            header,
            directives,
            rows,
        };
        if has_image_values && model.header.iter().any(|h| h.contains(IMAGE_MARKER)) {
            model.attach_sheet_images(range.images()?);
        }
        log::debug!(
            "extracted {} row(s) x {} column(s) ({} header(s) with directives)",
            model.rows.len(),
            model.header.len(),
            model.directives.len()
        );
        Ok(model)
    }

    /// Build a data model from manual search/replace items.
    ///
    /// The searches of the first item list form the header.
    pub fn from_items(items: &[Vec<Item>]) -> Result<Self> {
        let header: Vec<String> = items
            .first()
            .map(|row| row.iter().map(|item| item.search.clone()).collect())
            .unwrap_or_default();
        let directives = HeaderDirectives::parse(&header)?;
        let rows = items
            .iter()
            .map(|row| row.iter().map(record_from_item).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            header,
            directives,
            rows,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn directives(&self) -> &HeaderDirectives {
        &self.directives
    }

    pub fn rows(&self) -> &[Vec<CellRecord>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellRecord]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn attach_sheet_images(&mut self, images: Vec<SheetImage>) {
        for image in images {
            let Some(data_row) = image.row.checked_sub(1) else {
                continue;
            };
            let is_image_column = self
                .header
                .get(image.column)
                .is_some_and(|h| h.contains(IMAGE_MARKER));
            if !is_image_column {
                continue;
            }
            if let Some(record) = self
                .rows
                .get_mut(data_row)
                .and_then(|row| row.get_mut(image.column))
            {
                log::debug!("embedded image attached to '{}' in row {}", record.from, data_row + 1);
                record.to.content = CellContent::ImageBlob(image.blob);
            }
        }
    }
}

/// Parallel views of one cell.
struct CellSource<'a> {
    from: &'a str,
    text: String,
    formula: &'a str,
    rich: Option<&'a RichTextValue>,
}

impl CellSource<'_> {
    fn extract(self, drive: Option<&dyn Drive>) -> Result<CellRecord> {
        let runs = self
            .rich
            .map(|rich| rich.runs.iter().map(|run| capture_run(&self.text, run)).collect())
            .unwrap_or_default();
        let content = self.resolve_content(drive)?;
        Ok(CellRecord {
            from: self.from.to_string(),
            to: Replacement {
                text: self.text,
                runs,
                content,
            },
        })
    }

    fn resolve_content(&self, drive: Option<&dyn Drive>) -> Result<CellContent> {
        if !self.from.contains(IMAGE_MARKER) {
            return Ok(CellContent::Text);
        }
        if !self.text.is_empty() {
            if self.from.contains(FILE_ID_MARKER) {
                let drive = drive.ok_or(Error::MissingObject("drive"))?;
                let blob = drive.file_blob(&self.text)?;
                if !blob.is_image() {
                    return Err(Error::UnsupportedMimeType(blob.content_type().to_string()));
                }
                return Ok(CellContent::ImageFileId {
                    file_id: self.text.clone(),
                    blob,
                });
            }
            return Ok(CellContent::ImageLink {
                url: self.text.clone(),
                formula: None,
            });
        }
        if formula::is_image_formula(self.formula) {
            return Ok(match formula::image_formula_url(self.formula) {
                Some(url) => CellContent::ImageLink {
                    url: url.to_string(),
                    formula: Some(self.formula.to_string()),
                },
                None => CellContent::ImageMissing,
            });
        }
        Ok(CellContent::ImageMissing)
    }
}

fn capture_run(text: &str, run: &SourceRun) -> StyledRun {
    let len = text.chars().count();
    let end = run.end.min(len);
    let start = run.start.min(end);
    let foreground_color = run.foreground_color.as_deref().and_then(|raw| {
        let color = RGBColor::from_hex(raw);
        if color.is_none() {
            log::debug!("ignoring unparsable foreground color '{}'", raw);
        }
        color
    });
    StyledRun {
        text: text.chars().skip(start).take(end - start).collect(),
        start,
        end,
        style: TextStyle {
            bold: run.bold,
            italic: run.italic,
            font_family: run.font_family.clone(),
            strikethrough: run.strikethrough,
            underline: run.underline,
            foreground_color,
            font_size: run.font_size,
            link: run.link_url.clone(),
        },
    }
}

fn record_from_item(item: &Item) -> Result<CellRecord> {
    if item.search.is_empty() {
        return Err(Error::InvalidItem(
            "Please confirm the values of `search` and `replace`".to_string(),
        ));
    }
    let to = match &item.replace {
        ItemValue::Text(text) => Replacement::text(text.clone()),
        ItemValue::Image(blob) => {
            if !blob.is_image() {
                return Err(Error::UnsupportedMimeType(blob.content_type().to_string()));
            }
            Replacement {
                text: String::new(),
                runs: Vec::new(),
                content: CellContent::ImageBlob(blob.clone()),
            }
        },
    };
    Ok(CellRecord {
        from: item.search.clone(),
        to,
    })
}
