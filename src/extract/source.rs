//! Source-side view of a spreadsheet range.
//!
//! A [`SheetRange`] exposes the same rectangle of cells through several
//! parallel grids, as spreadsheet hosts do: display text, underlying values,
//! formulas and rich text. The first row of every grid is the header row.

use crate::common::{Blob, Result};

/// Underlying value of a cell, reduced to what extraction needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A native image placed in the cell
    Image,
}

impl CellValue {
    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, CellValue::Image)
    }
}

/// One style run as reported by the host.
///
/// Offsets are character offsets into the cell's text, end-exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRun {
    pub start: usize,
    pub end: usize,
    pub link_url: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_family: Option<String>,
    pub strikethrough: Option<bool>,
    pub underline: Option<bool>,
    /// Color as the host renders it, e.g. `#FF0000` or `ff0000`
    pub foreground_color: Option<String>,
    pub font_size: Option<f64>,
}

impl SourceRun {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.foreground_color = Some(color.into());
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }
}

/// Rich text of one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichTextValue {
    pub text: String,
    pub runs: Vec<SourceRun>,
}

/// An image the host reports for a cell position.
///
/// `row` and `column` are 0-based within the range, header row included, so
/// the first data row is `row == 1`.
#[derive(Debug, Clone)]
pub struct SheetImage {
    pub row: usize,
    pub column: usize,
    pub blob: Blob,
}

/// A rectangular range of a spreadsheet.
pub trait SheetRange {
    /// Display text of every cell.
    fn display_values(&self) -> Result<Vec<Vec<String>>>;

    /// Underlying value of every cell.
    fn values(&self) -> Result<Vec<Vec<CellValue>>>;

    /// Formula text of every cell, empty where there is none.
    fn formulas(&self) -> Result<Vec<Vec<String>>>;

    /// Rich text of every cell.
    fn rich_text_values(&self) -> Result<Vec<Vec<RichTextValue>>>;

    /// Images embedded in cells of the range.
    ///
    /// Hosts fetch these with a separate request, so extraction only asks for
    /// them when an image column holds image-valued cells.
    fn images(&self) -> Result<Vec<SheetImage>>;
}
