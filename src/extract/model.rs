//! Normalized row/column data model.

use serde::Deserialize;

use crate::common::Blob;
use crate::host::ImageData;
use crate::style_table::TextStyle;

/// A styled fragment of a replacement text.
///
/// `start` and `end` are character offsets into [`Replacement::text`],
/// end-exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub style: TextStyle,
}

impl StyledRun {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// What a cell stands for, resolved once during extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Plain or styled text
    Text,
    /// Image bytes, either embedded in the sheet or supplied directly
    ImageBlob(Blob),
    /// Image addressed by URL; `formula` is set when the URL came from an
    /// `=IMAGE(...)` formula
    ImageLink { url: String, formula: Option<String> },
    /// Image stored as a drive file, already downloaded
    ImageFileId { file_id: String, blob: Blob },
    /// An image placeholder with no resolvable source
    ImageMissing,
}

impl CellContent {
    #[inline]
    pub fn is_image(&self) -> bool {
        !matches!(self, CellContent::Text)
    }

    /// Payload handed to hosts, if the image is resolved.
    pub fn image_data(&self) -> Option<ImageData> {
        match self {
            CellContent::ImageBlob(blob) | CellContent::ImageFileId { blob, .. } => {
                Some(ImageData::Blob(blob.clone()))
            },
            CellContent::ImageLink { url, .. } => Some(ImageData::Url(url.clone())),
            CellContent::Text | CellContent::ImageMissing => None,
        }
    }
}

/// Replacement derived from one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub text: String,
    pub runs: Vec<StyledRun>,
    pub content: CellContent,
}

impl Replacement {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
            content: CellContent::Text,
        }
    }
}

/// One source cell mapped to its placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    /// Placeholder token searched for in targets
    pub from: String,
    pub to: Replacement,
}

/// Replacement value of a manually supplied item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Text(String),
    #[serde(skip_deserializing)]
    Image(Blob),
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        ItemValue::Text(value.to_string())
    }
}

impl From<String> for ItemValue {
    fn from(value: String) -> Self {
        ItemValue::Text(value)
    }
}

impl From<Blob> for ItemValue {
    fn from(value: Blob) -> Self {
        ItemValue::Image(value)
    }
}

/// A manually supplied search/replace pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub search: String,
    pub replace: ItemValue,
}

impl Item {
    pub fn new(search: impl Into<String>, replace: impl Into<ItemValue>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}
