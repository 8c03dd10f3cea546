//! Linear document bodies.

use std::fmt;

use super::ImageId;
use crate::common::{Blob, Result};
use crate::style_table::{StyleSetter, StyleValue};

/// Index of a text element (paragraph, list item, table cell) in a body.
pub type ElementId = usize;

/// One occurrence of a search string.
///
/// `start` and `end` are character offsets inside `element`, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub element: ElementId,
    pub start: usize,
    pub end: usize,
}

/// Position a search resumes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    pub element: ElementId,
    pub offset: usize,
}

/// Kind of element that owns a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    Paragraph,
    ListItem,
    TableCell,
    Other(String),
}

impl ContainerKind {
    /// Whether inline images can be inserted into this element.
    #[inline]
    pub fn accepts_inline_images(&self) -> bool {
        matches!(self, ContainerKind::Paragraph | ContainerKind::ListItem)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Paragraph => f.write_str("PARAGRAPH"),
            ContainerKind::ListItem => f.write_str("LIST_ITEM"),
            ContainerKind::TableCell => f.write_str("TABLE_CELL"),
            ContainerKind::Other(name) => f.write_str(name),
        }
    }
}

/// A document whose body is searched and edited as linear text.
pub trait TemplateDocument {
    /// Host identifier of the document.
    fn id(&self) -> &str;

    /// Find the first occurrence of `needle` at or after `from`, or from the
    /// start of the body when `from` is `None`.
    ///
    /// Matches never span two elements.
    fn find_text(&self, needle: &str, from: Option<TextPosition>) -> Option<TextMatch>;

    /// Replace the matched span with `replacement`.
    fn replace_text(&mut self, at: &TextMatch, replacement: &str) -> Result<()>;

    /// Apply one style setter to `start..=end_inclusive` of an element.
    fn set_text_style(
        &mut self,
        element: ElementId,
        start: usize,
        end_inclusive: usize,
        setter: StyleSetter,
        value: &StyleValue,
    ) -> Result<()>;

    /// Kind of the element owning a text element.
    fn container_kind(&self, element: ElementId) -> ContainerKind;

    /// Insert an image inline at a character offset of an element.
    fn insert_inline_image(&mut self, element: ElementId, offset: usize, blob: &Blob) -> Result<ImageId>;

    /// Current size of an inline image, initially its intrinsic size.
    fn image_size(&self, image: ImageId) -> Result<(f64, f64)>;

    fn set_image_size(&mut self, image: ImageId, width: f64, height: f64) -> Result<()>;
}
