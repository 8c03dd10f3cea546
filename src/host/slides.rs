//! Slide decks made of pages holding shapes, tables and images.

use super::{ImageData, ImageId};
use crate::common::Result;
use crate::style_table::{StyleSetter, StyleValue};

/// A text-bearing object on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameId {
    Shape(usize),
    TableCell { table: usize, row: usize, column: usize },
}

impl FrameId {
    #[inline]
    pub fn shape(&self) -> Option<usize> {
        match self {
            FrameId::Shape(index) => Some(*index),
            FrameId::TableCell { .. } => None,
        }
    }
}

/// One page of a deck.
pub trait SlidePage {
    /// Every shape and table cell with its full text, shapes first, then
    /// table cells in row-major order.
    fn text_frames(&self) -> Vec<(FrameId, String)>;

    /// Replace the whole text of a frame.
    fn replace_all_text(&mut self, frame: FrameId, text: &str) -> Result<()>;

    /// Apply one style setter to `start..end` of a frame's text.
    fn set_text_style(
        &mut self,
        frame: FrameId,
        start: usize,
        end: usize,
        setter: StyleSetter,
        value: &StyleValue,
    ) -> Result<()>;

    /// Top-left corner `(left, top)` of a shape in points.
    fn shape_position(&self, shape: usize) -> Result<(f64, f64)>;

    /// Replace a shape with an image; the shape is gone afterwards.
    fn replace_shape_with_image(&mut self, shape: usize, image: &ImageData) -> Result<ImageId>;

    fn set_image_position(&mut self, image: ImageId, left: f64, top: f64) -> Result<()>;

    /// Current size of an image, initially its intrinsic size.
    fn image_size(&self, image: ImageId) -> Result<(f64, f64)>;

    fn set_image_size(&mut self, image: ImageId, width: f64, height: f64) -> Result<()>;

    /// Images on the page with their titles.
    fn images(&self) -> Vec<(ImageId, String)>;

    /// Swap the content of an existing image, keeping its geometry.
    fn replace_image(&mut self, image: ImageId, data: &ImageData) -> Result<()>;
}

/// A presentation.
pub trait SlideDeck {
    fn page_count(&self) -> usize;

    fn page_mut(&mut self, index: usize) -> Option<&mut dyn SlidePage>;
}
