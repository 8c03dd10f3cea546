//! In-memory slide pages and decks.

use crate::common::{Error, Result};
use crate::host::{FrameId, ImageData, ImageId, SlideDeck, SlidePage};
use crate::style_table::{StyleSetter, StyleValue};

/// Intrinsic size given to images a page only knows by URL.
pub const URL_IMAGE_SIZE: (f64, f64) = (400.0, 300.0);

/// A recorded `set_text_style` call on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideStyleCall {
    pub frame: FrameId,
    pub start: usize,
    pub end: usize,
    pub setter: StyleSetter,
    pub value: StyleValue,
}

/// An image on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pub title: String,
    pub data: ImageData,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
struct Shape {
    text: String,
    left: f64,
    top: f64,
    removed: bool,
}

/// A page holding shapes, tables and images.
///
/// Removed shapes keep their index so the remaining ones stay addressable.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    shapes: Vec<Shape>,
    tables: Vec<Vec<Vec<String>>>,
    images: Vec<PageImage>,
    style_calls: Vec<SlideStyleCall>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, text: impl Into<String>, left: f64, top: f64) -> Self {
        self.shapes.push(Shape {
            text: text.into(),
            left,
            top,
            removed: false,
        });
        self
    }

    pub fn table<S: Into<String>>(mut self, rows: Vec<Vec<S>>) -> Self {
        self.tables.push(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }

    /// An existing image with a title (alt text) and geometry.
    pub fn image(mut self, title: impl Into<String>, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.images.push(PageImage {
            title: title.into(),
            data: ImageData::Url(String::new()),
            left,
            top,
            width,
            height,
        });
        self
    }

    /// Text of a frame, empty when it does not exist or was removed.
    pub fn frame_text(&self, frame: FrameId) -> &str {
        self.frame(frame).map_or("", String::as_str)
    }

    pub fn style_calls(&self) -> &[SlideStyleCall] {
        &self.style_calls
    }

    pub fn image_records(&self) -> &[PageImage] {
        &self.images
    }

    fn frame(&self, frame: FrameId) -> Option<&String> {
        match frame {
            FrameId::Shape(index) => self.shapes.get(index).filter(|s| !s.removed).map(|s| &s.text),
            FrameId::TableCell { table, row, column } => {
                self.tables.get(table)?.get(row)?.get(column)
            },
        }
    }

    fn frame_mut(&mut self, frame: FrameId) -> Result<&mut String> {
        let text = match frame {
            FrameId::Shape(index) => self.shapes.get_mut(index).filter(|s| !s.removed).map(|s| &mut s.text),
            FrameId::TableCell { table, row, column } => self
                .tables
                .get_mut(table)
                .and_then(|t| t.get_mut(row))
                .and_then(|r| r.get_mut(column)),
        };
        text.ok_or_else(|| Error::Host(format!("frame {:?} does not exist", frame)))
    }

    fn live_shape(&self, shape: usize) -> Result<&Shape> {
        self.shapes
            .get(shape)
            .filter(|s| !s.removed)
            .ok_or_else(|| Error::Host(format!("shape {} does not exist", shape)))
    }

    fn image_mut(&mut self, image: ImageId) -> Result<&mut PageImage> {
        self.images
            .get_mut(image.0)
            .ok_or_else(|| Error::Host(format!("image {} does not exist", image.0)))
    }
}

impl SlidePage for MemoryPage {
    fn text_frames(&self) -> Vec<(FrameId, String)> {
        let shapes = self
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.removed)
            .map(|(i, s)| (FrameId::Shape(i), s.text.clone()));
        let cells = self.tables.iter().enumerate().flat_map(|(table, rows)| {
            rows.iter().enumerate().flat_map(move |(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(move |(column, text)| (FrameId::TableCell { table, row, column }, text.clone()))
            })
        });
        shapes.chain(cells).collect()
    }

    fn replace_all_text(&mut self, frame: FrameId, text: &str) -> Result<()> {
        *self.frame_mut(frame)? = text.to_string();
        Ok(())
    }

    fn set_text_style(
        &mut self,
        frame: FrameId,
        start: usize,
        end: usize,
        setter: StyleSetter,
        value: &StyleValue,
    ) -> Result<()> {
        let len = self.frame_mut(frame)?.chars().count();
        if start > end || end > len {
            return Err(Error::Host(format!(
                "style range {}..{} is outside frame {:?} of length {}",
                start, end, frame, len
            )));
        }
        self.style_calls.push(SlideStyleCall {
            frame,
            start,
            end,
            setter,
            value: value.clone(),
        });
        Ok(())
    }

    fn shape_position(&self, shape: usize) -> Result<(f64, f64)> {
        let shape = self.live_shape(shape)?;
        Ok((shape.left, shape.top))
    }

    fn replace_shape_with_image(&mut self, shape: usize, image: &ImageData) -> Result<ImageId> {
        let (left, top) = self.shape_position(shape)?;
        let (width, height) = match image {
            ImageData::Blob(blob) => {
                let (w, h) = blob.dimensions()?;
                (w as f64, h as f64)
            },
            ImageData::Url(_) => URL_IMAGE_SIZE,
        };
        self.shapes[shape].removed = true;
        self.images.push(PageImage {
            title: String::new(),
            data: image.clone(),
            left,
            top,
            width,
            height,
        });
        Ok(ImageId(self.images.len() - 1))
    }

    fn set_image_position(&mut self, image: ImageId, left: f64, top: f64) -> Result<()> {
        let image = self.image_mut(image)?;
        image.left = left;
        image.top = top;
        Ok(())
    }

    fn image_size(&self, image: ImageId) -> Result<(f64, f64)> {
        self.images
            .get(image.0)
            .map(|i| (i.width, i.height))
            .ok_or_else(|| Error::Host(format!("image {} does not exist", image.0)))
    }

    fn set_image_size(&mut self, image: ImageId, width: f64, height: f64) -> Result<()> {
        let image = self.image_mut(image)?;
        image.width = width;
        image.height = height;
        Ok(())
    }

    fn images(&self) -> Vec<(ImageId, String)> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, image)| (ImageId(i), image.title.clone()))
            .collect()
    }

    fn replace_image(&mut self, image: ImageId, data: &ImageData) -> Result<()> {
        self.image_mut(image)?.data = data.clone();
        Ok(())
    }
}

/// A deck of in-memory pages.
#[derive(Debug, Clone, Default)]
pub struct MemoryDeck {
    pages: Vec<MemoryPage>,
}

impl MemoryDeck {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    pub fn page(&self, index: usize) -> Option<&MemoryPage> {
        self.pages.get(index)
    }
}

impl SlideDeck for MemoryDeck {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self, index: usize) -> Option<&mut dyn SlidePage> {
        self.pages.get_mut(index).map(|page| page as &mut dyn SlidePage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_shapes_keep_indices() {
        let mut page = MemoryPage::new()
            .shape("a", 1.0, 2.0)
            .shape("b", 3.0, 4.0)
            .table(vec![vec!["c"]]);
        let image = page
            .replace_shape_with_image(0, &ImageData::Url("https://e.com/a.png".into()))
            .unwrap();
        assert_eq!(page.image_size(image).unwrap(), URL_IMAGE_SIZE);
        assert_eq!(page.image_records()[0].left, 1.0);

        let frames = page.text_frames();
        assert_eq!(frames[0], (FrameId::Shape(1), "b".to_string()));
        assert_eq!(frames[1].0, FrameId::TableCell {
            table: 0,
            row: 0,
            column: 0
        });
        assert!(page.shape_position(0).is_err());
        assert_eq!(page.shape_position(1).unwrap(), (3.0, 4.0));
    }
}
