//! In-memory document body.

use memchr::memmem;

use crate::common::{Blob, Error, Result};
use crate::host::{ContainerKind, ElementId, ImageId, TemplateDocument, TextMatch, TextPosition};
use crate::style_table::{StyleSetter, StyleValue};

/// A recorded `set_text_style` call.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCall {
    pub element: ElementId,
    pub start: usize,
    pub end_inclusive: usize,
    pub setter: StyleSetter,
    pub value: StyleValue,
}

/// An image inserted inline.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub element: ElementId,
    /// Character offset the image was inserted at
    pub offset: usize,
    pub width: f64,
    pub height: f64,
    pub blob: Blob,
}

#[derive(Debug, Clone)]
struct Element {
    kind: ContainerKind,
    text: String,
}

/// A document body made of text elements.
///
/// Inline images are tracked beside the text and take no character
/// positions.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: String,
    elements: Vec<Element>,
    style_calls: Vec<StyleCall>,
    images: Vec<InlineImage>,
}

impl MemoryDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
            style_calls: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.element(ContainerKind::Paragraph, text)
    }

    pub fn list_item(self, text: impl Into<String>) -> Self {
        self.element(ContainerKind::ListItem, text)
    }

    pub fn element(mut self, kind: ContainerKind, text: impl Into<String>) -> Self {
        self.elements.push(Element {
            kind,
            text: text.into(),
        });
        self
    }

    /// Text of an element, empty when out of range.
    pub fn text(&self, element: ElementId) -> &str {
        self.elements.get(element).map_or("", |e| e.text.as_str())
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn style_calls(&self) -> &[StyleCall] {
        &self.style_calls
    }

    pub fn inline_images(&self) -> &[InlineImage] {
        &self.images
    }

    fn element_mut(&mut self, element: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(element)
            .ok_or_else(|| Error::Host(format!("element {} does not exist", element)))
    }

    fn image_mut(&mut self, image: ImageId) -> Result<&mut InlineImage> {
        self.images
            .get_mut(image.0)
            .ok_or_else(|| Error::Host(format!("inline image {} does not exist", image.0)))
    }
}

/// Byte index of a character offset, clamped to the end of `text`.
fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices().nth(offset).map_or(text.len(), |(i, _)| i)
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

impl TemplateDocument for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn find_text(&self, needle: &str, from: Option<TextPosition>) -> Option<TextMatch> {
        if needle.is_empty() {
            return None;
        }
        let finder = memmem::Finder::new(needle.as_bytes());
        let (first, offset) = from.map_or((0, 0), |p| (p.element, p.offset));
        let needle_chars = needle.chars().count();

        for (element, e) in self.elements.iter().enumerate().skip(first) {
            let skip = if element == first { offset } else { 0 };
            let base = byte_index(&e.text, skip);
            if let Some(found) = finder.find(&e.text.as_bytes()[base..]) {
                let start = char_offset(&e.text, base + found);
                return Some(TextMatch {
                    element,
                    start,
                    end: start + needle_chars,
                });
            }
        }
        None
    }

    fn replace_text(&mut self, at: &TextMatch, replacement: &str) -> Result<()> {
        let element = self.element_mut(at.element)?;
        let start = byte_index(&element.text, at.start);
        let end = byte_index(&element.text, at.end);
        element.text.replace_range(start..end, replacement);
        Ok(())
    }

    fn set_text_style(
        &mut self,
        element: ElementId,
        start: usize,
        end_inclusive: usize,
        setter: StyleSetter,
        value: &StyleValue,
    ) -> Result<()> {
        let len = self.element_mut(element)?.text.chars().count();
        // A collapsed range may sit right after the last character.
        if start > end_inclusive || end_inclusive > len {
            return Err(Error::Host(format!(
                "style range {}..={} is outside element {} of length {}",
                start, end_inclusive, element, len
            )));
        }
        self.style_calls.push(StyleCall {
            element,
            start,
            end_inclusive,
            setter,
            value: value.clone(),
        });
        Ok(())
    }

    fn container_kind(&self, element: ElementId) -> ContainerKind {
        self.elements
            .get(element)
            .map_or(ContainerKind::Other("UNKNOWN".to_string()), |e| e.kind.clone())
    }

    fn insert_inline_image(&mut self, element: ElementId, offset: usize, blob: &Blob) -> Result<ImageId> {
        self.element_mut(element)?;
        let (width, height) = blob.dimensions()?;
        self.images.push(InlineImage {
            element,
            offset,
            width: width as f64,
            height: height as f64,
            blob: blob.clone(),
        });
        Ok(ImageId(self.images.len() - 1))
    }

    fn image_size(&self, image: ImageId) -> Result<(f64, f64)> {
        self.images
            .get(image.0)
            .map(|i| (i.width, i.height))
            .ok_or_else(|| Error::Host(format!("inline image {} does not exist", image.0)))
    }

    fn set_image_size(&mut self, image: ImageId, width: f64, height: f64) -> Result<()> {
        let image = self.image_mut(image)?;
        image.width = width;
        image.height = height;
        Ok(())
    }
}
