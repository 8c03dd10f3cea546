//! In-memory spreadsheet range.

use std::cell::Cell;

use crate::common::{Blob, Result};
use crate::extract::{CellValue, RichTextValue, SheetImage, SheetRange, SourceRun};

/// One cell of a [`MemoryRange`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCell {
    display: String,
    value: CellValue,
    formula: String,
    runs: Vec<SourceRun>,
    image: Option<Blob>,
}

impl MemoryCell {
    pub fn text(text: impl Into<String>) -> Self {
        let display = text.into();
        let value = if display.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(display.clone())
        };
        Self {
            display,
            value,
            ..Default::default()
        }
    }

    /// Text with style runs (character offsets, end-exclusive).
    pub fn styled(text: impl Into<String>, runs: Vec<SourceRun>) -> Self {
        Self {
            runs,
            ..Self::text(text)
        }
    }

    /// A formula cell displaying nothing, like `=IMAGE(...)`.
    pub fn formula(formula: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            ..Default::default()
        }
    }

    pub fn number(number: f64) -> Self {
        Self {
            display: number.to_string(),
            value: CellValue::Number(number),
            ..Default::default()
        }
    }

    /// An image placed in the cell.
    pub fn image(blob: Blob) -> Self {
        Self {
            value: CellValue::Image,
            image: Some(blob),
            ..Default::default()
        }
    }
}

/// A spreadsheet range held in memory.
///
/// The header row is given separately and always comes first in every grid.
#[derive(Debug, Default)]
pub struct MemoryRange {
    header: Vec<String>,
    rows: Vec<Vec<MemoryCell>>,
    image_requests: Cell<usize>,
}

impl MemoryRange {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn row(mut self, cells: impl IntoIterator<Item = MemoryCell>) -> Self {
        self.rows.push(cells.into_iter().collect());
        self
    }

    /// Number of times [`SheetRange::images`] was called.
    pub fn image_requests(&self) -> usize {
        self.image_requests.get()
    }

    fn grid<T>(&self, header: impl Fn(&str) -> T, cell: impl Fn(&MemoryCell) -> T) -> Vec<Vec<T>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header.iter().map(|h| header(h)).collect());
        grid.extend(self.rows.iter().map(|row| row.iter().map(&cell).collect()));
        grid
    }
}

impl SheetRange for MemoryRange {
    fn display_values(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.grid(str::to_string, |c| c.display.clone()))
    }

    fn values(&self) -> Result<Vec<Vec<CellValue>>> {
        Ok(self.grid(|h| CellValue::Text(h.to_string()), |c| c.value.clone()))
    }

    fn formulas(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.grid(|_| String::new(), |c| c.formula.clone()))
    }

    fn rich_text_values(&self) -> Result<Vec<Vec<RichTextValue>>> {
        Ok(self.grid(
            |h| RichTextValue {
                text: h.to_string(),
                runs: Vec::new(),
            },
            |c| RichTextValue {
                text: c.display.clone(),
                runs: c.runs.clone(),
            },
        ))
    }

    fn images(&self) -> Result<Vec<SheetImage>> {
        self.image_requests.set(self.image_requests.get() + 1);
        let mut images = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                if let Some(blob) = &cell.image {
                    images.push(SheetImage {
                        row: i + 1,
                        column,
                        blob: blob.clone(),
                    });
                }
            }
        }
        Ok(images)
    }
}
