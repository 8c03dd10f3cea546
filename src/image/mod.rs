//! Image substitution.
//!
//! Image placeholders are handled in one of two ways:
//!
//! - text tokens are replaced by an image: inline in documents
//!   ([`document`]), or by swapping the placeholder shape for an image on
//!   slides ([`slide`]);
//! - with placeholder images enabled, existing images whose title equals the
//!   placeholder get their content replaced ([`placeholder`]).
//!
//! Widths come from a `width` directive (pixels, default 512). Heights come
//! from a `height` directive or follow the image's intrinsic aspect ratio.

pub mod document;
pub mod placeholder;
pub mod slide;

pub use placeholder::ScratchDocument;

use crate::common::unit::{DEFAULT_IMAGE_WIDTH, height_for_width};
use crate::common::{Error, Result};
use crate::directive::HeaderDirectives;
use crate::extract::CellRecord;
use crate::extract::formula::width_fragment;
use crate::host::ImageData;

/// Size requested for an image placeholder, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestedSize {
    pub width: f64,
    /// `None` keeps the intrinsic aspect ratio
    pub height: Option<f64>,
}

impl RequestedSize {
    /// Size requested by the directives of a placeholder.
    ///
    /// A bare `width:<n>` fragment in the token counts too, which covers
    /// manual items whose searches were not written as directive segments.
    pub fn for_placeholder(directives: &HeaderDirectives, placeholder: &str) -> Self {
        let width = directives
            .width(placeholder)
            .or_else(|| width_fragment(placeholder))
            .unwrap_or(DEFAULT_IMAGE_WIDTH);
        Self {
            width,
            height: directives.height(placeholder),
        }
    }

    /// Scale both dimensions, e.g. from pixels to points.
    pub fn scaled(self, convert: impl Fn(f64) -> f64) -> Self {
        Self {
            width: convert(self.width),
            height: self.height.map(convert),
        }
    }

    /// Final `(width, height)` for an image of the given intrinsic size.
    pub fn resolve(&self, intrinsic: (f64, f64)) -> (f64, f64) {
        let height = self
            .height
            .unwrap_or_else(|| height_for_width(self.width, intrinsic.0, intrinsic.1));
        (self.width, height)
    }
}

/// The payload of an image record, failing when it has none.
pub fn require_image(record: &CellRecord) -> Result<ImageData> {
    record.to.content.image_data().ok_or_else(|| Error::ImageNotFound {
        placeholder: record.from.clone(),
    })
}
