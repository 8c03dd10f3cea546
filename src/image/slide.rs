//! Image insertion on slide pages.

use super::RequestedSize;
use crate::common::Result;
use crate::common::unit::px_to_slide_pt;
use crate::extract::CellRecord;
use crate::host::{ImageData, SlidePage};
use crate::rewrite::RewriteContext;
use crate::rewrite::slide::FrameIndex;

/// Replace every shape holding an image placeholder with the image.
///
/// The image takes the shape's top-left corner and is sized in points
/// (directive pixels divided by 1.33333). Table cells carrying the
/// placeholder are not touched.
///
/// Returns the number of shapes replaced.
pub fn insert_image_placeholder(
    ctx: &RewriteContext<'_>,
    page: &mut dyn SlidePage,
    index: &FrameIndex,
    record: &CellRecord,
    data: &ImageData,
) -> Result<usize> {
    let size = RequestedSize::for_placeholder(ctx.directives, &record.from).scaled(px_to_slide_pt);
    let mut count = 0;
    for shape in index.shapes(&record.from) {
        let (left, top) = page.shape_position(shape)?;
        let image = page.replace_shape_with_image(shape, data)?;
        page.set_image_position(image, left, top)?;
        let (width, height) = size.resolve(page.image_size(image)?);
        page.set_image_size(image, width, height)?;
        count += 1;
    }
    Ok(count)
}
