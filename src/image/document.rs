//! Inline image insertion in document bodies.

use super::RequestedSize;
use crate::common::{Blob, Error, Result};
use crate::extract::CellRecord;
use crate::host::{ImageData, ImageFetcher, TemplateDocument, TextPosition};
use crate::rewrite::RewriteContext;

/// Replace every occurrence of an image placeholder with an inline image.
///
/// The token's text is deleted and the image is inserted at its offset.
/// Occurrences inside elements that cannot hold inline images are left alone
/// and logged. A URL payload is downloaded once, on the first occurrence.
///
/// Returns the number of images inserted.
pub fn insert_image_placeholder(
    ctx: &RewriteContext<'_>,
    doc: &mut dyn TemplateDocument,
    record: &CellRecord,
    data: &ImageData,
    fetcher: Option<&dyn ImageFetcher>,
) -> Result<usize> {
    let size = RequestedSize::for_placeholder(ctx.directives, &record.from);
    let mut blob: Option<Blob> = None;
    let mut from = None;
    let mut count = 0;

    while let Some(found) = doc.find_text(&record.from, from) {
        let kind = doc.container_kind(found.element);
        if !kind.accepts_inline_images() {
            log::warn!(
                "An image cannot be inserted into \"{}\"; skipping '{}'.",
                kind,
                record.from
            );
            from = Some(TextPosition {
                element: found.element,
                offset: found.end,
            });
            continue;
        }

        let payload = match blob.take() {
            Some(b) => b,
            None => resolve_blob(data, fetcher)?,
        };
        doc.replace_text(&found, "")?;
        let image = doc.insert_inline_image(found.element, found.start, &payload)?;
        let (width, height) = size.resolve(doc.image_size(image)?);
        doc.set_image_size(image, width, height)?;
        blob = Some(payload);

        count += 1;
        from = Some(TextPosition {
            element: found.element,
            offset: found.start,
        });
    }
    Ok(count)
}

fn resolve_blob(data: &ImageData, fetcher: Option<&dyn ImageFetcher>) -> Result<Blob> {
    match data {
        ImageData::Blob(blob) => Ok(blob.clone()),
        ImageData::Url(url) => {
            let fetcher = fetcher.ok_or(Error::MissingObject("image fetcher"))?;
            fetcher.fetch(url)
        },
    }
}
