//! Rewriting placeholders in linear document bodies.

use super::{RewriteContext, apply_run_style};
use crate::common::Result;
use crate::extract::CellRecord;
use crate::host::{TemplateDocument, TextMatch, TextPosition};

/// Replace every occurrence of a text placeholder in `doc`.
///
/// Each occurrence is replaced with the record's text and, unless styles are
/// off for this placeholder, every captured run is reapplied at that
/// occurrence's absolute offsets. Searching resumes after the inserted text,
/// so a replacement containing its own token is not revisited.
///
/// Returns the number of occurrences replaced.
pub fn replace_text_placeholder(
    ctx: &RewriteContext<'_>,
    doc: &mut dyn TemplateDocument,
    record: &CellRecord,
) -> Result<usize> {
    let styled = ctx.styles_apply_to(&record.from);
    let inserted_len = record.to.text.chars().count();
    let mut from = None;
    let mut count = 0;

    while let Some(found) = doc.find_text(&record.from, from) {
        doc.replace_text(&found, &record.to.text)?;
        if styled {
            restyle_occurrence(ctx, doc, &found, record)?;
        }
        count += 1;
        from = Some(TextPosition {
            element: found.element,
            offset: found.start + inserted_len,
        });
    }

    if count > 0 {
        log::debug!("replaced {} occurrence(s) of '{}'", count, record.from);
    }
    Ok(count)
}

fn restyle_occurrence(
    ctx: &RewriteContext<'_>,
    doc: &mut dyn TemplateDocument,
    found: &TextMatch,
    record: &CellRecord,
) -> Result<()> {
    for run in &record.to.runs {
        let start = found.start + run.start;
        let end = found.start + run.end;
        // Document ranges are inclusive; a zero-width run stays at its start.
        let end_inclusive = if start == end { start } else { end - 1 };
        apply_run_style(ctx, &run.style, |setter, value| {
            doc.set_text_style(found.element, start, end_inclusive, setter, value)
        })?;
    }
    Ok(())
}
