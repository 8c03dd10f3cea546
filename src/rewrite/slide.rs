//! Rewriting placeholders held by shapes and table cells.

use std::collections::HashMap;

use super::{RewriteContext, apply_run_style};
use crate::common::Result;
use crate::extract::CellRecord;
use crate::host::{FrameId, SlidePage};

/// Frames of a page keyed by their trimmed text.
///
/// Blank frames are not indexed.
///
/// Several frames may carry the same placeholder, so each key maps to all of
/// them in page order.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    by_text: HashMap<String, Vec<FrameId>>,
}

impl FrameIndex {
    pub fn build(page: &dyn SlidePage) -> Self {
        let mut by_text: HashMap<String, Vec<FrameId>> = HashMap::new();
        for (frame, text) in page.text_frames() {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            by_text.entry(text.to_string()).or_default().push(frame);
        }
        Self { by_text }
    }

    pub fn frames(&self, placeholder: &str) -> &[FrameId] {
        self.by_text
            .get(placeholder)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Shapes (not table cells) carrying the placeholder.
    pub fn shapes<'a>(&'a self, placeholder: &str) -> impl Iterator<Item = usize> + use<'a> {
        self.frames(placeholder).iter().filter_map(FrameId::shape)
    }
}

/// Replace the text of every frame whose trimmed text is the placeholder.
///
/// Runs are reapplied against the frame's own text, whose ranges are
/// end-exclusive, so offsets are used as captured.
///
/// Returns the number of frames rewritten.
pub fn replace_text_placeholder(
    ctx: &RewriteContext<'_>,
    page: &mut dyn SlidePage,
    index: &FrameIndex,
    record: &CellRecord,
) -> Result<usize> {
    let frames = index.frames(&record.from);
    let styled = ctx.styles_apply_to(&record.from);
    for &frame in frames {
        page.replace_all_text(frame, &record.to.text)?;
        if !styled {
            continue;
        }
        for run in &record.to.runs {
            apply_run_style(ctx, &run.style, |setter, value| {
                page.set_text_style(frame, run.start, run.end, setter, value)
            })?;
        }
    }
    Ok(frames.len())
}
