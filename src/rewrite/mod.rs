//! Placeholder location and rewriting.
//!
//! Two geometries share one style step:
//!
//! - [`document`]: a linear body searched occurrence by occurrence; each
//!   occurrence is replaced and its runs are reapplied at absolute offsets.
//! - [`slide`]: shapes and table cells whose whole trimmed text equals the
//!   placeholder; the frame's text is replaced as a unit.
//!
//! Runs that carry a link get a visible-link convention: an explicit
//! `underline: false` becomes underlined, and pure black text takes the
//! configured link color.

pub mod document;
pub mod slide;

use crate::common::{RGBColor, Result};
use crate::directive::HeaderDirectives;
use crate::style_table::{StyleProperty, StyleSetter, StyleTable, StyleValue, TextStyle};

/// Read-only state shared by every rewrite of one run.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub directives: &'a HeaderDirectives,
    pub styles: &'a StyleTable,
    /// Color forced onto black link text
    pub link_color: RGBColor,
    /// Whether captured runs are reapplied at all
    pub use_style: bool,
}

impl RewriteContext<'_> {
    /// Whether runs are reapplied for this placeholder.
    ///
    /// A `noStyle` marker anywhere in the token, in any case, disables them.
    pub fn styles_apply_to(&self, placeholder: &str) -> bool {
        self.use_style && !placeholder.to_ascii_lowercase().contains("nostyle")
    }
}

/// Reapply one run's style through `set`.
///
/// Every present property with a setter in the table is applied, then the
/// link convention overrides underline and color where it applies.
pub fn apply_run_style<F>(ctx: &RewriteContext<'_>, style: &TextStyle, mut set: F) -> Result<()>
where
    F: FnMut(StyleSetter, &StyleValue) -> Result<()>,
{
    for (property, value) in style.properties() {
        if let Some(setter) = ctx.styles.setter(property) {
            set(setter, &value)?;
        }
    }

    if style.has_link() {
        if style.underline == Some(false) {
            if let Some(setter) = ctx.styles.setter(StyleProperty::Underline) {
                set(setter, &StyleValue::Bool(true))?;
            }
        }
        if style.foreground_color.is_some_and(|c| c.is_black()) {
            if let Some(setter) = ctx.styles.setter(StyleProperty::ForegroundColor) {
                set(setter, &StyleValue::Color(ctx.link_color))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_calls(ctx: &RewriteContext<'_>, style: &TextStyle) -> Vec<(StyleSetter, StyleValue)> {
        let mut calls = Vec::new();
        apply_run_style(ctx, style, |setter, value| {
            calls.push((setter, value.clone()));
            Ok(())
        })
        .unwrap();
        calls
    }

    #[test]
    fn test_link_convention() {
        let directives = HeaderDirectives::default();
        let styles = StyleTable::default();
        let link_color = RGBColor::from_hex("#1155cc").unwrap();
        let ctx = RewriteContext {
            directives: &directives,
            styles: &styles,
            link_color,
            use_style: true,
        };
        let style = TextStyle {
            underline: Some(false),
            foreground_color: Some(RGBColor::BLACK),
            link: Some("https://example.com".into()),
            ..Default::default()
        };
        let calls = record_calls(&ctx, &style);
        assert_eq!(
            calls,
            vec![
                (StyleSetter::SetUnderline, StyleValue::Bool(false)),
                (StyleSetter::SetForegroundColor, StyleValue::Color(RGBColor::BLACK)),
                (StyleSetter::SetLinkUrl, StyleValue::Link("https://example.com".into())),
                (StyleSetter::SetUnderline, StyleValue::Bool(true)),
                (StyleSetter::SetForegroundColor, StyleValue::Color(link_color)),
            ]
        );
    }

    #[test]
    fn test_link_convention_keeps_chosen_color() {
        let directives = HeaderDirectives::default();
        let styles = StyleTable::default();
        let ctx = RewriteContext {
            directives: &directives,
            styles: &styles,
            link_color: RGBColor::new(1, 2, 3),
            use_style: true,
        };
        let red = RGBColor::new(255, 0, 0);
        let style = TextStyle {
            underline: Some(true),
            foreground_color: Some(red),
            link: Some("https://example.com".into()),
            ..Default::default()
        };
        let calls = record_calls(&ctx, &style);
        assert_eq!(calls.len(), 3);
        assert!(calls.contains(&(StyleSetter::SetForegroundColor, StyleValue::Color(red))));
    }

    #[test]
    fn test_excluded_link_leaves_other_setters() {
        let directives = HeaderDirectives::default();
        let all = StyleTable::default();
        let no_link = StyleTable::new(&["link"]);
        let style = TextStyle {
            bold: Some(true),
            font_family: Some("Arial".into()),
            ..Default::default()
        };
        let with = RewriteContext {
            directives: &directives,
            styles: &all,
            link_color: RGBColor::BLACK,
            use_style: true,
        };
        let without = RewriteContext {
            styles: &no_link,
            ..with
        };
        assert_eq!(record_calls(&with, &style), record_calls(&without, &style));
    }

    #[test]
    fn test_no_style_marker() {
        let directives = HeaderDirectives::default();
        let styles = StyleTable::default();
        let ctx = RewriteContext {
            directives: &directives,
            styles: &styles,
            link_color: RGBColor::BLACK,
            use_style: true,
        };
        assert!(ctx.styles_apply_to("{{name}}"));
        assert!(!ctx.styles_apply_to("{{name_noStyle}}"));
        assert!(!ctx.styles_apply_to("{{name_NOSTYLE}}"));
        let off = RewriteContext { use_style: false, ..ctx };
        assert!(!off.styles_apply_to("{{name}}"));
    }
}
