//! Template options.
//!
//! Options deserialize from camelCase keys, so the same YAML or JSON
//! document hosts already use for their settings loads directly:
//!
//! ```rust
//! use templet::config::TemplateOptions;
//!
//! let options = TemplateOptions::from_yaml_str(
//!     "useStyleOfSpreadsheet: true\nexcludeTextStyles: [link]\nlinkForGroundColorForDoc: '#ff0000'\n",
//! )?;
//! assert_eq!(options.exclude_text_styles, vec!["link".to_string()]);
//! assert_eq!(options.link_foreground_color_for_slide, "#0097a7");
//! # Ok::<(), templet::common::Error>(())
//! ```

use serde::Deserialize;

use crate::common::{Error, RGBColor, Result};
use crate::extract::Item;
use crate::style_table::StyleTable;

/// Link color forced onto black link text in documents.
pub const DEFAULT_DOC_LINK_COLOR: &str = "#1155cc";

/// Link color forced onto black link text on slides.
pub const DEFAULT_SLIDE_LINK_COLOR: &str = "#0097a7";

/// User-facing options of a template run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    #[serde(rename = "linkForGroundColorForDoc")]
    pub link_foreground_color_for_doc: String,
    #[serde(rename = "linkForGroundColorForSlide")]
    pub link_foreground_color_for_slide: String,
    /// Reapply the styles captured from the spreadsheet
    pub use_style_of_spreadsheet: bool,
    /// Style property names whose setters are dropped
    pub exclude_text_styles: Vec<String>,
    /// Replace titled placeholder images instead of inserting images at text
    /// tokens
    pub use_image_as_placeholder: bool,
    /// Map rows to the pages of the first deck rather than to whole decks
    pub rows_to_each_page_in_slide: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            link_foreground_color_for_doc: DEFAULT_DOC_LINK_COLOR.to_string(),
            link_foreground_color_for_slide: DEFAULT_SLIDE_LINK_COLOR.to_string(),
            use_style_of_spreadsheet: true,
            exclude_text_styles: Vec::new(),
            use_image_as_placeholder: false,
            rows_to_each_page_in_slide: true,
        }
    }
}

impl TemplateOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_of_spreadsheet(mut self, enabled: bool) -> Self {
        self.use_style_of_spreadsheet = enabled;
        self
    }

    pub fn with_excluded_styles<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.exclude_text_styles = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_as_placeholder(mut self, enabled: bool) -> Self {
        self.use_image_as_placeholder = enabled;
        self
    }

    pub fn with_rows_to_each_page(mut self, enabled: bool) -> Self {
        self.rows_to_each_page_in_slide = enabled;
        self
    }

    pub fn with_link_colors(mut self, doc: impl Into<String>, slide: impl Into<String>) -> Self {
        self.link_foreground_color_for_doc = doc.into();
        self.link_foreground_color_for_slide = slide.into();
        self
    }

    /// Load options from YAML (or JSON) text; missing keys take defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_saphyr::from_str(text).map_err(|e| Error::Config(format!("Failed to parse options: {}", e)))
    }

    /// Validate colors and build the style table.
    pub(crate) fn resolve(&self) -> Result<ResolvedOptions> {
        Ok(ResolvedOptions {
            styles: StyleTable::new(&self.exclude_text_styles),
            doc_link_color: self.link_foreground_color_for_doc.parse()?,
            slide_link_color: self.link_foreground_color_for_slide.parse()?,
            use_style: self.use_style_of_spreadsheet,
            use_image_as_placeholder: self.use_image_as_placeholder,
            rows_to_each_page: self.rows_to_each_page_in_slide,
        })
    }
}

/// Options after validation.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    pub styles: StyleTable,
    pub doc_link_color: RGBColor,
    pub slide_link_color: RGBColor,
    pub use_style: bool,
    pub use_image_as_placeholder: bool,
    pub rows_to_each_page: bool,
}

/// Load manual search/replace items from YAML (or JSON) text.
///
/// The document is a list with one entry per target, each entry a list of
/// `{search, replace}` pairs. Only text replacements can be expressed this
/// way.
pub fn items_from_yaml_str(text: &str) -> Result<Vec<Vec<Item>>> {
    serde_saphyr::from_str(text).map_err(|e| Error::Config(format!("Failed to parse items: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ItemValue;
    use crate::style_table::StyleProperty;

    #[test]
    fn test_defaults() {
        let options = TemplateOptions::from_yaml_str("{}").unwrap();
        assert_eq!(options, TemplateOptions::default());
        let resolved = options.resolve().unwrap();
        assert_eq!(resolved.doc_link_color, RGBColor::new(0x11, 0x55, 0xcc));
        assert_eq!(resolved.slide_link_color, RGBColor::new(0x00, 0x97, 0xa7));
        assert!(resolved.use_style);
        assert!(!resolved.use_image_as_placeholder);
        assert!(resolved.rows_to_each_page);
        assert_eq!(resolved.styles.len(), 8);
    }

    #[test]
    fn test_json_options() {
        let options = TemplateOptions::from_yaml_str(
            r#"{"useStyleOfSpreadsheet": false, "excludeTextStyles": ["bold", "nope"], "useImageAsPlaceholder": true, "rowsToEachPageInSlide": false}"#,
        )
        .unwrap();
        let resolved = options.resolve().unwrap();
        assert!(!resolved.use_style);
        assert!(resolved.use_image_as_placeholder);
        assert!(!resolved.rows_to_each_page);
        assert!(!resolved.styles.contains(StyleProperty::Bold));
        assert_eq!(resolved.styles.len(), 7);
    }

    #[test]
    fn test_invalid_link_color() {
        let options = TemplateOptions {
            link_foreground_color_for_doc: "blue".into(),
            ..Default::default()
        };
        assert!(matches!(options.resolve(), Err(Error::Config(_))));
    }

    #[test]
    fn test_items_from_yaml() {
        let items = items_from_yaml_str(
            "- - search: '{{name}}'\n    replace: Ada\n  - search: '{{city}}'\n    replace: London\n- - search: '{{name}}'\n    replace: Grace\n",
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0][1].search, "{{city}}");
        assert_eq!(items[1][0].replace, ItemValue::Text("Grace".into()));
    }
}
