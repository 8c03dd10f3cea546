//! Style conversion table.
//!
//! Maps each semantic style property captured from a source run to the
//! host-side setter that reapplies it. The table is built once from the
//! default mapping minus an exclusion list and is read-only afterwards.

use std::fmt;

use phf::phf_map;

use crate::common::RGBColor;

/// Semantic style properties captured from source runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Bold,
    Italic,
    FontFamily,
    Strikethrough,
    Underline,
    ForegroundColor,
    FontSize,
    Link,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 8] = [
        Self::Bold,
        Self::Italic,
        Self::FontFamily,
        Self::Strikethrough,
        Self::Underline,
        Self::ForegroundColor,
        Self::FontSize,
        Self::Link,
    ];

    /// Name accepted in `excludeTextStyles`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::FontFamily => "fontFamily",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underline",
            Self::ForegroundColor => "foregroundColor",
            Self::FontSize => "fontSize",
            Self::Link => "link",
        }
    }

    /// Look up a property by its exclusion name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        PROPERTY_NAMES.get(name).copied()
    }

    fn default_setter(&self) -> StyleSetter {
        match self {
            Self::Bold => StyleSetter::SetBold,
            Self::Italic => StyleSetter::SetItalic,
            Self::FontFamily => StyleSetter::SetFontFamily,
            Self::Strikethrough => StyleSetter::SetStrikethrough,
            Self::Underline => StyleSetter::SetUnderline,
            Self::ForegroundColor => StyleSetter::SetForegroundColor,
            Self::FontSize => StyleSetter::SetFontSize,
            Self::Link => StyleSetter::SetLinkUrl,
        }
    }

    #[inline]
    fn index(&self) -> usize {
        *self as usize
    }
}

static PROPERTY_NAMES: phf::Map<&'static str, StyleProperty> = phf_map! {
    "bold" => StyleProperty::Bold,
    "italic" => StyleProperty::Italic,
    "fontFamily" => StyleProperty::FontFamily,
    "strikethrough" => StyleProperty::Strikethrough,
    "underline" => StyleProperty::Underline,
    "foregroundColor" => StyleProperty::ForegroundColor,
    "fontSize" => StyleProperty::FontSize,
    "link" => StyleProperty::Link,
};

/// Host-side style setter operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSetter {
    SetBold,
    SetItalic,
    SetFontFamily,
    SetStrikethrough,
    SetUnderline,
    SetForegroundColor,
    SetFontSize,
    SetLinkUrl,
}

impl StyleSetter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetBold => "setBold",
            Self::SetItalic => "setItalic",
            Self::SetFontFamily => "setFontFamily",
            Self::SetStrikethrough => "setStrikethrough",
            Self::SetUnderline => "setUnderline",
            Self::SetForegroundColor => "setForegroundColor",
            Self::SetFontSize => "setFontSize",
            Self::SetLinkUrl => "setLinkUrl",
        }
    }
}

impl fmt::Display for StyleSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument handed to a style setter.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Bool(bool),
    Text(String),
    Number(f64),
    Color(RGBColor),
    /// A link URL
    Link(String),
}

/// Style captured from one source run.
///
/// Absent fields were not reported by the source and are not reapplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_family: Option<String>,
    pub strikethrough: Option<bool>,
    pub underline: Option<bool>,
    pub foreground_color: Option<RGBColor>,
    pub font_size: Option<f64>,
    pub link: Option<String>,
}

impl TextStyle {
    /// Present properties with their values, in table order.
    pub fn properties(&self) -> impl Iterator<Item = (StyleProperty, StyleValue)> + '_ {
        StyleProperty::ALL
            .into_iter()
            .filter_map(move |property| self.value(property).map(|value| (property, value)))
    }

    pub fn value(&self, property: StyleProperty) -> Option<StyleValue> {
        match property {
            StyleProperty::Bold => self.bold.map(StyleValue::Bool),
            StyleProperty::Italic => self.italic.map(StyleValue::Bool),
            StyleProperty::FontFamily => self.font_family.clone().map(StyleValue::Text),
            StyleProperty::Strikethrough => self.strikethrough.map(StyleValue::Bool),
            StyleProperty::Underline => self.underline.map(StyleValue::Bool),
            StyleProperty::ForegroundColor => self.foreground_color.map(StyleValue::Color),
            StyleProperty::FontSize => self.font_size.map(StyleValue::Number),
            StyleProperty::Link => self.link.clone().map(StyleValue::Link),
        }
    }

    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.properties().next().is_none()
    }
}

/// Property-to-setter lookup used while reapplying runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    setters: [Option<StyleSetter>; 8],
}

impl StyleTable {
    /// Build the table, dropping every property named in `exclude`.
    ///
    /// Names that are not style properties are ignored.
    pub fn new<S: AsRef<str>>(exclude: &[S]) -> Self {
        let mut setters = StyleProperty::ALL.map(|p| Some(p.default_setter()));
        for property in exclude
            .iter()
            .filter_map(|name| StyleProperty::from_name(name.as_ref()))
        {
            setters[property.index()] = None;
        }
        Self { setters }
    }

    #[inline]
    pub fn setter(&self, property: StyleProperty) -> Option<StyleSetter> {
        self.setters[property.index()]
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.setter(property).is_some()
    }

    pub fn len(&self) -> usize {
        self.setters.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}
