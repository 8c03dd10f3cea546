//! Control directives embedded in placeholder tokens.
//!
//! A header such as `{{photo_image_width:400_noStyle}}` carries, besides its
//! key, a list of `_`-separated segments. Each segment is `name` or
//! `name:value`; names from a fixed set are recognized case-insensitively and
//! everything else is ignored.
//!
//! ```rust
//! use templet::directive::{DirectiveName, DirectiveValue, parse_directives};
//!
//! let directives = parse_directives("{{photo_image_width:400_noStyle}}");
//! assert_eq!(directives.get(DirectiveName::Width), Some(&DirectiveValue::Number(400.0)));
//! assert!(directives.is_set(DirectiveName::NoStyle));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use phf::phf_map;
use smallvec::SmallVec;

use crate::common::{Error, Result};

/// Recognized directive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveName {
    NoStyle,
    Image,
    Width,
    Height,
    Header,
    FileId,
}

impl DirectiveName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoStyle => "noStyle",
            Self::Image => "image",
            Self::Width => "width",
            Self::Height => "height",
            Self::Header => "header",
            Self::FileId => "fileId",
        }
    }
}

impl fmt::Display for DirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-cased directive name to its variant.
static DIRECTIVE_NAMES: phf::Map<&'static str, DirectiveName> = phf_map! {
    "NOSTYLE" => DirectiveName::NoStyle,
    "IMAGE" => DirectiveName::Image,
    "WIDTH" => DirectiveName::Width,
    "HEIGHT" => DirectiveName::Height,
    "HEADER" => DirectiveName::Header,
    "FILEID" => DirectiveName::FileId,
};

/// Value attached to a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    /// Bare `name` segment
    Flag,
    /// `name:value` where the value reads as a finite number
    Number(f64),
    /// Any other `name:value`
    Text(String),
}

impl DirectiveValue {
    fn coerce(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Directives parsed from one header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    entries: SmallVec<[(DirectiveName, DirectiveValue); 4]>,
}

impl Directives {
    pub fn get(&self, name: DirectiveName) -> Option<&DirectiveValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn is_set(&self, name: DirectiveName) -> bool {
        self.get(name).is_some()
    }

    /// Positive numeric value of a directive.
    ///
    /// Zero, negative and non-numeric values read as absent so callers fall
    /// back to their defaults.
    pub fn positive_number(&self, name: DirectiveName) -> Option<f64> {
        self.get(name)
            .and_then(DirectiveValue::as_number)
            .filter(|n| *n > 0.0)
    }

    pub fn width(&self) -> Option<f64> {
        self.positive_number(DirectiveName::Width)
    }

    pub fn height(&self) -> Option<f64> {
        self.positive_number(DirectiveName::Height)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DirectiveName, &DirectiveValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    fn insert(&mut self, name: DirectiveName, value: DirectiveValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }
}

/// Parse the directives embedded in one header or placeholder string.
///
/// The input is only read; the returned value never aliases it.
pub fn parse_directives(header: &str) -> Directives {
    let stripped = header.replace("{{", "").replace("}}", "");
    let mut directives = Directives::default();
    for segment in stripped.split('_') {
        let mut parts = segment.split(':').map(str::trim);
        let Some(name) = parts.next() else {
            continue;
        };
        let Some(&directive) = DIRECTIVE_NAMES.get(name.to_ascii_uppercase().as_str()) else {
            continue;
        };
        let value = match parts.next() {
            Some(raw) => DirectiveValue::coerce(raw),
            None => DirectiveValue::Flag,
        };
        directives.insert(directive, value);
    }
    directives
}

/// Directives for every header of a data model.
///
/// Headers without any recognized directive are absent.
#[derive(Debug, Clone, Default)]
pub struct HeaderDirectives {
    by_header: HashMap<String, Directives>,
}

impl HeaderDirectives {
    /// Parse a header row, rejecting duplicate tokens.
    pub fn parse<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(headers.len());
        for header in headers {
            if !seen.insert(header.as_ref()) {
                return Err(Error::DuplicateHeader(header.as_ref().to_string()));
            }
        }

        let by_header = headers
            .iter()
            .filter_map(|header| {
                let directives = parse_directives(header.as_ref());
                (!directives.is_empty()).then(|| (header.as_ref().to_string(), directives))
            })
            .collect();
        Ok(Self { by_header })
    }

    pub fn get(&self, header: &str) -> Option<&Directives> {
        self.by_header.get(header)
    }

    pub fn width(&self, header: &str) -> Option<f64> {
        self.get(header).and_then(Directives::width)
    }

    pub fn height(&self, header: &str) -> Option<f64> {
        self.get(header).and_then(Directives::height)
    }

    pub fn len(&self) -> usize {
        self.by_header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_header.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_and_numbers() {
        let d = parse_directives("{{photo_image_width:400_noStyle}}");
        assert_eq!(d.get(DirectiveName::Image), Some(&DirectiveValue::Flag));
        assert_eq!(d.width(), Some(400.0));
        assert!(d.is_set(DirectiveName::NoStyle));
        assert!(!d.is_set(DirectiveName::FileId));
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let d = parse_directives("{{x_NOSTYLE_Width:12_fileid}}");
        assert!(d.is_set(DirectiveName::NoStyle));
        assert!(d.is_set(DirectiveName::FileId));
        assert_eq!(d.width(), Some(12.0));
    }

    #[test]
    fn test_iter_keeps_first_position_and_last_value() {
        let d = parse_directives("{{pic_width:10_image_width:20}}");
        let entries: Vec<_> = d.iter().collect();
        assert_eq!(entries, vec![
            (DirectiveName::Width, &DirectiveValue::Number(20.0)),
            (DirectiveName::Image, &DirectiveValue::Flag),
        ]);
    }

    #[test]
    fn test_unknown_segments_are_ignored() {
        let d = parse_directives("{{first_name}}");
        assert!(d.is_empty());
    }

    #[test]
    fn test_non_numeric_width_falls_back() {
        let d = parse_directives("{{pic_image_width:wide}}");
        assert_eq!(d.get(DirectiveName::Width), Some(&DirectiveValue::Text("wide".into())));
        assert_eq!(d.width(), None);

        let d = parse_directives("{{pic_image_width:}}");
        assert_eq!(d.width(), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let d = parse_directives("{{pic_image_width: 300 _height:150}}");
        assert_eq!(d.width(), Some(300.0));
        assert_eq!(d.height(), Some(150.0));
    }

    #[test]
    fn test_header_directives_skip_plain_headers() {
        let headers = ["{{name}}", "{{photo_image}}", "{{note_noStyle}}"];
        let parsed = HeaderDirectives::parse(&headers).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.get("{{name}}").is_none());
        assert!(parsed.get("{{photo_image}}").unwrap().is_set(DirectiveName::Image));
    }

    #[test]
    fn test_duplicate_headers_fail() {
        let headers = ["{{a}}", "{{b}}", "{{a}}"];
        match HeaderDirectives::parse(&headers) {
            Err(Error::DuplicateHeader(h)) => assert_eq!(h, "{{a}}"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_parsing_never_panics(header in ".{0,64}") {
                let _ = parse_directives(&header);
            }

            #[test]
            fn prop_width_round_trips(key in "[a-z]{1,8}", width in 1u32..5000) {
                let header = format!("{{{{{}_image_width:{}}}}}", key, width);
                let d = parse_directives(&header);
                prop_assert_eq!(d.width(), Some(width as f64));
                prop_assert!(d.is_set(DirectiveName::Image));
            }
        }
    }
}
