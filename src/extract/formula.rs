//! Pattern matching on formula text and placeholder fragments.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_FORMULA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)^=IMAGE\("#).expect("Failed to build IMAGE formula matcher"));

static IMAGE_FORMULA_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^=IMAGE\(\s*['"](.*?)['"]"#).expect("Failed to build IMAGE url matcher")
});

static WIDTH_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)width:(\d+)").expect("Failed to build width matcher"));

/// Whether the formula is an `=IMAGE(...)` call.
#[inline]
pub fn is_image_formula(formula: &str) -> bool {
    IMAGE_FORMULA.is_match(formula)
}

/// URL given as the first, quoted argument of an `=IMAGE(...)` formula.
///
/// Returns `None` when the first argument is not a string literal, e.g. a cell
/// reference.
pub fn image_formula_url(formula: &str) -> Option<&str> {
    IMAGE_FORMULA_URL
        .captures(formula)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Width given as a `width:<digits>` fragment anywhere in a search token.
pub fn width_fragment(token: &str) -> Option<f64> {
    WIDTH_FRAGMENT
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|w| *w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_formula_url() {
        assert!(is_image_formula("=IMAGE(\"https://example.com/a.png\")"));
        assert!(is_image_formula("=image('x')"));
        assert!(!is_image_formula("=SUM(A1:A3)"));
        assert_eq!(
            image_formula_url("=IMAGE(\"https://example.com/a.png\", 4, 100, 200)"),
            Some("https://example.com/a.png")
        );
        assert_eq!(image_formula_url("=image('https://e.com/b.jpg')"), Some("https://e.com/b.jpg"));
    }

    #[test]
    fn test_image_formula_with_reference() {
        assert!(is_image_formula("=IMAGE(A2)"));
        assert_eq!(image_formula_url("=IMAGE(A2)"), None);
    }

    #[test]
    fn test_width_fragment() {
        assert_eq!(width_fragment("{{logo_WIDTH:250}}"), Some(250.0));
        assert_eq!(width_fragment("{{logo}}"), None);
        assert_eq!(width_fragment("{{logo_width:}}"), None);
    }
}
