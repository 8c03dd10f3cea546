//! Unit conversion utilities.
//!
//! Image sizes in directives are given in pixels. Documents take them as-is,
//! slide decks measure in points.

/// Width used when an image placeholder carries no `width` directive.
pub const DEFAULT_IMAGE_WIDTH: f64 = 512.0;

/// Pixels per point on the slide path.
pub const SLIDE_PX_PER_PT: f64 = 1.33333;

#[inline]
pub fn px_to_slide_pt(px: f64) -> f64 {
    px / SLIDE_PX_PER_PT
}

/// Height that keeps `intrinsic_width : intrinsic_height` at the given width.
///
/// Degenerate intrinsic sizes fall back to a square image.
#[inline]
pub fn height_for_width(width: f64, intrinsic_width: f64, intrinsic_height: f64) -> f64 {
    if intrinsic_width <= 0.0 || intrinsic_height <= 0.0 {
        return width;
    }
    width * intrinsic_height / intrinsic_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_slide_pt() {
        let pt = px_to_slide_pt(400.0);
        assert!((pt - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_height_for_width() {
        assert_eq!(height_for_width(300.0, 200.0, 100.0), 150.0);
        assert_eq!(height_for_width(300.0, 0.0, 100.0), 300.0);
    }
}
