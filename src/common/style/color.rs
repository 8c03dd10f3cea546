use std::fmt;
use std::str::FromStr;

use crate::common::Error;

/// RGB color representation.
///
/// Foreground colors captured from source cells and the configured link
/// colors are both carried as `RGBColor`. The `Display` form is the lowercase
/// `#rrggbb` string hosts expect.
///
/// # Examples
///
/// ```rust
/// use templet::common::RGBColor;
///
/// let link = RGBColor::from_hex("#1155cc").unwrap();
/// assert_eq!(link.to_string(), "#1155cc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Pure black, which the link convention treats as "no color chosen".
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts `RRGGBB` or `#RRGGBB` in either case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use templet::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000ff").unwrap();
    /// assert_eq!(red, RGBColor::new(255, 0, 0));
    /// assert_eq!(blue, RGBColor::new(0, 0, 255));
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to lowercase hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for RGBColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::Config(format!("Invalid hex color: '{}'", s)))
    }
}
