//! Color syntax checks for theme token values
//!
//! Two syntaxes are recognized:
//! - Hex: exactly `#RRGGBB`, the form design tokens are written in
//! - CSS: anything a browser accepts as a color (`#RGB`, `rgb()`, `hsl()`,
//!   named colors, `currentColor`, ...)

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Theme categories whose token values are colors.
pub const COLOR_CATEGORIES: &[&str] = &[
    "colors",
    "accentColor",
    "backgroundColor",
    "borderColor",
    "caretColor",
    "divideColor",
    "fill",
    "gradientColorStops",
    "outlineColor",
    "placeholderColor",
    "ringColor",
    "ringOffsetColor",
    "stroke",
    "textColor",
    "textDecorationColor",
];

/// CSS-wide keywords that are valid wherever a color is.
const COLOR_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "currentcolor"];

/// Which color syntax token values are checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorSyntax {
    /// Only `#RRGGBB`
    #[default]
    Hex,
    /// Any CSS color
    Css,
}

impl std::str::FromStr for ColorSyntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorSyntax::Hex),
            "css" => Ok(ColorSyntax::Css),
            other => Err(format!("unknown color syntax '{}', expected 'hex' or 'css'", other)),
        }
    }
}

/// Error type for color syntax failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Wrong number of hex digits for the syntax in use
    #[error("invalid color length {0}, expected {1}")]
    InvalidLength(usize, &'static str),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Returns true if a theme category holds color tokens.
pub fn is_color_category(category: &str) -> bool {
    COLOR_CATEGORIES.contains(&category)
}

/// Check a color token value against a syntax.
///
/// # Examples
///
/// ```
/// use windcfg::color::{check_color, ColorSyntax};
///
/// assert!(check_color("#ff0080", ColorSyntax::Hex).is_ok());
/// assert!(check_color("#f08", ColorSyntax::Hex).is_err());
/// assert!(check_color("#f08", ColorSyntax::Css).is_ok());
/// assert!(check_color("rgb(255 0 128)", ColorSyntax::Css).is_ok());
/// ```
pub fn check_color(s: &str, syntax: ColorSyntax) -> Result<(), ColorError> {
    match syntax {
        ColorSyntax::Hex => parse_hex_rgb(s).map(|_| ()),
        ColorSyntax::Css => check_css_color(s),
    }
}

/// Parse a strict `#RRGGBB` literal into its channels.
pub fn parse_hex_rgb(s: &str) -> Result<[u8; 3], ColorError> {
    let hex = strip_hash(s)?;
    validate_hex_digits(hex)?;
    if hex.len() != 6 {
        return Err(ColorError::InvalidLength(hex.len(), "6"));
    }

    let bytes = hex.as_bytes();
    Ok([
        parse_hex_pair(bytes[0], bytes[1]),
        parse_hex_pair(bytes[2], bytes[3]),
        parse_hex_pair(bytes[4], bytes[5]),
    ])
}

fn check_css_color(s: &str) -> Result<(), ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    // Fast path for hex colors
    if let Some(hex) = s.strip_prefix('#') {
        validate_hex_digits(hex)?;
        return match hex.len() {
            3 | 4 | 6 | 8 => Ok(()),
            len => Err(ColorError::InvalidLength(len, "3, 4, 6, or 8")),
        };
    }

    if COLOR_KEYWORDS.contains(&s.to_ascii_lowercase().as_str()) {
        return Ok(());
    }

    CssColor::parse_string(s).map(|_| ()).map_err(|e| ColorError::CssParse(e.to_string()))
}

fn strip_hash(s: &str) -> Result<&str, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    s.strip_prefix('#').ok_or(ColorError::MissingHash)
}

fn validate_hex_digits(hex: &str) -> Result<(), ColorError> {
    match hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(c) => Err(ColorError::InvalidHex(c)),
        None => Ok(()),
    }
}

/// Combine two already-validated hex digit bytes into a channel value
fn parse_hex_pair(high: u8, low: u8) -> u8 {
    hex_value(high) * 16 + hex_value(low)
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb_channels() {
        assert_eq!(parse_hex_rgb("#ff0080"), Ok([255, 0, 128]));
        assert_eq!(parse_hex_rgb("#0080FF"), Ok([0, 128, 255]));
    }

    #[test]
    fn test_hex_rejects_short_forms() {
        assert_eq!(parse_hex_rgb("#f08"), Err(ColorError::InvalidLength(3, "6")));
        assert_eq!(parse_hex_rgb("#ff0080ff"), Err(ColorError::InvalidLength(8, "6")));
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(parse_hex_rgb(""), Err(ColorError::Empty));
        assert_eq!(parse_hex_rgb("ff0080"), Err(ColorError::MissingHash));
        assert_eq!(parse_hex_rgb("#ff00zz"), Err(ColorError::InvalidHex('z')));
        assert!(check_color("notacolor", ColorSyntax::Hex).is_err());
    }

    #[test]
    fn test_css_accepts_functional_and_named() {
        assert!(check_color("rgb(255, 0, 128)", ColorSyntax::Css).is_ok());
        assert!(check_color("hsl(0 100% 50%)", ColorSyntax::Css).is_ok());
        assert!(check_color("rebeccapurple", ColorSyntax::Css).is_ok());
        assert!(check_color("transparent", ColorSyntax::Css).is_ok());
        assert!(check_color("currentColor", ColorSyntax::Css).is_ok());
        assert!(check_color("inherit", ColorSyntax::Css).is_ok());
    }

    #[test]
    fn test_css_rejects_garbage() {
        assert!(check_color("notacolor", ColorSyntax::Css).is_err());
        assert!(check_color("#12345", ColorSyntax::Css).is_err());
        assert!(check_color("", ColorSyntax::Css).is_err());
    }

    #[test]
    fn test_named_colors_fail_hex_syntax() {
        assert!(check_color("transparent", ColorSyntax::Hex).is_err());
    }

    #[test]
    fn test_color_categories() {
        assert!(is_color_category("colors"));
        assert!(is_color_category("backgroundColor"));
        assert!(!is_color_category("spacing"));
    }

    #[test]
    fn test_color_syntax_from_str() {
        assert_eq!("hex".parse::<ColorSyntax>(), Ok(ColorSyntax::Hex));
        assert_eq!("CSS".parse::<ColorSyntax>(), Ok(ColorSyntax::Css));
        assert!("rgb".parse::<ColorSyntax>().is_err());
    }
}
