//! Built-in default design tokens.
//!
//! The token set a generator starts from before any `theme` or
//! `theme.extend` section is applied. Values follow the Tailwind v3 defaults.

use super::{Theme, TokenMap};

/// Names of the categories present in the default theme.
const DEFAULT_CATEGORIES: &[&str] = &["borderRadius", "colors", "spacing"];

/// Returns a list of all categories the default theme defines.
pub fn list_categories() -> Vec<&'static str> {
    DEFAULT_CATEGORIES.to_vec()
}

/// Returns the full built-in default theme.
pub fn default_theme() -> Theme {
    let mut theme = Theme::new();
    theme.insert_category("borderRadius", border_radius());
    theme.insert_category("colors", colors());
    theme.insert_category("spacing", spacing());
    theme
}

fn tokens(pairs: &[(&str, &str)]) -> TokenMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Core color palette, five shades per hue.
fn colors() -> TokenMap {
    let mut map = tokens(&[
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000000"),
        ("white", "#ffffff"),
    ]);

    let hues: &[(&str, [&str; 5])] = &[
        ("gray", ["#f3f4f6", "#d1d5db", "#6b7280", "#374151", "#111827"]),
        ("red", ["#fee2e2", "#fca5a5", "#ef4444", "#b91c1c", "#7f1d1d"]),
        ("yellow", ["#fef9c3", "#fde047", "#eab308", "#a16207", "#713f12"]),
        ("green", ["#dcfce7", "#86efac", "#22c55e", "#15803d", "#14532d"]),
        ("blue", ["#dbeafe", "#93c5fd", "#3b82f6", "#1d4ed8", "#1e3a8a"]),
        ("purple", ["#f3e8ff", "#d8b4fe", "#a855f7", "#7e22ce", "#581c87"]),
        ("pink", ["#fce7f3", "#f9a8d4", "#ec4899", "#be185d", "#831843"]),
    ];
    for (hue, shades) in hues {
        for (step, value) in ["100", "300", "500", "700", "900"].iter().zip(shades) {
            map.insert(format!("{}-{}", hue, step), value.to_string());
        }
    }

    map
}

fn spacing() -> TokenMap {
    tokens(&[
        ("px", "1px"),
        ("0", "0px"),
        ("0.5", "0.125rem"),
        ("1", "0.25rem"),
        ("2", "0.5rem"),
        ("4", "1rem"),
        ("8", "2rem"),
        ("16", "4rem"),
    ])
}

fn border_radius() -> TokenMap {
    tokens(&[
        ("none", "0px"),
        ("sm", "0.125rem"),
        ("DEFAULT", "0.25rem"),
        ("lg", "0.5rem"),
        ("full", "9999px"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{check_color, ColorSyntax};

    #[test]
    fn test_list_categories_match_theme() {
        let theme = default_theme();
        let names: Vec<&str> = theme.category_names().collect();
        assert_eq!(names, list_categories());
    }

    #[test]
    fn test_default_colors_present() {
        let theme = default_theme();
        assert_eq!(theme.get("colors", "black"), Some("#000000"));
        assert_eq!(theme.get("colors", "red-500"), Some("#ef4444"));
        assert_eq!(theme.get("colors", "current"), Some("currentColor"));
        assert_eq!(theme.get("colors", "neon-pink"), None);
    }

    #[test]
    fn test_default_colors_are_valid_css() {
        let theme = default_theme();
        for (name, value) in theme.category("colors").unwrap() {
            assert!(check_color(value, ColorSyntax::Css).is_ok(), "default color '{}' = '{}'", name, value);
        }
    }

    #[test]
    fn test_border_radius_keeps_root_default() {
        let theme = default_theme();
        assert_eq!(theme.get("borderRadius", "DEFAULT"), Some("0.25rem"));
    }
}
