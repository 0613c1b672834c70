//! Design-token trees and the additive theme merge.
//!
//! A [`Theme`] maps a category name (`colors`, `spacing`, ...) to a
//! [`TokenMap`] of token name to CSS value. The effective theme a generator
//! uses is computed from the built-in defaults in two steps:
//!
//! 1. categories set directly under `theme` replace the default category
//! 2. categories under `theme.extend` are merged on top, key by key

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use defaults::default_theme;

/// Token name to value, within one category.
pub type TokenMap = BTreeMap<String, String>;

/// Category name to token map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    categories: BTreeMap<String, TokenMap>,
}

/// One level of the additive merge.
///
/// Token values are leaves and the extension wins outright. Maps recurse,
/// keeping every key the extension does not mention.
pub trait MergeAdditive {
    fn merge_from(&mut self, extend: &Self);
}

impl MergeAdditive for String {
    fn merge_from(&mut self, extend: &Self) {
        self.clone_from(extend);
    }
}

impl<V: MergeAdditive + Clone> MergeAdditive for BTreeMap<String, V> {
    fn merge_from(&mut self, extend: &Self) {
        for (key, value) in extend {
            match self.get_mut(key) {
                Some(existing) => existing.merge_from(value),
                None => {
                    self.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl MergeAdditive for Theme {
    fn merge_from(&mut self, extend: &Self) {
        self.categories.merge_from(&extend.categories);
    }
}

/// Merge `extend` on top of `defaults` without deleting anything.
///
/// Categories only in `defaults` are kept, categories only in `extend` are
/// added, and shared categories are merged token by token with `extend`
/// winning on conflict. Merging the same extension twice gives the same
/// result as merging it once.
///
/// ```
/// use windcfg::theme::{deep_merge_additive, Theme};
///
/// let defaults = Theme::from_pairs([("colors", "red", "#ff0000")]);
/// let extend = Theme::from_pairs([("colors", "neonPink", "#ff0080")]);
/// let merged = deep_merge_additive(&defaults, &extend);
///
/// assert_eq!(merged.get("colors", "red"), Some("#ff0000"));
/// assert_eq!(merged.get("colors", "neonPink"), Some("#ff0080"));
/// ```
pub fn deep_merge_additive(defaults: &Theme, extend: &Theme) -> Theme {
    let mut merged = defaults.clone();
    merged.merge_from(extend);
    merged
}

/// Compute the effective theme: replace, then extend.
pub fn resolve_theme(defaults: &Theme, overrides: &Theme, extend: &Theme) -> Theme {
    let base = defaults.replace_categories(overrides);
    deep_merge_additive(&base, extend)
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a theme from `(category, token, value)` triples.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut theme = Theme::new();
        for (category, token, value) in pairs {
            theme.insert(category, token, value);
        }
        theme
    }

    /// Insert a single token, creating the category if needed.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.categories.entry(category.into()).or_default().insert(token.into(), value.into())
    }

    /// Insert or replace a whole category.
    pub fn insert_category(&mut self, category: impl Into<String>, tokens: TokenMap) {
        self.categories.insert(category.into(), tokens);
    }

    pub fn category(&self, name: &str) -> Option<&TokenMap> {
        self.categories.get(name)
    }

    pub fn get(&self, category: &str, token: &str) -> Option<&str> {
        self.categories.get(category)?.get(token).map(String::as_str)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenMap)> {
        self.categories.iter()
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of tokens across all categories
    pub fn token_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Return a copy where every category present in `overrides` replaces
    /// the category of the same name wholesale.
    pub fn replace_categories(&self, overrides: &Theme) -> Theme {
        let mut replaced = self.clone();
        for (name, tokens) in &overrides.categories {
            replaced.categories.insert(name.clone(), tokens.clone());
        }
        replaced
    }
}

impl FromIterator<(String, TokenMap)> for Theme {
    fn from_iter<I: IntoIterator<Item = (String, TokenMap)>>(iter: I) -> Self {
        Theme { categories: iter.into_iter().collect() }
    }
}
