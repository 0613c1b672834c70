//! Configuration schema and structural validation
//!
//! A configuration source is first parsed into a raw [`Value`] tree, then
//! walked here into a typed [`WindConfig`]. Walking the tree by hand (rather
//! than deriving `Deserialize`) keeps the exact field path of every problem,
//! e.g. `theme.extend.colors.neon`.

use crate::color::{check_color, is_color_category, ColorSyntax};
use crate::content::{compile_pattern, dedup_patterns, ContentError, ContentMatcher};
use crate::theme::{resolve_theme, Theme, TokenMap};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validation severity level for value checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Treat as a schema error, fail the load
    Error,
    /// Emit a warning, continue
    Warn,
    /// Silently ignore
    Ignore,
}

impl Default for ValidationLevel {
    fn default() -> Self {
        Self::Warn
    }
}

impl std::str::FromStr for ValidationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(ValidationLevel::Error),
            "warn" | "warning" => Ok(ValidationLevel::Warn),
            "ignore" => Ok(ValidationLevel::Ignore),
            other => Err(format!("unknown level '{}', expected error, warn, or ignore", other)),
        }
    }
}

/// How token values are checked while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// What a malformed color does
    #[serde(default)]
    pub color_level: ValidationLevel,
    /// Which color syntax counts as well-formed
    #[serde(default)]
    pub color_syntax: ColorSyntax,
}

/// A configuration source that does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Path to the invalid field (e.g., "theme.extend.colors.neon")
    pub field: String,
    /// Error message
    pub message: String,
}

impl SchemaError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config: '{}' {}", self.field, self.message)
    }
}

impl std::error::Error for SchemaError {}

/// A token value that does not match the syntax expected for its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueWarning {
    /// Path to the token (e.g., "theme.extend.colors.bad")
    pub field: String,
    /// The raw value, passed through unchanged
    pub value: String,
    pub message: String,
}

impl std::fmt::Display for ValueWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config: '{}' {} (value '{}')", self.field, self.message, self.value)
    }
}

/// Ordered list of glob patterns naming the files to scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSources {
    patterns: Vec<String>,
}

impl ContentSources {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Patterns in declaration order, duplicates included
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Patterns in declaration order with later duplicates removed
    pub fn unique_patterns(&self) -> Vec<&str> {
        dedup_patterns(self.patterns.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Compile the patterns against a root directory.
    pub fn matcher(&self, root: &Path) -> Result<ContentMatcher, ContentError> {
        ContentMatcher::new(root, self.patterns.iter().map(String::as_str))
    }
}

/// Reference to a plugin; its shape belongs to the plugin subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginRef {
    /// A module name, e.g. `"@tailwindcss/forms"`
    Named(String),
    /// A module name with options
    Configured {
        name: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        options: Value,
    },
    /// Anything else, passed through untouched
    Opaque(Value),
}

impl PluginRef {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => PluginRef::Named(name.clone()),
            Value::Object(obj) => match obj.get("name") {
                Some(Value::String(name)) => PluginRef::Configured {
                    name: name.clone(),
                    options: obj.get("options").cloned().unwrap_or(Value::Null),
                },
                _ => PluginRef::Opaque(value.clone()),
            },
            other => PluginRef::Opaque(other.clone()),
        }
    }

    /// Module name, when the reference has one
    pub fn name(&self) -> Option<&str> {
        match self {
            PluginRef::Named(name) | PluginRef::Configured { name, .. } => Some(name),
            PluginRef::Opaque(_) => None,
        }
    }
}

/// `important` setting: a flag or a selector to scope utilities under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Important {
    Flag(bool),
    Selector(String),
}

impl Default for Important {
    fn default() -> Self {
        Important::Flag(false)
    }
}

/// Theme section as written: replacements and extensions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    /// Categories set directly under `theme`, replacing the defaults
    #[serde(flatten)]
    pub overrides: Theme,
    /// Categories under `theme.extend`, merged over the defaults
    #[serde(skip_serializing_if = "Theme::is_empty")]
    pub extend: Theme,
}

/// A validated configuration, before the theme is resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindConfig {
    /// Files to scan for class names (required)
    pub content: ContentSources,
    pub theme: ThemeConfig,
    /// Plugins, in application order
    pub plugins: Vec<PluginRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub important: Important,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<String>,
}

/// The configuration a generator consumes: the theme is fully merged
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Directory content patterns are relative to
    #[serde(skip)]
    pub root: PathBuf,
    pub content: ContentSources,
    /// Effective theme: defaults, then replacements, then extensions
    pub theme: Theme,
    pub plugins: Vec<PluginRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub important: Important,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<String>,
}

impl ResolvedConfig {
    /// Compile the content sources relative to the config root.
    pub fn content_matcher(&self) -> Result<ContentMatcher, ContentError> {
        self.content.matcher(&self.root)
    }
}

/// Result of a successful validation
#[derive(Debug, Clone)]
pub struct Validated {
    pub config: WindConfig,
    pub warnings: Vec<ValueWarning>,
}

impl WindConfig {
    /// Validate a raw value tree.
    ///
    /// Every schema problem is collected; if any are found no configuration
    /// is returned.
    pub fn from_value(
        value: &Value,
        options: &ValidateOptions,
    ) -> Result<Validated, Vec<SchemaError>> {
        let mut walker = Walker { options, errors: Vec::new(), warnings: Vec::new() };

        let Value::Object(root) = value else {
            return Err(vec![SchemaError::new(
                "<root>",
                format!("must be an object, found {}", type_name(value)),
            )]);
        };

        let content = walker.content(root.get("content"));
        let theme = walker.theme(root.get("theme"));
        let plugins = walker.plugins(root.get("plugins"));
        let prefix = walker.optional_string(root, "prefix");
        let dark_mode = walker.optional_string(root, "darkMode");
        let important = walker.important(root.get("important"));

        for key in root.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                debug!(key = %key, "ignoring unknown configuration key");
            }
        }

        if !walker.errors.is_empty() {
            return Err(walker.errors);
        }

        Ok(Validated {
            config: WindConfig { content, theme, plugins, prefix, important, dark_mode },
            warnings: walker.warnings,
        })
    }

    /// Merge the theme over `defaults` and produce the consumable configuration.
    pub fn resolve(&self, defaults: &Theme, root: &Path) -> ResolvedConfig {
        ResolvedConfig {
            root: root.to_path_buf(),
            content: self.content.clone(),
            theme: resolve_theme(defaults, &self.theme.overrides, &self.theme.extend),
            plugins: self.plugins.clone(),
            prefix: self.prefix.clone(),
            important: self.important.clone(),
            dark_mode: self.dark_mode.clone(),
        }
    }
}

const KNOWN_KEYS: &[&str] = &["content", "theme", "plugins", "prefix", "important", "darkMode"];

struct Walker<'a> {
    options: &'a ValidateOptions,
    errors: Vec<SchemaError>,
    warnings: Vec<ValueWarning>,
}

impl Walker<'_> {
    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(SchemaError::new(field, message));
    }

    fn content(&mut self, value: Option<&Value>) -> ContentSources {
        match value {
            None => {
                self.error("content", "is required");
                ContentSources::default()
            }
            Some(Value::Array(items)) => self.patterns("content", items),
            Some(Value::Object(obj)) => match obj.get("files") {
                Some(Value::Array(items)) => self.patterns("content.files", items),
                Some(other) => {
                    self.error("content.files", format!("must be a list, found {}", type_name(other)));
                    ContentSources::default()
                }
                None => {
                    self.error("content.files", "is required");
                    ContentSources::default()
                }
            },
            Some(other) => {
                self.error(
                    "content",
                    format!("must be a list of glob patterns, found {}", type_name(other)),
                );
                ContentSources::default()
            }
        }
    }

    fn patterns(&mut self, field: &str, items: &[Value]) -> ContentSources {
        if items.is_empty() {
            self.error(field, "must contain at least one glob pattern");
        }

        let mut patterns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_field = format!("{}[{}]", field, i);
            match item {
                Value::String(s) if s.is_empty() => self.error(item_field, "must be a non-empty string"),
                Value::String(s) => match compile_pattern(s) {
                    Ok(_) => patterns.push(s.clone()),
                    Err(e) => self.error(item_field, e.to_string()),
                },
                other => self.error(item_field, format!("must be a string, found {}", type_name(other))),
            }
        }
        ContentSources::new(patterns)
    }

    fn theme(&mut self, value: Option<&Value>) -> ThemeConfig {
        let mut theme = ThemeConfig::default();
        let obj = match value {
            None => return theme,
            Some(Value::Object(obj)) => obj,
            Some(other) => {
                self.error("theme", format!("must be a mapping, found {}", type_name(other)));
                return theme;
            }
        };

        for (key, value) in obj {
            if key == "extend" {
                theme.extend = self.theme_tree("theme.extend", value);
            } else {
                let field = format!("theme.{}", key);
                if let Some(tokens) = self.category(&field, key, value) {
                    theme.overrides.insert_category(key.clone(), tokens);
                }
            }
        }
        theme
    }

    fn theme_tree(&mut self, field: &str, value: &Value) -> Theme {
        let Value::Object(obj) = value else {
            self.error(field, format!("must be a mapping of categories, found {}", type_name(value)));
            return Theme::new();
        };

        let mut tree = Theme::new();
        for (category, tokens) in obj {
            let category_field = format!("{}.{}", field, category);
            if let Some(tokens) = self.category(&category_field, category, tokens) {
                tree.insert_category(category.clone(), tokens);
            }
        }
        tree
    }

    fn category(&mut self, field: &str, category: &str, value: &Value) -> Option<TokenMap> {
        let Value::Object(obj) = value else {
            self.error(
                field,
                format!("must be a mapping of token names to values, found {}", type_name(value)),
            );
            return None;
        };

        let mut tokens = TokenMap::new();
        self.flatten(field, category, None, obj, &mut tokens);
        Some(tokens)
    }

    /// Flatten nested token groups: `neon: { pink }` becomes `neon-pink`,
    /// and a nested `DEFAULT` key names the group itself.
    fn flatten(
        &mut self,
        field: &str,
        category: &str,
        group: Option<&str>,
        obj: &Map<String, Value>,
        tokens: &mut TokenMap,
    ) {
        for (key, value) in obj {
            let token_field = format!("{}.{}", field, key);
            let token = match group {
                None => key.clone(),
                Some(group) if key == "DEFAULT" => group.to_string(),
                Some(group) => format!("{}-{}", group, key),
            };

            match value {
                Value::String(s) => {
                    if tokens.contains_key(&token) {
                        self.error(token_field, format!("duplicates token '{}'", token));
                        continue;
                    }
                    if is_color_category(category) {
                        self.check_color_value(&token_field, s);
                    }
                    tokens.insert(token, s.clone());
                }
                Value::Object(nested) => {
                    self.flatten(&token_field, category, Some(token.as_str()), nested, tokens);
                }
                other => self.error(
                    token_field,
                    format!("must be a string or a nested mapping, found {}", type_name(other)),
                ),
            }
        }
    }

    fn check_color_value(&mut self, field: &str, value: &str) {
        if self.options.color_level == ValidationLevel::Ignore {
            return;
        }
        let Err(e) = check_color(value, self.options.color_syntax) else {
            return;
        };

        let message = format!("is not a well-formed {} color: {}", syntax_label(self.options.color_syntax), e);
        match self.options.color_level {
            ValidationLevel::Error => self.error(field, message),
            ValidationLevel::Warn => self.warnings.push(ValueWarning {
                field: field.to_string(),
                value: value.to_string(),
                message,
            }),
            ValidationLevel::Ignore => {}
        }
    }

    fn plugins(&mut self, value: Option<&Value>) -> Vec<PluginRef> {
        match value {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(PluginRef::from_value).collect(),
            Some(other) => {
                self.error("plugins", format!("must be a list, found {}", type_name(other)));
                Vec::new()
            }
        }
    }

    fn optional_string(&mut self, root: &Map<String, Value>, key: &str) -> Option<String> {
        match root.get(key) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.error(key, format!("must be a string, found {}", type_name(other)));
                None
            }
        }
    }

    fn important(&mut self, value: Option<&Value>) -> Important {
        match value {
            None => Important::default(),
            Some(Value::Bool(flag)) => Important::Flag(*flag),
            Some(Value::String(selector)) => Important::Selector(selector.clone()),
            Some(other) => {
                self.error(
                    "important",
                    format!("must be a boolean or a selector string, found {}", type_name(other)),
                );
                Important::default()
            }
        }
    }
}

fn syntax_label(syntax: ColorSyntax) -> &'static str {
    match syntax {
        ColorSyntax::Hex => "hex (#RRGGBB)",
        ColorSyntax::Css => "CSS",
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
