//! Configuration source text to a raw value tree.
//!
//! JavaScript configs are the common case: a single object literal assigned
//! to `module.exports` or exported with `export default`. Object literals of
//! that kind are JSON5, so the export wrapper is stripped and the remainder
//! parsed with `json5`. `require('pkg')` calls (used for plugins) become the
//! string `"pkg"` first.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Supported configuration source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.js`, `.cjs`, `.mjs` module exporting an object literal
    JsModule,
    /// `.json`
    Json,
    /// `.json5`
    Json5,
    /// `.toml`
    Toml,
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js") | Some("cjs") | Some("mjs") => Some(SourceFormat::JsModule),
            Some("json") => Some(SourceFormat::Json),
            Some("json5") => Some(SourceFormat::Json5),
            Some("toml") => Some(SourceFormat::Toml),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::JsModule => write!(f, "js"),
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Json5 => write!(f, "json5"),
            SourceFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Error turning source text into a value tree
#[derive(Debug, Error)]
pub enum SourceError {
    /// JS module without a recognizable export
    #[error("no exported object found, expected `module.exports = {{ ... }}` or `export default {{ ... }}`")]
    MissingExport,
    /// Exported object literal without its closing `}`
    #[error("exported object is missing its closing brace")]
    UnclosedExport,
    #[error("invalid JSON5: {0}")]
    Json5(#[from] json5::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parse configuration source text into a raw value tree.
pub fn parse_source(text: &str, format: SourceFormat) -> Result<Value, SourceError> {
    match format {
        SourceFormat::JsModule => {
            let literal = exported_literal(text)?;
            Ok(json5::from_str(&inline_requires(literal))?)
        }
        SourceFormat::Json => Ok(serde_json::from_str(text)?),
        SourceFormat::Json5 => Ok(json5::from_str(text)?),
        SourceFormat::Toml => Ok(toml::from_str(text)?),
    }
}

/// Keywords introducing the exported config object
const EXPORT_KEYWORDS: [&str; 2] = ["module.exports", "export default"];

/// Return the exported object literal of a JS module, from `{` to its matching `}`.
///
/// Comments and string literals are skipped while looking for the export and
/// while matching braces, so anything after the closing brace is ignored.
fn exported_literal(text: &str) -> Result<&str, SourceError> {
    let bytes = text.as_bytes();
    let keyword_at = scan_code(text, 0, |i, _| {
        EXPORT_KEYWORDS.iter().any(|k| bytes[i..].starts_with(k.as_bytes()))
    })
    .ok_or(SourceError::MissingExport)?;
    let keyword = EXPORT_KEYWORDS
        .iter()
        .find(|k| bytes[keyword_at..].starts_with(k.as_bytes()))
        .ok_or(SourceError::MissingExport)?;

    let mut pos = keyword_at + keyword.len();
    if *keyword == "module.exports" {
        let eq = next_token(text, pos).filter(|i| bytes[*i] == b'=').ok_or(SourceError::MissingExport)?;
        pos = eq + 1;
    }
    let open = next_token(text, pos).filter(|i| bytes[*i] == b'{').ok_or(SourceError::MissingExport)?;

    let mut depth = 0usize;
    let close = scan_code(text, open, |_, b| {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        depth == 0
    })
    .ok_or(SourceError::UnclosedExport)?;

    Ok(&text[open..=close])
}

/// Position of the next non-whitespace byte outside comments.
fn next_token(text: &str, from: usize) -> Option<usize> {
    scan_code(text, from, |_, b| !b.is_ascii_whitespace())
}

/// Visit each byte from `from` that is outside a comment or string literal,
/// returning the first position where `hit` is true.
fn scan_code(text: &str, from: usize, mut hit: impl FnMut(usize, u8) -> bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = text[i..].find('\n').map_or(bytes.len(), |n| i + n);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = text[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b => {
                if hit(i, b) {
                    return Some(i);
                }
                i += 1;
            }
        }
    }
    None
}

/// Replace `require('name')` calls with the string literal `"name"`.
fn inline_requires(text: &str) -> String {
    const CALL: &str = "require(";

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(CALL) {
        out.push_str(&rest[..pos]);
        let args = &rest[pos + CALL.len()..];
        match require_argument(args) {
            Some((name, consumed)) => {
                out.push('"');
                out.push_str(name);
                out.push('"');
                rest = &args[consumed..];
            }
            None => {
                out.push_str(CALL);
                rest = args;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse `'name')` and return the name and the number of bytes consumed.
fn require_argument(args: &str) -> Option<(&str, usize)> {
    let trimmed = args.trim_start();
    let lead = args.len() - trimmed.len();

    let quote = trimmed.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &trimmed[1..];
    let end = body.find(quote)?;
    let name = &body[..end];

    let after = &body[end + 1..];
    let after_trimmed = after.trim_start();
    if !after_trimmed.starts_with(')') {
        return None;
    }

    let consumed = lead + 1 + end + 1 + (after.len() - after_trimmed.len()) + 1;
    Some((name, consumed))
}
