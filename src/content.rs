//! Content-source glob patterns.
//!
//! Patterns use standard glob syntax (`*`, `**`) plus `{a,b,c}` brace
//! alternation, which the `glob` crate does not understand, so braces are
//! expanded here before compiling. Relative patterns are resolved against the
//! directory holding the configuration file.

use glob::{MatchOptions, Pattern, PatternError};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Error in a content-source pattern
#[derive(Debug, Error)]
pub enum ContentError {
    /// `{` without a matching `}` or the reverse
    #[error("unbalanced braces in pattern '{0}'")]
    UnbalancedBraces(String),
    /// Pattern rejected by the glob compiler
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    /// Brace alternation producing too many globs
    #[error("pattern '{pattern}' expands to more than {limit} globs")]
    TooManyExpansions { pattern: String, limit: usize },
}

/// Upper bound on the globs a single pattern may expand to
pub const MAX_BRACE_EXPANSIONS: usize = 1024;

/// Expand `{a,b}` alternation groups into plain glob patterns.
///
/// Groups may nest. The expansion order follows the order of alternatives.
/// A pattern expanding to more than [`MAX_BRACE_EXPANSIONS`] globs is rejected.
///
/// ```
/// use windcfg::content::expand_braces;
///
/// let expanded = expand_braces("./src/**/*.{rs,html}").unwrap();
/// assert_eq!(expanded, vec!["./src/**/*.rs", "./src/**/*.html"]);
/// ```
pub fn expand_braces(pattern: &str) -> Result<Vec<String>, ContentError> {
    let mut expanded = Vec::new();
    expand_into(pattern, pattern, &mut expanded)?;
    Ok(expanded)
}

/// Expand `current` into `out`, reporting errors against `original`.
fn expand_into(original: &str, current: &str, out: &mut Vec<String>) -> Result<(), ContentError> {
    let unbalanced = || ContentError::UnbalancedBraces(original.to_string());

    let Some(open) = current.find('{') else {
        if current.contains('}') {
            return Err(unbalanced());
        }
        if out.len() == MAX_BRACE_EXPANSIONS {
            return Err(ContentError::TooManyExpansions {
                pattern: original.to_string(),
                limit: MAX_BRACE_EXPANSIONS,
            });
        }
        out.push(current.to_string());
        return Ok(());
    };
    if current[..open].contains('}') {
        return Err(unbalanced());
    }

    let mut depth = 0usize;
    let mut close = None;
    let mut commas = Vec::new();
    for (offset, c) in current[open..].char_indices() {
        let idx = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(idx),
            _ => {}
        }
    }
    let close = close.ok_or_else(unbalanced)?;

    let prefix = &current[..open];
    let suffix = &current[close + 1..];

    let mut alternatives = Vec::with_capacity(commas.len() + 1);
    let mut start = open + 1;
    for comma in commas {
        alternatives.push(&current[start..comma]);
        start = comma + 1;
    }
    alternatives.push(&current[start..close]);

    for alternative in alternatives {
        // later groups in the suffix and nested groups are still present
        let candidate = format!("{}{}{}", prefix, alternative, suffix);
        expand_into(original, &candidate, out)?;
    }
    Ok(())
}

/// Expand and compile a pattern, returning one glob per alternative.
pub fn compile_pattern(pattern: &str) -> Result<Vec<Pattern>, ContentError> {
    expand_braces(pattern)?
        .into_iter()
        .map(|expanded| {
            Pattern::new(&expanded)
                .map_err(|source| ContentError::InvalidPattern { pattern: pattern.to_string(), source })
        })
        .collect()
}

/// Remove duplicate patterns, keeping the first occurrence of each.
pub fn dedup_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    patterns.into_iter().filter(|p| seen.insert(*p)).collect()
}

/// Resolve a pattern relative to the configuration root.
///
/// Absolute patterns are returned unchanged. A leading `./` is dropped. The
/// root is escaped so that glob characters in directory names match literally.
pub fn resolve_pattern(root: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let relative = pattern.strip_prefix("./").unwrap_or(pattern);
    let root = Pattern::escape(&root.to_string_lossy());
    let joined = Path::new(&root).join(relative);
    joined.to_string_lossy().into_owned()
}

/// Compiled content sources, used to ask whether a file is scanned.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    patterns: Vec<Pattern>,
}

impl ContentMatcher {
    /// Compile every pattern against `root`, expanding braces and skipping duplicates.
    pub fn new<'a>(
        root: &Path,
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ContentError> {
        let mut compiled = Vec::new();
        for pattern in dedup_patterns(patterns) {
            for expanded in expand_braces(pattern)? {
                let resolved = resolve_pattern(root, &expanded);
                let glob = Pattern::new(&resolved).map_err(|source| ContentError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                compiled.push(glob);
            }
        }
        Ok(Self { patterns: compiled })
    }

    /// Returns true if any pattern matches the path.
    pub fn matches(&self, path: &Path) -> bool {
        let options = MatchOptions { require_literal_separator: true, ..MatchOptions::new() };
        self.patterns.iter().any(|p| p.matches_path_with(path, options))
    }

    /// Number of compiled globs after brace expansion
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_no_braces() {
        assert_eq!(expand_braces("./index.html").unwrap(), vec!["./index.html"]);
    }

    #[test]
    fn test_expand_multiple_groups() {
        let expanded = expand_braces("{src,lib}/*.{rs,css}").unwrap();
        assert_eq!(expanded, vec!["src/*.rs", "src/*.css", "lib/*.rs", "lib/*.css"]);
    }

    #[test]
    fn test_expand_nested_group() {
        let expanded = expand_braces("*.{html,{j,t}s}").unwrap();
        assert_eq!(expanded, vec!["*.html", "*.js", "*.ts"]);
    }

    #[test]
    fn test_expand_unbalanced() {
        assert!(matches!(expand_braces("src/*.{rs,html"), Err(ContentError::UnbalancedBraces(_))));
        assert!(matches!(expand_braces("src/}*.rs"), Err(ContentError::UnbalancedBraces(_))));
        assert!(matches!(expand_braces("{a}}"), Err(ContentError::UnbalancedBraces(_))));
    }

    #[test]
    fn test_expand_caps_alternatives() {
        // eleven two-way groups make 2048 globs
        let pattern = "{a,b}".repeat(11);
        let err = expand_braces(&pattern).unwrap_err();
        assert!(matches!(
            err,
            ContentError::TooManyExpansions { limit: MAX_BRACE_EXPANSIONS, .. }
        ));

        // ten groups make exactly 1024
        assert_eq!(expand_braces(&"{a,b}".repeat(10)).unwrap().len(), MAX_BRACE_EXPANSIONS);
    }

    #[test]
    fn test_expand_error_names_original_pattern() {
        let err = expand_braces("{a,b}/*.{rs").unwrap_err();
        assert!(err.to_string().contains("'{a,b}/*.{rs'"));
    }

    #[test]
    fn test_compile_rejects_bad_glob() {
        assert!(matches!(compile_pattern("src/***/x"), Err(ContentError::InvalidPattern { .. })));
        assert_eq!(compile_pattern("./src/**/*.{rs,html,css}").unwrap().len(), 3);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let patterns = ["b/*.rs", "a/*.rs", "b/*.rs", "c/*.rs", "a/*.rs"];
        assert_eq!(dedup_patterns(patterns), vec!["b/*.rs", "a/*.rs", "c/*.rs"]);
    }

    #[test]
    fn test_resolve_pattern() {
        let root = Path::new("/project");
        assert_eq!(resolve_pattern(root, "./src/**/*.rs"), "/project/src/**/*.rs");
        assert_eq!(resolve_pattern(root, "index.html"), "/project/index.html");
        assert_eq!(resolve_pattern(root, "/abs/*.html"), "/abs/*.html");
    }

    #[test]
    fn test_resolve_pattern_escapes_root() {
        let resolved = resolve_pattern(Path::new("/srv/site[v2]"), "./*.html");
        assert_eq!(resolved, "/srv/site[[]v2[]]/*.html");
    }

    #[test]
    fn test_matcher_root_with_glob_characters() {
        let matcher = ContentMatcher::new(Path::new("/srv/site[v2]"), ["./index.html", "./src/**/*.rs"])
            .unwrap();
        assert!(matcher.matches(Path::new("/srv/site[v2]/index.html")));
        assert!(matcher.matches(Path::new("/srv/site[v2]/src/lib.rs")));
        assert!(!matcher.matches(Path::new("/srv/sitev/index.html")));
        assert!(!matcher.matches(Path::new("/srv/site2/index.html")));

        // an unbalanced bracket in the root is not a pattern error
        let matcher = ContentMatcher::new(Path::new("/srv/site[old"), ["*.html"]).unwrap();
        assert!(matcher.matches(Path::new("/srv/site[old/index.html")));
    }

    #[test]
    fn test_matcher() {
        let root = Path::new("/project");
        let matcher =
            ContentMatcher::new(root, ["./index.html", "./src/**/*.{rs,html,css}", "./src/**/*.rs"])
                .unwrap();

        // the duplicate "./src/**/*.rs" is dropped, braces expand to three
        assert_eq!(matcher.len(), 4);
        assert!(matcher.matches(Path::new("/project/index.html")));
        assert!(matcher.matches(Path::new("/project/src/components/header.rs")));
        assert!(matcher.matches(Path::new("/project/src/main.css")));
        assert!(!matcher.matches(Path::new("/project/src/main.js")));
        assert!(!matcher.matches(Path::new("/project/other/index.html")));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let matcher = ContentMatcher::new(Path::new("/p"), ["*.html"]).unwrap();
        assert!(matcher.matches(Path::new("/p/index.html")));
        assert!(!matcher.matches(Path::new("/p/nested/index.html")));
    }
}
