//! URL match pattern compilation.
//!
//! Each configured file extension expands to two glob-style match patterns:
//! one for the bare URL ending in the extension, one for the same URL
//! followed by a query string:
//!
//! ```text
//! png  →  *://*/*.png
//!         *://*/*.png?*
//! ```
//!
//! The result is consumed as an unordered set; [`PatternSet`] compiles it
//! into a single anchored [`RegexSet`] for matching. An empty file-type set
//! compiles to a set that matches nothing — "never match" is a valid
//! resting state, not an error.

// ============================================================================
// Imports
// ============================================================================

use regex::RegexSet;

use crate::error::{Error, Result};

// ============================================================================
// Compilation
// ============================================================================

/// Expands file extensions into glob-style URL match patterns.
///
/// Emits exactly two patterns per extension; order is irrelevant to the
/// consumer. Empty input yields empty output.
#[must_use]
pub fn compile(file_types: &[String]) -> Vec<String> {
    let mut patterns = Vec::with_capacity(file_types.len() * 2);
    for ext in file_types {
        patterns.push(format!("*://*/*.{ext}"));
        patterns.push(format!("*://*/*.{ext}?*"));
    }
    patterns
}

/// Translates one glob-style match pattern into an anchored regex.
///
/// `*` matches any run of characters; everything else is literal.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    for ch in pattern.chars() {
        if ch == '*' {
            out.push_str(".*");
        } else {
            out.push_str(&regex::escape(&ch.to_string()));
        }
    }
    out.push('$');
    out
}

// ============================================================================
// PatternSet
// ============================================================================

/// A compiled, unordered set of URL match patterns.
#[derive(Debug)]
pub struct PatternSet {
    /// Compiled alternation over all patterns.
    set: RegexSet,
    /// Number of source patterns.
    len: usize,
}

impl PatternSet {
    /// Compiles glob-style match patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if the compiled set exceeds the regex
    /// engine's limits.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let regexes: Vec<String> = patterns.iter().map(|p| glob_to_regex(p)).collect();
        let set = RegexSet::new(&regexes)
            .map_err(|e| Error::pattern(format!("failed to compile {} patterns: {e}", regexes.len())))?;
        Ok(Self {
            set,
            len: patterns.len(),
        })
    }

    /// Compiles the pattern set for a file-type list directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if the compiled set exceeds the regex
    /// engine's limits.
    pub fn for_file_types(file_types: &[String]) -> Result<Self> {
        Self::new(&compile(file_types))
    }

    /// Returns the number of source patterns.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no patterns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks a URL against the set.
    ///
    /// The empty set matches nothing — there is no implicit
    /// "match everything" fallback.
    #[inline]
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        self.set.is_match(url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn types(exts: &[&str]) -> Vec<String> {
        exts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_two_patterns_per_extension() {
        let patterns = compile(&types(&["png", "jpg"]));
        assert_eq!(patterns.len(), 4);
        assert!(patterns.contains(&"*://*/*.png".to_string()));
        assert!(patterns.contains(&"*://*/*.png?*".to_string()));
        assert!(patterns.contains(&"*://*/*.jpg".to_string()));
        assert!(patterns.contains(&"*://*/*.jpg?*".to_string()));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(compile(&[]).is_empty());
    }

    #[test]
    fn test_matches_bare_and_query_urls() {
        let set = PatternSet::for_file_types(&types(&["png"])).unwrap();
        assert!(set.matches("http://x/a.png"));
        assert!(set.matches("https://example.com/images/photo.png"));
        assert!(set.matches("http://x/a.png?width=100"));
        assert!(!set.matches("http://x/b.txt"));
        assert!(!set.matches("http://x/a.png.html"));
    }

    #[test]
    fn test_extension_must_be_suffix() {
        let set = PatternSet::for_file_types(&types(&["htm"])).unwrap();
        assert!(set.matches("http://x/index.htm"));
        // Anchored at the end: ".html" is not ".htm".
        assert!(!set.matches("http://x/index.html"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = PatternSet::for_file_types(&[]).unwrap();
        assert!(set.is_empty());
        assert!(!set.matches("http://x/a.png"));
        assert!(!set.matches(""));
    }

    #[test]
    fn test_regex_metacharacters_in_extension_are_literal() {
        let set = PatternSet::for_file_types(&types(&["c++"])).unwrap();
        assert!(set.matches("http://x/source.c++"));
        assert!(!set.matches("http://x/source.ccc"));
    }

    proptest! {
        #[test]
        fn prop_pattern_count_is_double_the_extension_count(
            exts in proptest::collection::hash_set("[a-z0-9]{1,5}", 0..20)
        ) {
            let file_types: Vec<String> = exts.into_iter().collect();
            prop_assert_eq!(compile(&file_types).len(), file_types.len() * 2);
        }

        #[test]
        fn prop_compiled_set_matches_its_own_extensions(
            ext in "[a-z0-9]{1,5}"
        ) {
            let set = PatternSet::for_file_types(&[ext.clone()]).unwrap();
            let plain = format!("http://host/file.{ext}");
            let with_query = format!("http://host/file.{ext}?q=1");
            prop_assert!(set.matches(&plain));
            prop_assert!(set.matches(&with_query));
        }
    }
}
