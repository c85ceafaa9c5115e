//! Matching algorithms.
//!
//! These functions work on names and already-split segments so they can be
//! tested without constructing permissions.

/// Exact matching: a name grants only an identical name.
pub(crate) fn exact_grants(name: &str, other: &str) -> bool {
    name == other
}

/// Checks whether the final segment is the wildcard token.
pub(crate) fn is_end_wildcard(segments: &[&str], wildcard: &str) -> bool {
    segments.last().is_some_and(|last| *last == wildcard)
}

/// Wildcard matching.
///
/// A wildcard segment matches any single segment at its position. A trailing
/// wildcard additionally absorbs any number of further segments of `other`,
/// but never an empty tail: `a.*` grants `a.b` and `a.b.c`, not `a`.
///
/// A pattern longer than `other` never matches, even when its excess segments
/// are wildcards.
pub(crate) fn wildcard_grants(pattern: &[&str], other: &[&str], wildcard: &str) -> bool {
    if pattern.len() < other.len() && !is_end_wildcard(pattern, wildcard) {
        return false;
    }

    if pattern.len() > other.len() {
        return false;
    }

    // After the length checks, `pattern` is never longer than `other`, so the
    // zip walks the whole pattern and leaves any unmatched tail of `other` to
    // the trailing wildcard.
    pattern
        .iter()
        .zip(other)
        .all(|(p, o)| *p == wildcard || p == o)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(name: &str) -> Vec<&str> {
        name.split('.').collect()
    }

    fn grants(pattern: &str, other: &str) -> bool {
        wildcard_grants(&segs(pattern), &segs(other), "*")
    }

    #[test]
    fn test_is_end_wildcard() {
        assert!(is_end_wildcard(&segs("test.1.*"), "*"));
        assert!(is_end_wildcard(&segs("*"), "*"));
        assert!(!is_end_wildcard(&segs("test.*.hello"), "*"));
        assert!(!is_end_wildcard(&segs("test"), "*"));
        assert!(!is_end_wildcard(&[], "*"));
    }

    #[test]
    fn test_exact_grants() {
        assert!(exact_grants("test.1.hello", "test.1.hello"));
        assert!(exact_grants("", ""));
        assert!(!exact_grants("test.1.hello", "test.2.hello"));
        // Wildcards carry no meaning in exact matching.
        assert!(!exact_grants("test.*", "test.1"));
    }

    #[test]
    fn test_identical_names() {
        assert!(grants("test.1.hello", "test.1.hello"));
        assert!(grants("test.1.*", "test.1.*"));
        assert!(grants("", ""));
    }

    #[test]
    fn test_trailing_wildcard_absorbs_tail() {
        assert!(grants("test.1.*", "test.1.goodbye"));
        assert!(grants("a.*", "a.b.c"));
        assert!(grants("a.*", "a.b.c.d.e"));
        assert!(!grants("a.*", "b.c"));
    }

    #[test]
    fn test_trailing_wildcard_requires_one_segment() {
        assert!(!grants("test.1.*", "test.1"));
        assert!(!grants("a.*", "a"));
    }

    #[test]
    fn test_universal_wildcard() {
        assert!(grants("*", "test"));
        assert!(grants("*", "test.1.hello"));
        assert!(grants("*", ""));
        assert!(grants("*", "*"));
    }

    #[test]
    fn test_embedded_wildcard() {
        assert!(grants("test.*.hello", "test.2.hello"));
        assert!(!grants("test.*.hello", "test.1.*"));
        assert!(!grants("test.*.hello", "test.2.goodbye"));
    }

    #[test]
    fn test_embedded_wildcard_does_not_absorb() {
        assert!(!grants("a.*.c", "a.b.c.d"));
        assert!(!grants("a.*.c", "a.b"));
    }

    #[test]
    fn test_longer_pattern_never_matches() {
        assert!(!grants("a.b.*", "a.b"));
        assert!(!grants("*.*", "a"));
        assert!(!grants("test.1.hello", "test"));
    }

    #[test]
    fn test_wildcard_in_other_is_literal() {
        // Only the pattern's wildcards are special.
        assert!(!grants("test.1.hello", "test.1.*"));
        assert!(!grants("test", "*"));
    }

    #[test]
    fn test_custom_wildcard_token() {
        let pattern = vec!["files", "?"];
        assert!(wildcard_grants(&pattern, &["files", "read", "all"], "?"));
        assert!(!wildcard_grants(&["files", "*"], &["files", "read"], "?"));
    }
}
