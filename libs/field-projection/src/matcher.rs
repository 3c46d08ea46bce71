//! Single-wildcard pattern matching of full keys against a whitelist.
//!
//! A key matches when some whitelist pattern equals the key after replacing
//! any subset of its segments with `*`. Two strategies compute this:
//!
//! - [`MatchStrategy::Enumerate`] builds all `2^n` wildcarded candidates of an
//!   `n` segment key and probes the set for each one.
//! - [`MatchStrategy::PerPattern`] compares every pattern segment by segment
//!   against the key.
//!
//! Both return identical results. [`MatchStrategy::Auto`] picks whichever is
//! cheaper for the key depth and whitelist size at hand.

use crate::path::{segments, SEPARATOR, SINGLE_WILDCARD};
use crate::whitelist::WhitelistSet;

/// Keys deeper than this are never enumerated.
pub const MAX_ENUMERATED_SEGMENTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    #[default]
    Auto,
    Enumerate,
    PerPattern,
}

/// Returns true if `full_key` matches a pattern of `whitelist`.
pub fn matches(full_key: &str, whitelist: &WhitelistSet) -> bool {
    matches_with(full_key, whitelist, MatchStrategy::Auto)
}

pub fn matches_with(full_key: &str, whitelist: &WhitelistSet, strategy: MatchStrategy) -> bool {
    // The empty key has no segments; only the empty pattern can match it.
    if full_key.is_empty() {
        return whitelist.contains("");
    }

    let parts: Vec<&str> = segments(full_key).collect();

    match strategy {
        MatchStrategy::Enumerate if parts.len() <= MAX_ENUMERATED_SEGMENTS => {
            enumerate_candidates(full_key.len(), &parts, whitelist)
        }
        MatchStrategy::Auto
            if parts.len() <= MAX_ENUMERATED_SEGMENTS
                && (1usize << parts.len()) <= whitelist.len() =>
        {
            enumerate_candidates(full_key.len(), &parts, whitelist)
        }
        _ => scan_patterns(&parts, whitelist),
    }
}

fn enumerate_candidates(key_len: usize, parts: &[&str], whitelist: &WhitelistSet) -> bool {
    let n = parts.len();
    let mut candidate = String::with_capacity(key_len + n);

    // Bit i of the mask keeps segment i literal.
    for mask in (0..1u32 << n).rev() {
        candidate.clear();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                candidate.push(SEPARATOR);
            }
            if mask & (1 << i) != 0 {
                candidate.push_str(part);
            } else {
                candidate.push_str(SINGLE_WILDCARD);
            }
        }

        if whitelist.contains(&candidate) {
            return true;
        }
    }

    false
}

fn scan_patterns(parts: &[&str], whitelist: &WhitelistSet) -> bool {
    whitelist
        .iter()
        .any(|pattern| pattern_matches(pattern, parts))
}

fn pattern_matches(pattern: &str, parts: &[&str]) -> bool {
    let mut pattern_parts = segments(pattern);

    for part in parts {
        match pattern_parts.next() {
            Some(p) if p == SINGLE_WILDCARD || p == *part => {}
            _ => return false,
        }
    }

    pattern_parts.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [MatchStrategy; 3] = [
        MatchStrategy::Auto,
        MatchStrategy::Enumerate,
        MatchStrategy::PerPattern,
    ];

    fn check(key: &str, patterns: &[&str], expected: bool) {
        let whitelist = WhitelistSet::new(patterns.iter().copied());
        for strategy in STRATEGIES {
            assert_eq!(
                matches_with(key, &whitelist, strategy),
                expected,
                "key {key:?} against {patterns:?} with {strategy:?}"
            );
        }
    }

    #[test]
    fn test_literal_match() {
        check("a.b.c", &["a.b.c"], true);
        check("a.b.c", &["a.b"], false);
        check("a", &["a"], true);
    }

    #[test]
    fn test_single_wildcard_per_segment() {
        check("a.b.c", &["a.*.c"], true);
        check("a.b.c", &["*.b.*"], true);
        check("a.b.c", &["*.*.*"], true);
        check("a.b.d", &["a.*.c"], false);
    }

    #[test]
    fn test_segment_count_must_agree() {
        check("a.b", &["*"], false);
        check("a", &["*.*"], false);
        check("a.b.c", &["a.*"], false);
    }

    #[test]
    fn test_double_wildcard_is_not_enumerated() {
        check("a.b", &["a.**"], false);
        check("a.b.c", &["a.**"], false);
    }

    #[test]
    fn test_empty_key_only_matches_empty_pattern() {
        check("", &["*"], false);
        check("", &[""], true);
    }

    #[test]
    fn test_empty_whitelist() {
        check("a", &[], false);
    }

    #[test]
    fn test_deep_key_falls_back_to_scan() {
        let key = vec!["x"; MAX_ENUMERATED_SEGMENTS + 5].join(".");
        let mut pattern = vec!["*"; MAX_ENUMERATED_SEGMENTS + 5];
        pattern[0] = "x";
        let pattern = pattern.join(".");
        check(&key, &[pattern.as_str()], true);
    }

    #[test]
    fn test_auto_agrees_with_enumeration_on_large_whitelist() {
        let patterns: Vec<String> = (0..64).map(|i| format!("f{i}.*")).collect();
        let whitelist = WhitelistSet::new(patterns);
        assert!(matches("f3.value", &whitelist));
        assert!(!matches("g3.value", &whitelist));
        assert!(!matches("f3", &whitelist));
    }
}
