//! Utility functions used throughout the crate.
//!
//! Sensor and device names come from vendor firmware and are matched with
//! ASCII case-insensitive substring tests. Empty inputs never match.

/// Returns true if `source` contains `needle`, ignoring ASCII case.
pub fn has(source: &str, needle: &str) -> bool {
    !source.is_empty() && !needle.is_empty() && contains_ignore_ascii_case(source, needle)
}

/// Returns true if `source` contains any of `needles`, ignoring ASCII case.
pub fn has_any(source: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| has(source, needle))
}

// No allocation: byte windows are compared in place. Non-ASCII bytes must
// match exactly.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let (haystack, needle) = (haystack.as_bytes(), needle.as_bytes());
    needle.len() <= haystack.len()
        && haystack
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle))
}
