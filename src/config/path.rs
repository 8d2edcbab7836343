//! Compound key parsing.

/// Splits a compound key into its ordered path segments.
///
/// Splits greedily on every non-overlapping occurrence of `delimiter`,
/// left to right, preserving empty segments. The output always holds at
/// least one segment; an empty key produces a single empty segment.
pub(crate) fn split_key<'a>(key: &'a str, delimiter: &str) -> Vec<&'a str> {
    key.split(delimiter).collect()
}
