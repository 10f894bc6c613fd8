//! Synthetic index placeholders.
//!
//! When the decomposer extracts a nested group it substitutes a marker of
//! the form `§<index>§` into the surrounding text. The marker character has
//! no role in the expression grammar, and quoted spans are extracted into
//! their own nodes before any scan ever looks for markers, so a placeholder
//! in decomposed text can only be one the decomposer itself produced.

/// Marker character delimiting an index placeholder on both sides.
pub(crate) const PLACEHOLDER_MARKER: char = '\u{00A7}'; // §

/// The literal placeholder text for a node index.
pub(crate) fn placeholder_for(index: usize) -> String {
    format!("{PLACEHOLDER_MARKER}{index}{PLACEHOLDER_MARKER}")
}

/// Returns the referenced node index only if `text`, after trimming, is
/// exactly one placeholder spanning the whole string.
///
/// This distinguishes "this node is just an alias for another node" (safe
/// to recurse into) from "this node's text merely contains a placeholder as
/// a sub-term" (handled by the operator/sequence scanners, which treat the
/// placeholder as one opaque token among others).
pub fn parse_as_simple_index_placeholder(text: &str) -> Option<usize> {
    let inner = text
        .trim()
        .strip_prefix(PLACEHOLDER_MARKER)?
        .strip_suffix(PLACEHOLDER_MARKER)?;
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}
