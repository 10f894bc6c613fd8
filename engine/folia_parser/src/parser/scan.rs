//! Top-level text scanning shared by the operator and sequence composers.
//!
//! "Top-level" means outside quoted spans and outside placeholder tokens:
//! both are atomic and are never split internally. After decomposition the
//! text normally contains no quotes at all, but the scanners still honor
//! them so the invariant does not depend on call order.

use crate::parser::placeholder::PLACEHOLDER_MARKER;

/// Byte-indexed mask over `text`: `true` where a scanner may match.
/// Quoted spans and placeholder tokens are masked out, delimiters included.
pub(crate) fn top_level_mask(text: &str) -> Vec<bool> {
    let mut mask = vec![true; text.len()];
    let mut closing: Option<char> = None;
    for (i, c) in text.char_indices() {
        match closing {
            Some(close) => {
                mask[i..i + c.len_utf8()].fill(false);
                if c == close {
                    closing = None;
                }
            }
            None => {
                if c == '\'' || c == '"' || c == PLACEHOLDER_MARKER {
                    mask[i..i + c.len_utf8()].fill(false);
                    closing = Some(if c == PLACEHOLDER_MARKER {
                        PLACEHOLDER_MARKER
                    } else {
                        c
                    });
                }
            }
        }
    }
    mask
}

fn occurrence_is_top_level(mask: &[bool], pos: usize, len: usize) -> bool {
    mask[pos..pos + len].iter().all(|&scannable| scannable)
}

/// The rightmost top-level occurrence of `symbol` whose start lies strictly
/// before `before`. Scanning leftward for the next candidate is done by
/// passing the previous hit as the new bound.
pub(crate) fn rightmost_top_level(
    text: &str,
    symbol: &str,
    before: usize,
    mask: &[bool],
) -> Option<usize> {
    let mut found = None;
    for (pos, _) in text.match_indices(symbol) {
        if pos >= before {
            break;
        }
        if occurrence_is_top_level(mask, pos, symbol.len()) {
            found = Some(pos);
        }
    }
    found
}

/// Splits `text` on top-level occurrences of `separator`. The separator
/// itself is dropped; segments are not trimmed.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mask = top_level_mask(text);
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == separator && mask[i] {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// The first top-level `=` that is an assignation operator, i.e. not part
/// of `==`, `!=`, `<=` or `>=`.
pub(crate) fn find_assignation_operator(text: &str) -> Option<usize> {
    let mask = top_level_mask(text);
    let bytes = text.as_bytes();
    for (i, c) in text.char_indices() {
        if c != '=' || !mask[i] {
            continue;
        }
        if i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>') {
            continue;
        }
        if bytes.get(i + 1) == Some(&b'=') {
            continue;
        }
        return Some(i);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quoted_spans_are_not_top_level() {
        let mask = top_level_mask("'a+b'+c");
        assert!(!mask[0] && !mask[2] && !mask[4]);
        assert!(mask[5] && mask[6]);
        assert_eq!(rightmost_top_level("'a+b'+c", "+", 7, &mask), Some(5));
    }

    #[test]
    fn placeholders_are_atomic() {
        let text = "§10§+3";
        let mask = top_level_mask(text);
        assert_eq!(rightmost_top_level(text, "1", text.len(), &mask), None);
        assert_eq!(rightmost_top_level(text, "+", text.len(), &mask), Some(6));
    }

    #[test]
    fn rightmost_scan_moves_leftward_with_the_bound() {
        let text = "1+2+3";
        let mask = top_level_mask(text);
        assert_eq!(rightmost_top_level(text, "+", text.len(), &mask), Some(3));
        assert_eq!(rightmost_top_level(text, "+", 3, &mask), Some(1));
        assert_eq!(rightmost_top_level(text, "+", 1, &mask), None);
    }

    #[test]
    fn split_ignores_commas_in_quotes_and_placeholders() {
        assert_eq!(split_top_level("a,b", ','), vec!["a", "b"]);
        assert_eq!(split_top_level("'a,b',c", ','), vec!["'a,b'", "c"]);
        assert_eq!(split_top_level("§1§+3", ','), vec!["§1§+3"]);
    }

    #[test]
    fn assignation_operator_skips_comparison_operators() {
        assert_eq!(find_assignation_operator("a=1"), Some(1));
        assert_eq!(find_assignation_operator("a==1"), None);
        assert_eq!(find_assignation_operator("a!=1"), None);
        assert_eq!(find_assignation_operator("a<=1"), None);
        assert_eq!(find_assignation_operator("a>=1"), None);
        assert_eq!(find_assignation_operator("a<=1,b=2"), Some(6));
        assert_eq!(find_assignation_operator("'k=v'"), None);
    }
}
