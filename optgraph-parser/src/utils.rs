//! Parser utilities.

/// Split a `key<separator>value` token. Both the key and the value must be non empty.
#[inline(always)]
pub fn split_property<'a>(token: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    if separator.is_empty() {
        return None;
    }

    match token.split_once(separator) {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => Some((key, value)),
        _ => None,
    }
}
