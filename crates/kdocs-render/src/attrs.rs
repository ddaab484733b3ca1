//! Attribute parsing for declaration tags.
//!
//! Parses the `data-name="note" class='box wide' hidden` part of
//! `<aside data-name="note" class='box wide' hidden>`.

use std::collections::HashMap;

/// Parse a whitespace-separated attribute list.
///
/// Supports `key="value"`, `key='value'`, `key=value` and bare `key` (stored
/// as `"true"`). Keys are lower-cased; a later duplicate key wins.
///
/// Parsing is permissive: every iteration consumes at least one token, so
/// malformed input never loops.
///
/// # Example
///
/// ```
/// use kdocs_render::parse_html_attrs;
///
/// let attrs = parse_html_attrs(r#"Data-Name="note" class='aside wide' hidden"#);
/// assert_eq!(attrs["data-name"], "note");
/// assert_eq!(attrs["class"], "aside wide");
/// assert_eq!(attrs["hidden"], "true");
/// ```
#[must_use]
pub fn parse_html_attrs(attrs_str: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut remaining = attrs_str.trim_start();

    while !remaining.is_empty() {
        if let Some((key, value, rest)) = parse_key_value(remaining) {
            attrs.insert(key.to_lowercase(), value.to_owned());
            remaining = rest;
        } else {
            // Bare flag: everything up to the next whitespace
            let end = remaining
                .find(char::is_whitespace)
                .unwrap_or(remaining.len());
            attrs.insert(remaining[..end].to_lowercase(), "true".to_owned());
            remaining = &remaining[end..];
        }
        remaining = remaining.trim_start();
    }

    attrs
}

/// Parse `key=value` at the start of `s`.
///
/// The key runs up to the first `=` and must not contain whitespace. A value
/// with an unterminated quote is read as a bare token, quote included.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| c == '=' || c.is_whitespace())?;
    if key_end == 0 || !s[key_end..].starts_with('=') {
        return None;
    }
    let key = &s[..key_end];
    let after_eq = &s[key_end + 1..];

    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote)
            && let Some(end_quote) = stripped.find(quote)
        {
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
