//! HTML entity quoting.
//!
//! Two flavours are provided:
//!
//! - [`html_quote`]: escapes raw text for inclusion in HTML.
//! - [`html_requote`]: for text that is *probably* already HTML-safe (e.g. text
//!   captured from rendered markdown). Known entities are decoded first and the
//!   result is quoted again, so valid entities are never double-escaped.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([#a-zA-Z0-9]+);").expect("invalid entity regex"));

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// Ampersands are replaced first so the entities inserted for the other
/// characters are not escaped again.
///
/// # Example
///
/// ```
/// use kdocs_render::html_quote;
///
/// assert_eq!(html_quote(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
#[must_use]
pub fn html_quote(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Decode a fixed set of entities, then quote the result again.
///
/// Decoded: `&amp;`, `&lt;`, `&gt;`, `&quot;` and decimal references such as
/// `&#39;`. Anything else (`&nbsp;`, `&#x41;`, out-of-range numbers) is left
/// as-is before requoting.
///
/// `html_requote(&html_quote(s)) == html_quote(s)` holds for every `s`.
///
/// # Example
///
/// ```
/// use kdocs_render::html_requote;
///
/// assert_eq!(html_requote("Tom &amp; Jerry & co"), "Tom &amp; Jerry &amp; co");
/// assert_eq!(html_requote("it&#39;s"), "it&#39;s");
/// ```
#[must_use]
pub fn html_requote(s: &str) -> String {
    html_quote(&decode_entities(s))
}

/// Decode the entities [`html_requote`] recognizes, without quoting again.
pub(crate) fn decode_entities(s: &str) -> Cow<'_, str> {
    ENTITY_PATTERN.replace_all(s, |caps: &Captures<'_>| {
        let entity = &caps[1];
        match entity {
            "amp" => "&".to_owned(),
            "lt" => "<".to_owned(),
            "gt" => ">".to_owned(),
            "quot" => "\"".to_owned(),
            _ => entity
                .strip_prefix('#')
                .and_then(|digits| digits.parse::<u32>().ok())
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_owned(), String::from),
        }
    })
}
