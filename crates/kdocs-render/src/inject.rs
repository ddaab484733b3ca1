//! `@NAME@` placeholder substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::html_requote;

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)@").expect("invalid placeholder regex"));

/// Replace every `@NAME@` in `template` with `vars[NAME]`.
///
/// Values are escaped with [`html_requote`] unless their name is listed in
/// `unescaped`, for values that already hold safe HTML. A missing name
/// becomes an empty string.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use kdocs_render::inject_html;
///
/// let vars = HashMap::from([
///     ("title".to_owned(), "A & B".to_owned()),
///     ("body".to_owned(), "<p>hi</p>".to_owned()),
/// ]);
/// let html = inject_html("<h1>@title@</h1>@body@@missing@", &vars, &["body"]);
/// assert_eq!(html, "<h1>A &amp; B</h1><p>hi</p>");
/// ```
#[must_use]
pub fn inject_html(template: &str, vars: &HashMap<String, String>, unescaped: &[&str]) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            let value = vars.get(key).map_or("", String::as_str);
            if unescaped.contains(&key) {
                value.to_owned()
            } else {
                html_requote(value)
            }
        })
        .into_owned()
}
