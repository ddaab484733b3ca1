//! Shared helpers for the render passes.

use crate::escape::html_quote;

/// Build a visible inline error fragment and record it as a warning.
///
/// Content errors never abort rendering; they show up in the page where they
/// happened.
pub(crate) fn error_html(message: &str, warnings: &mut Vec<String>) -> String {
    tracing::warn!(message, "Inline render error");
    warnings.push(message.to_owned());
    format!(
        "<div class='ui negative message'>{}</div>",
        html_quote(message)
    )
}
