//! Markdown to HTML conversion.
//!
//! The engine only depends on the [`MarkdownConverter`] trait. The default
//! implementation, [`CmarkConverter`], is backed by pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, html};

/// Converts markdown source to HTML.
///
/// Implementations must be usable from several render calls at once.
pub trait MarkdownConverter: Send + Sync {
    /// Convert `source` to HTML.
    fn convert(&self, source: &str) -> String;
}

/// pulldown-cmark converter with sanitizing and smart punctuation.
///
/// When sanitizing, raw HTML in the source is emitted as escaped text, so
/// authors can only produce markup through declared macros and boxes.
///
/// # Example
///
/// ```
/// use kdocs_render::{CmarkConverter, MarkdownConverter};
///
/// let html = CmarkConverter::new().convert("# Hi\n\n<b>\"raw\"</b>");
/// assert!(html.contains("<h1>Hi</h1>"));
/// assert!(html.contains("&lt;b&gt;"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CmarkConverter {
    sanitize: bool,
    smart_punctuation: bool,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CmarkConverter {
    /// Create a converter with sanitizing and smart punctuation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sanitize: true,
            smart_punctuation: true,
        }
    }

    /// Enable or disable escaping of raw HTML.
    #[must_use]
    pub fn with_sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    /// Enable or disable typographic quotes, dashes and ellipses.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.smart_punctuation = enabled;
        self
    }

    /// Parser options for the current configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        options
    }
}

impl MarkdownConverter for CmarkConverter {
    fn convert(&self, source: &str) -> String {
        let sanitize = self.sanitize;
        let parser = Parser::new_ext(source, self.parser_options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if sanitize => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
