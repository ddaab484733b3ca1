//! Region routing.
//!
//! Aside boxes wrap their content in sentinel comments:
//!
//! ```html
//! <!-- BEGIN-ASIDE note -->...<!-- END-ASIDE -->
//! ```
//!
//! After heading expansion those spans are moved out of the page into named
//! registers. Everything left over is the `main` register. Each register is
//! then wrapped in its `<name>-container` box.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::html_requote;
use crate::headings::BODY_MARKER;
use crate::inject::inject_html;
use crate::tables::NamedTable;

/// Register that receives all content outside aside spans.
pub const MAIN_REGION: &str = "main";

static ASIDE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- BEGIN-ASIDE (\S+) -->(.*?)<!-- END-ASIDE -->")
        .expect("invalid aside span regex")
});

static FIRST_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h1[^<>]*>([^<>]+)</h1>").expect("invalid h1 regex"));

static FIRST_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>(.+?)</p>").expect("invalid paragraph regex"));

/// Region name to accumulated HTML, in first-seen order with `main` first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    entries: Vec<(String, String)>,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Registers holding only an empty `main`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![(MAIN_REGION.to_owned(), String::new())],
        }
    }

    fn slot(&mut self, name: &str) -> &mut String {
        let idx = match self.entries.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.entries.push((name.to_owned(), String::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Append content to a register, creating it if needed.
    pub fn append(&mut self, name: &str, content: &str) {
        self.slot(name).push_str(content);
    }

    /// Replace a register's content.
    pub fn set(&mut self, name: &str, content: String) {
        *self.slot(name) = content;
    }

    /// Content of a register.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.as_str())
    }

    /// Register names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Wrap each register in its `<name>-container` box and concatenate.
    ///
    /// A register without a container box is emitted as-is.
    #[must_use]
    pub fn wrap(&self, boxes: &NamedTable<'_>) -> String {
        let mut out = String::new();
        for (name, content) in &self.entries {
            let container = boxes
                .get(&format!("{name}-container"))
                .unwrap_or(BODY_MARKER);
            let vars = HashMap::from([("BODY".to_owned(), content.clone())]);
            out.push_str(&inject_html(container, &vars, &["BODY"]));
        }
        out
    }
}

/// Move aside spans out of `html` into registers.
///
/// Repeated regions concatenate in document order. Each span is replaced by
/// an `<!-- aside -->` marker; the remaining HTML becomes `main`. A span
/// naming `main` itself is left in place without its sentinels.
#[must_use]
pub fn route_regions(html: &str) -> Registers {
    let mut registers = Registers::new();

    let main = ASIDE_SPAN.replace_all(html, |caps: &Captures<'_>| {
        let name = &caps[1];
        if name == MAIN_REGION {
            tracing::debug!("Aside span named main left inline");
            return caps[2].to_owned();
        }
        registers.append(name, &caps[2]);
        "<!-- aside -->".to_owned()
    });

    let main = main.into_owned();
    registers.set(MAIN_REGION, main);
    registers
}

/// Title and description detected from rendered HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Text of the first `<h1>` without nested markup.
    pub title: Option<String>,
    /// Content of the first paragraph.
    pub description: Option<String>,
}

/// Detect the page title and description, requoted for safe reuse.
#[must_use]
pub fn detect_metadata(html: &str) -> Metadata {
    let capture = |re: &Regex| re.captures(html).map(|caps| html_requote(&caps[1]));
    Metadata {
        title: capture(&*FIRST_H1),
        description: capture(&*FIRST_PARAGRAPH),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tables::Defaults;

    #[test]
    fn test_main_always_first() {
        let registers = route_regions("");
        assert_eq!(registers.names().collect::<Vec<_>>(), vec!["main"]);
        assert_eq!(registers.get("main"), Some(""));
    }

    #[test]
    fn test_span_moved_to_register() {
        let registers = route_regions(
            "<p>a</p><!-- BEGIN-ASIDE side --><p>s</p><!-- END-ASIDE --><p>b</p>",
        );
        assert_eq!(registers.get("side"), Some("<p>s</p>"));
        assert_eq!(
            registers.get("main"),
            Some("<p>a</p><!-- aside --><p>b</p>")
        );
    }

    #[test]
    fn test_repeated_regions_concatenate_in_order() {
        let registers = route_regions(concat!(
            "<!-- BEGIN-ASIDE note -->one<!-- END-ASIDE -->",
            "x",
            "<!-- BEGIN-ASIDE other -->o<!-- END-ASIDE -->",
            "<!-- BEGIN-ASIDE note -->two<!-- END-ASIDE -->",
        ));
        assert_eq!(registers.get("note"), Some("onetwo"));
        assert_eq!(
            registers.names().collect::<Vec<_>>(),
            vec!["main", "note", "other"]
        );
    }

    #[test]
    fn test_span_is_non_greedy_and_multiline() {
        let registers = route_regions(
            "<!-- BEGIN-ASIDE a -->\n1\n<!-- END-ASIDE -->m<!-- BEGIN-ASIDE a -->2<!-- END-ASIDE -->",
        );
        assert_eq!(registers.get("a"), Some("\n1\n2"));
        assert_eq!(registers.get("main"), Some("<!-- aside -->m<!-- aside -->"));
    }

    #[test]
    fn test_unterminated_span_stays_in_main() {
        let html = "<!-- BEGIN-ASIDE a -->dangling";
        let registers = route_regions(html);
        assert_eq!(registers.get("main"), Some(html));
        assert_eq!(registers.get("a"), None);
    }

    #[test]
    fn test_main_named_span_left_inline() {
        let registers = route_regions("<!-- BEGIN-ASIDE main -->x<!-- END-ASIDE -->");
        assert_eq!(registers.get("main"), Some("x"));
    }

    #[test]
    fn test_wrap_uses_container_boxes() {
        let defaults = Defaults::empty()
            .with_box("main-container", "<main>@BODY@</main>")
            .with_box("note-container", "<aside>@BODY@</aside>");
        let mut registers = Registers::new();
        registers.set("main", "M".to_owned());
        registers.append("note", "N");
        registers.append("loose", "L");
        assert_eq!(
            registers.wrap(&defaults.tables().boxes),
            "<main>M</main><aside>N</aside>L"
        );
    }

    #[test]
    fn test_wrap_container_without_body_drops_content() {
        let defaults = Defaults::empty().with_box("main-container", "<hr>");
        let mut registers = Registers::new();
        registers.set("main", "M".to_owned());
        assert_eq!(registers.wrap(&defaults.tables().boxes), "<hr>");
    }

    #[test]
    fn test_detect_metadata() {
        let metadata = detect_metadata(
            "<h1>Getting &amp; Going</h1>\n<p>First <em>para</em>.</p>\n<p>Second</p>",
        );
        assert_eq!(metadata.title.as_deref(), Some("Getting &amp; Going"));
        assert_eq!(
            metadata.description.as_deref(),
            Some("First &lt;em&gt;para&lt;/em&gt;.")
        );
    }

    #[test]
    fn test_detect_metadata_skips_h1_with_markup() {
        let metadata = detect_metadata("<h1><code>x</code></h1>");
        assert_eq!(metadata, Metadata::default());
    }
}
