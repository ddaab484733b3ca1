//! Bare video link normalization.
//!
//! A source line holding nothing but a known video URL is rewritten to a
//! macro heading before markdown conversion:
//!
//! ```text
//! https://youtu.be/abc123   ->   ### @youtube abc123
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static BARE_URL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^[ \t]*https?://(\S+)[ \t]*$").expect("invalid bare url regex")
});

static GROUP_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("invalid group reference regex"));

/// A link pattern and the command line it expands to.
///
/// The pattern is matched against the URL without its `http(s)://` scheme.
/// `$1`, `$2`, … in the command are replaced by capture groups; a group that
/// did not participate becomes an empty string.
#[derive(Clone, Debug)]
pub struct CmdLink {
    pattern: Regex,
    command: String,
}

impl CmdLink {
    /// Create a link rule.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn new(pattern: &str, command: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            command: command.into(),
        })
    }

    /// Expand the command for `link`, or `None` when the pattern does not match.
    #[must_use]
    pub fn expand(&self, link: &str) -> Option<String> {
        let caps = self.pattern.captures(link)?;
        let expanded = GROUP_REF.replace_all(&self.command, |group: &Captures<'_>| {
            group[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| caps.get(index))
                .map_or("", |m| m.as_str())
                .to_owned()
        });
        Some(expanded.into_owned())
    }
}

/// Ordered link table; the first matching rule wins.
#[derive(Clone, Debug)]
pub struct LinkNormalizer {
    links: Vec<CmdLink>,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LinkNormalizer {
    /// Normalizer with the Vimeo and YouTube rules.
    #[must_use]
    pub fn builtin() -> Self {
        let links = [
            (r"^vimeo\.com/(\d+)", "### @vimeo $1"),
            (r"^youtu\.be/(\w+)", "### @youtube $1"),
            (r"^www\.youtube\.com/watch\?v=(\w+)", "### @youtube $1"),
        ]
        .into_iter()
        .map(|(pattern, command)| CmdLink::new(pattern, command).expect("invalid builtin link"))
        .collect();
        Self { links }
    }

    /// Normalizer with a custom rule table.
    #[must_use]
    pub fn with_links(links: Vec<CmdLink>) -> Self {
        Self { links }
    }

    /// Rewrite every bare-URL line that matches a rule.
    ///
    /// Lines that do not match any rule are left for the markdown converter
    /// to auto-link.
    ///
    /// # Example
    ///
    /// ```
    /// use kdocs_render::LinkNormalizer;
    ///
    /// let normalizer = LinkNormalizer::builtin();
    /// assert_eq!(
    ///     normalizer.normalize("Intro\n\nhttps://youtu.be/abc123\n"),
    ///     "Intro\n\n### @youtube abc123\n"
    /// );
    /// ```
    #[must_use]
    pub fn normalize<'a>(&self, source: &'a str) -> Cow<'a, str> {
        BARE_URL_LINE.replace_all(source, |caps: &Captures<'_>| {
            let link = &caps[1];
            self.links
                .iter()
                .find_map(|rule| rule.expand(link))
                .unwrap_or_else(|| caps[0].to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_youtu_be() {
        let normalizer = LinkNormalizer::builtin();
        assert_eq!(
            normalizer.normalize("https://youtu.be/abc123"),
            "### @youtube abc123"
        );
    }

    #[test]
    fn test_youtube_watch() {
        let normalizer = LinkNormalizer::builtin();
        assert_eq!(
            normalizer.normalize("http://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"),
            "### @youtube dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_vimeo() {
        let normalizer = LinkNormalizer::builtin();
        assert_eq!(
            normalizer.normalize("  https://vimeo.com/12345  "),
            "### @vimeo 12345"
        );
    }

    #[test]
    fn test_unknown_host_unchanged() {
        let normalizer = LinkNormalizer::builtin();
        let source = "https://example.com/page\n";
        assert_eq!(normalizer.normalize(source), source);
    }

    #[test]
    fn test_url_inside_text_unchanged() {
        let normalizer = LinkNormalizer::builtin();
        let source = "Watch https://youtu.be/abc123 now";
        assert_eq!(normalizer.normalize(source), source);
    }

    #[test]
    fn test_surrounding_lines_preserved() {
        let normalizer = LinkNormalizer::builtin();
        assert_eq!(
            normalizer.normalize("a\nhttps://youtu.be/x1\nb\nhttps://vimeo.com/9\n"),
            "a\n### @youtube x1\nb\n### @vimeo 9\n"
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let normalizer = LinkNormalizer::builtin();
        assert_eq!(
            normalizer.normalize("Intro\r\n\r\nhttps://youtu.be/abc123 \r\nmore\r\n"),
            "Intro\r\n\r\n### @youtube abc123\r\nmore\r\n"
        );
    }

    #[test]
    fn test_first_rule_wins() {
        let normalizer = LinkNormalizer::with_links(vec![
            CmdLink::new(r"^example\.com/(\w+)", "### @first $1").unwrap(),
            CmdLink::new(r"^example\.com/(\w+)", "### @second $1").unwrap(),
        ]);
        assert_eq!(
            normalizer.normalize("https://example.com/x"),
            "### @first x"
        );
    }

    #[test]
    fn test_missing_group_is_empty() {
        let rule = CmdLink::new(r"^a/(\d+)?(x)", "### @m [$1] [$2] [$3]").unwrap();
        assert_eq!(rule.expand("a/x").as_deref(), Some("### @m [] [x] []"));
    }
}
