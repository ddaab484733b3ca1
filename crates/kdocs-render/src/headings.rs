//! Heading commands in converted HTML.
//!
//! Headings whose text starts with `@` or `~` are commands:
//!
//! - `# @name args`: expand setting or macro `name` with `@ARGS@`/`@CMD@`.
//!   A setting also records `args` as the page param `name`.
//! - `# ~name args`: open box `name`, emitting the part of its template before
//!   `@BODY@` and holding the rest back.
//! - `# ~`: close the open box, emitting the held-back part.
//!
//! Only one box is open at a time. Opening a box while another is open
//! discards the earlier closing fragment, and a box still open at the end of
//! the document is never closed.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::{decode_entities, html_requote};
use crate::inject::inject_html;
use crate::tables::Tables;
use crate::util::error_html;

static COMMAND_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<h\d[^>]*>\s*([~@])\s*(.*?)</h\d>").expect("invalid heading regex")
});

/// Split marker inside box templates.
pub(crate) const BODY_MARKER: &str = "@BODY@";

/// Result of [`rewrite_headings`].
#[derive(Debug, Default)]
pub struct Rewrite {
    /// HTML with every command heading expanded.
    pub html: String,
    /// `(setting, escaped argument)` pairs in document order.
    pub settings: Vec<(String, String)>,
    /// Messages for unresolved commands and boxes.
    pub warnings: Vec<String>,
}

/// Closing fragment of the box opened by the last `~name` heading.
#[derive(Debug, Default)]
struct OpenBox(Option<String>);

impl OpenBox {
    fn open(&mut self, closing: String) {
        if self.0.is_some() {
            tracing::debug!("Box opened while another was open, dropping earlier close");
        }
        self.0 = Some(closing);
    }

    fn close(&mut self) -> String {
        self.0.take().unwrap_or_default()
    }
}

/// Expand every command heading in `html` against `tables`.
///
/// Command names and arguments come from document text, so both are
/// requoted before use. They are injected into macro bodies without further
/// escaping.
#[must_use]
pub fn rewrite_headings(html: &str, tables: &Tables<'_>) -> Rewrite {
    let mut settings = Vec::new();
    let mut warnings = Vec::new();
    let mut open_box = OpenBox::default();

    let rewritten = COMMAND_HEADING.replace_all(html, |caps: &Captures<'_>| {
        let (raw_cmd, raw_args) = split_command(&caps[2]);
        let cmd = html_requote(raw_cmd);
        let args = html_requote(raw_args);

        if &caps[1] == "@" {
            let expansion = if let Some(setting) = tables.settings.get(&cmd) {
                settings.push((cmd.to_lowercase(), args.clone()));
                setting
            } else if let Some(body) = tables.macros.get(&cmd) {
                body
            } else {
                let message = format!("Unknown command: @{}", decode_entities(raw_cmd));
                return error_html(&message, &mut warnings);
            };

            let vars = HashMap::from([("ARGS".to_owned(), args), ("CMD".to_owned(), cmd)]);
            return inject_html(expansion, &vars, &["ARGS", "CMD"]);
        }

        if cmd.is_empty() {
            return open_box.close();
        }

        let Some(template) = tables.boxes.get(&cmd) else {
            let message = format!("Unknown box: ~{}", decode_entities(raw_cmd));
            return error_html(&message, &mut warnings);
        };
        let (opening, closing) = template.split_once(BODY_MARKER).unwrap_or((template, ""));
        open_box.open(closing.to_owned());
        opening.replace("@ARGS@", &args)
    });

    Rewrite {
        html: rewritten.into_owned(),
        settings,
        warnings,
    }
}

/// Split heading text into command word and arguments at the first whitespace.
fn split_command(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace)
        .map_or((text, ""), |(cmd, args)| (cmd, args.trim_start()))
}
