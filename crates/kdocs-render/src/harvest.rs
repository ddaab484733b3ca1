//! Declaration harvesting from the page template.
//!
//! Templates declare boxes, asides, settings, menus and macros inline:
//!
//! ```html
//! <aside data-name="note" class="aside"><div class="note">@BODY@</div></aside>
//! ```
//!
//! Every declaration is cut out of the template and replaced by a
//! `<!-- macro NAME -->` comment. Its body is only reachable through later
//! expansion.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::attrs::parse_html_attrs;
use crate::regions::MAIN_REGION;
use crate::tables::Tables;
use crate::util::error_html;

static DECLARATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<aside\s+([^<>]+)>(.*?)</aside>").expect("invalid declaration regex")
});

/// What a declaration block defines, decided by its `class` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// Box template, opened with `~name` and closed with `~`.
    Box,
    /// Box whose content is routed to the `name` region.
    Aside,
    /// Setting: expands like a macro and records its argument as a param.
    Setting,
    /// Navigation menu template.
    Menu,
    /// Plain macro, expanded by `@name` headings.
    Macro,
}

/// Classify a declaration by substring match on its class list.
///
/// Checked in order box, aside, setting, menu; anything else (including a
/// missing class) is a macro.
///
/// # Example
///
/// ```
/// use kdocs_render::{BlockKind, classify};
///
/// assert_eq!(classify(Some("aside box")), BlockKind::Box);
/// assert_eq!(classify(Some("sidebar-aside")), BlockKind::Aside);
/// assert_eq!(classify(None), BlockKind::Macro);
/// ```
#[must_use]
pub fn classify(class: Option<&str>) -> BlockKind {
    let Some(class) = class else {
        return BlockKind::Macro;
    };
    [
        ("box", BlockKind::Box),
        ("aside", BlockKind::Aside),
        ("setting", BlockKind::Setting),
        ("menu", BlockKind::Menu),
    ]
    .into_iter()
    .find_map(|(needle, kind)| class.contains(needle).then_some(kind))
    .unwrap_or(BlockKind::Macro)
}

/// One harvested declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Table the body belongs to.
    pub kind: BlockKind,
    /// Declared name (`data-name`, else `id`).
    pub name: String,
    /// Body to store. Aside bodies are already wrapped in region sentinels.
    pub body: String,
}

impl Declaration {
    fn new(kind: BlockKind, name: &str, body: &str) -> Self {
        let body = match kind {
            BlockKind::Aside => {
                format!("<!-- BEGIN-ASIDE {name} -->{body}<!-- END-ASIDE -->")
            }
            _ => body.to_owned(),
        };
        Self {
            kind,
            name: name.to_owned(),
            body,
        }
    }
}

/// Result of [`harvest_blocks`].
#[derive(Debug, Default)]
pub struct Harvest {
    /// Template with every declaration replaced by a comment or an error.
    pub template: String,
    /// Declarations in template order.
    pub declarations: Vec<Declaration>,
    /// Messages for declarations that could not be harvested.
    pub warnings: Vec<String>,
}

impl Harvest {
    /// Record the declarations in the call-local tables.
    ///
    /// Later declarations of the same name replace earlier ones.
    pub fn apply_to(&self, tables: &mut Tables<'_>) {
        for decl in &self.declarations {
            let table = match decl.kind {
                BlockKind::Box | BlockKind::Aside => &mut tables.boxes,
                BlockKind::Setting => &mut tables.settings,
                BlockKind::Menu => &mut tables.menus,
                BlockKind::Macro => &mut tables.macros,
            };
            table.insert(&decl.name, decl.body.as_str());
        }
    }
}

/// Cut every `<aside attrs>body</aside>` declaration out of `template`.
///
/// A declaration without `data-name` or `id`, or whose name contains
/// whitespace, is replaced by an inline error fragment. Aside names may not
/// use the reserved `main` region.
#[must_use]
pub fn harvest_blocks(template: &str) -> Harvest {
    let mut declarations = Vec::new();
    let mut warnings = Vec::new();

    let stripped = DECLARATION_PATTERN.replace_all(template, |caps: &Captures<'_>| {
        let attrs = parse_html_attrs(&caps[1]);
        let name = attrs
            .get("data-name")
            .or_else(|| attrs.get("id"))
            .filter(|name| !name.is_empty());
        let Some(name) = name else {
            return error_html("id or data-name missing on macro", &mut warnings);
        };

        if name.contains(char::is_whitespace) {
            return error_html(
                &format!("Declaration name contains whitespace: {name}"),
                &mut warnings,
            );
        }

        let kind = classify(attrs.get("class").map(String::as_str));
        if kind == BlockKind::Aside && name == MAIN_REGION {
            return error_html(
                &format!("Aside name is reserved: {MAIN_REGION}"),
                &mut warnings,
            );
        }

        tracing::debug!(name = %name, kind = ?kind, "Harvested declaration");
        declarations.push(Declaration::new(kind, name, &caps[2]));
        format!("<!-- macro {name} -->")
    });

    Harvest {
        template: stripped.into_owned(),
        declarations,
        warnings,
    }
}
