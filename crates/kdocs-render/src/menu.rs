//! Navigation menu rendering.
//!
//! A menu is a tree of [`DocMenuEntry`] nodes rendered through four menu
//! templates: `top-dropdown` and `inner-dropdown` for groups, `item` for
//! links and `divider` for entries named with hyphens only (`---`).
//! A divider's path is optional, but when present it is checked like any
//! other link.

use std::collections::HashMap;

use crate::inject::inject_html;
use crate::tables::NamedTable;
use crate::util::error_html;

/// A navigation menu node: a link, or a group of child entries.
///
/// # Example
///
/// ```
/// use kdocs_render::DocMenuEntry;
///
/// let menu = DocMenuEntry::group("Docs", vec![
///     DocMenuEntry::link("Start", "/docs/start"),
///     DocMenuEntry::link("---", "/"),
///     DocMenuEntry::link("GitHub", "https://github.com"),
/// ]);
/// assert!(menu.is_group());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocMenuEntry {
    /// Display name.
    pub name: String,
    /// Link target of a leaf entry.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub path: Option<String>,
    /// Children of a group entry.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub subitems: Option<Vec<DocMenuEntry>>,
}

impl DocMenuEntry {
    /// Leaf entry linking to `path`.
    #[must_use]
    pub fn link(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            subitems: None,
        }
    }

    /// Group entry with children.
    #[must_use]
    pub fn group(name: impl Into<String>, subitems: Vec<DocMenuEntry>) -> Self {
        Self {
            name: name.into(),
            path: None,
            subitems: Some(subitems),
        }
    }

    /// Whether this entry renders as a dropdown.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.subitems.is_some()
    }

    /// Whether this entry renders as a divider.
    #[must_use]
    pub fn is_divider(&self) -> bool {
        !self.is_group() && !self.name.is_empty() && self.name.chars().all(|c| c == '-')
    }
}

/// Whether `path` is an acceptable menu link: absolute path or http(s) URL.
///
/// # Example
///
/// ```
/// use kdocs_render::is_valid_link;
///
/// assert!(is_valid_link("/docs/x"));
/// assert!(is_valid_link("https://example.com"));
/// assert!(!is_valid_link("javascript:alert(1)"));
/// assert!(!is_valid_link("docs/x"));
/// ```
#[must_use]
pub fn is_valid_link(path: &str) -> bool {
    path.starts_with('/') || path.starts_with("http:") || path.starts_with("https:")
}

/// Render top-level menu entries, one per line.
pub fn render_menu(
    entries: &[DocMenuEntry],
    menus: &NamedTable<'_>,
    warnings: &mut Vec<String>,
) -> String {
    render_entries(entries, 0, menus, warnings)
}

fn render_entries(
    entries: &[DocMenuEntry],
    depth: usize,
    menus: &NamedTable<'_>,
    warnings: &mut Vec<String>,
) -> String {
    entries
        .iter()
        .map(|entry| render_entry(entry, depth, menus, warnings))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_entry(
    entry: &DocMenuEntry,
    depth: usize,
    menus: &NamedTable<'_>,
    warnings: &mut Vec<String>,
) -> String {
    let mut vars = HashMap::from([("NAME".to_owned(), entry.name.clone())]);

    let template_name = if let Some(subitems) = &entry.subitems {
        let items = render_entries(subitems, depth + 1, menus, warnings);
        vars.insert("ITEMS".to_owned(), items);
        if depth == 0 {
            "top-dropdown"
        } else {
            "inner-dropdown"
        }
    } else {
        match entry.path.as_deref() {
            Some(path) if is_valid_link(path) => {
                vars.insert("LINK".to_owned(), path.to_owned());
            }
            Some(path) => return error_html(&format!("Invalid link: {path}"), warnings),
            None if entry.is_divider() => {}
            None => {
                return error_html(
                    &format!("Missing link for menu entry: {}", entry.name),
                    warnings,
                );
            }
        }
        if entry.is_divider() { "divider" } else { "item" }
    };

    let Some(template) = menus.get(template_name) else {
        return error_html(&format!("Unknown menu template: {template_name}"), warnings);
    };
    inject_html(template, &vars, &["ITEMS"])
}
