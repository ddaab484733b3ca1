//! Named template tables: boxes, macros, settings and menus.
//!
//! [`Defaults`] holds read-only built-in bodies shared by every render call.
//! Each call builds its own [`Tables`], an overlay that records harvested
//! declarations and falls back to the defaults on a miss.

use std::collections::HashMap;

/// Body shared by the `parent` and `short` settings.
const STD_SETTING: &str = "<!-- @CMD@ @ARGS@ -->";

const YOUTUBE_MACRO: &str = r#"<div class="embed video"><iframe src="https://www.youtube-nocookie.com/embed/@ARGS@" frameborder="0" allowfullscreen></iframe></div>"#;
const VIMEO_MACRO: &str = r#"<div class="embed video"><iframe src="https://player.vimeo.com/video/@ARGS@" frameborder="0" allowfullscreen></iframe></div>"#;

const MENU_ITEM: &str = r#"<a class="item" href="@LINK@">@NAME@</a>"#;
const MENU_DIVIDER: &str = r#"<div class="divider"></div>"#;
const MENU_TOP_DROPDOWN: &str = r#"<div class="ui dropdown item"><span class="text">@NAME@</span><div class="menu">@ITEMS@</div></div>"#;
const MENU_INNER_DROPDOWN: &str = r#"<div class="item"><span class="text">@NAME@</span><div class="menu">@ITEMS@</div></div>"#;

/// Built-in table bodies, read-only during rendering.
///
/// # Example
///
/// ```
/// use kdocs_render::Defaults;
///
/// let defaults = Defaults::builtin().with_macro("hint", "<div class=hint>@ARGS@</div>");
/// assert!(defaults.macros().contains_key("hint"));
/// assert!(defaults.settings().contains_key("parent"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Defaults {
    boxes: HashMap<String, String>,
    macros: HashMap<String, String>,
    settings: HashMap<String, String>,
    menus: HashMap<String, String>,
}

impl Defaults {
    /// Defaults with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in settings, video macros and plain dropdown menu templates.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_setting("parent", STD_SETTING)
            .with_setting("short", STD_SETTING)
            .with_setting("description", "<!-- desc -->")
            .with_macro("youtube", YOUTUBE_MACRO)
            .with_macro("vimeo", VIMEO_MACRO)
            .with_menu("item", MENU_ITEM)
            .with_menu("divider", MENU_DIVIDER)
            .with_menu("top-dropdown", MENU_TOP_DROPDOWN)
            .with_menu("inner-dropdown", MENU_INNER_DROPDOWN)
    }

    /// Add or replace a box template.
    #[must_use]
    pub fn with_box(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.boxes.insert(name.into(), body.into());
        self
    }

    /// Add or replace a macro. Macro names are case-insensitive.
    #[must_use]
    pub fn with_macro(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.macros.insert(name.into().to_lowercase(), body.into());
        self
    }

    /// Add or replace a setting. Setting names are case-insensitive.
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.settings.insert(name.into().to_lowercase(), body.into());
        self
    }

    /// Add or replace a menu template.
    #[must_use]
    pub fn with_menu(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.menus.insert(name.into(), body.into());
        self
    }

    /// Built-in box templates.
    #[must_use]
    pub fn boxes(&self) -> &HashMap<String, String> {
        &self.boxes
    }

    /// Built-in macros, keyed by lower-cased name.
    #[must_use]
    pub fn macros(&self) -> &HashMap<String, String> {
        &self.macros
    }

    /// Built-in settings, keyed by lower-cased name.
    #[must_use]
    pub fn settings(&self) -> &HashMap<String, String> {
        &self.settings
    }

    /// Built-in menu templates.
    #[must_use]
    pub fn menus(&self) -> &HashMap<String, String> {
        &self.menus
    }

    /// Start a per-call overlay over these defaults.
    #[must_use]
    pub fn tables(&self) -> Tables<'_> {
        Tables {
            boxes: NamedTable::new(&self.boxes, false),
            macros: NamedTable::new(&self.macros, true),
            settings: NamedTable::new(&self.settings, true),
            menus: NamedTable::new(&self.menus, false),
        }
    }
}

/// Copy-on-write view of one table: call-local entries over shared defaults.
///
/// A lookup that misses returns `None`; an entry with an empty body returns
/// `Some("")`.
#[derive(Debug)]
pub struct NamedTable<'a> {
    defaults: &'a HashMap<String, String>,
    overrides: HashMap<String, String>,
    fold_case: bool,
}

impl<'a> NamedTable<'a> {
    fn new(defaults: &'a HashMap<String, String>, fold_case: bool) -> Self {
        Self {
            defaults,
            overrides: HashMap::new(),
            fold_case,
        }
    }

    fn key(&self, name: &str) -> String {
        if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_owned()
        }
    }

    /// Look up an entry, preferring call-local declarations.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = self.key(name);
        self.overrides
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    /// Declare or override an entry for this call only.
    pub fn insert(&mut self, name: &str, body: impl Into<String>) {
        let key = self.key(name);
        self.overrides.insert(key, body.into());
    }

    /// Merged view of defaults and call-local entries.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut merged = self.defaults.clone();
        merged.extend(
            self.overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }
}

/// The four tables consulted during one render call.
#[derive(Debug)]
pub struct Tables<'a> {
    /// Box templates (`~name` headings, region containers).
    pub boxes: NamedTable<'a>,
    /// Macro bodies (`@name` headings).
    pub macros: NamedTable<'a>,
    /// Setting bodies (`@name` headings that also record a param).
    pub settings: NamedTable<'a>,
    /// Navigation menu templates.
    pub menus: NamedTable<'a>,
}
