//! Page rendering pipeline.
//!
//! ```text
//! template ─ harvest_blocks ─────────────────────────────────┐
//! source ─ LinkNormalizer ─ MarkdownConverter ─ rewrite_headings
//!        ─ route_regions ─ Registers::wrap ─ body            │
//! theme.doc_menu ─ render_menu ─ menu                        │
//!                                          inject_html(template, params)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::escape::html_requote;
use crate::harvest::harvest_blocks;
use crate::headings::rewrite_headings;
use crate::inject::inject_html;
use crate::links::LinkNormalizer;
use crate::logo::{DataUriLogo, LogoResolver};
use crate::markdown::{CmarkConverter, MarkdownConverter};
use crate::menu::{DocMenuEntry, render_menu};
use crate::regions::{detect_metadata, route_regions};
use crate::tables::Defaults;

/// Placeholders of the page template that receive HTML unescaped.
const UNESCAPED_PAGE_PARAMS: &[&str] = &["body", "menu", "targetlogo"];

/// Target name used when the theme does not set one.
pub const DEFAULT_TARGET_NAME: &str = "Documentation";

/// Page metadata supplied by the caller, e.g. `{"name": "Page title"}`.
pub type PageParams = HashMap<String, String>;

/// Site-wide presentation settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    /// Product name shown as `@targetname@`.
    pub name: Option<String>,
    /// Logo embedded as `@targetlogo@` when `docs_logo` is set.
    pub logo: Option<String>,
    /// Documentation logo; enables `@targetlogo@`.
    pub docs_logo: Option<String>,
    /// Navigation menu entries.
    #[cfg_attr(feature = "serde", serde(alias = "menu"))]
    pub doc_menu: Vec<DocMenuEntry>,
}

/// Result of rendering a page.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Final HTML page.
    pub html: String,
    /// Page title (explicit, from a setting, or detected from the first H1).
    pub title: Option<String>,
    /// Messages for every inline error emitted into the page.
    pub warnings: Vec<String>,
}

/// Renders markdown pages into an HTML page template.
///
/// Defaults, link rules, converter and logo resolver are read-only, so one
/// renderer can serve concurrent render calls. Every call works on its own
/// tables, params and registers.
///
/// # Example
///
/// ```
/// use kdocs_render::{PageRenderer, Theme};
///
/// let template = concat!(
///     r#"<aside id="main-container" class="box"><main>@BODY@</main></aside>"#,
///     "<title>@name@</title>@body@",
/// );
/// let theme = Theme { name: Some("Kit".to_owned()), ..Theme::default() };
/// let result = PageRenderer::new().render(template, "# Intro\n\nHello.", &theme, None);
///
/// assert_eq!(result.title.as_deref(), Some("Intro"));
/// assert!(result.html.contains("<title>Intro - Kit</title>"));
/// assert!(result.html.contains("<main><h1>Intro</h1>"));
/// ```
pub struct PageRenderer {
    defaults: Arc<Defaults>,
    links: LinkNormalizer,
    converter: Box<dyn MarkdownConverter>,
    logo: Box<dyn LogoResolver>,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Renderer with built-in defaults, link rules and pulldown-cmark.
    #[must_use]
    pub fn new() -> Self {
        Self {
            defaults: Arc::new(Defaults::builtin()),
            links: LinkNormalizer::builtin(),
            converter: Box::new(CmarkConverter::new()),
            logo: Box::new(DataUriLogo),
        }
    }

    /// Replace the default tables.
    #[must_use]
    pub fn with_defaults(mut self, defaults: impl Into<Arc<Defaults>>) -> Self {
        self.defaults = defaults.into();
        self
    }

    /// Replace the bare-link rules.
    #[must_use]
    pub fn with_links(mut self, links: LinkNormalizer) -> Self {
        self.links = links;
        self
    }

    /// Replace the markdown converter.
    #[must_use]
    pub fn with_converter<C: MarkdownConverter + 'static>(mut self, converter: C) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Replace the logo resolver.
    #[must_use]
    pub fn with_logo_resolver<L: LogoResolver + 'static>(mut self, logo: L) -> Self {
        self.logo = Box::new(logo);
        self
    }

    /// Render `source` into `template`.
    ///
    /// When `page_params` is given, its entries are available to the
    /// template, `@title@` is forced to its `name` entry and title and
    /// description are not detected from the content.
    pub fn render(
        &self,
        template: &str,
        source: &str,
        theme: &Theme,
        page_params: Option<&PageParams>,
    ) -> RenderResult {
        let mut tables = self.defaults.tables();
        let harvest = harvest_blocks(template);
        harvest.apply_to(&mut tables);
        let mut warnings = harvest.warnings.clone();

        let source = self.links.normalize(source);
        let html = self.converter.convert(&source);

        let rewrite = rewrite_headings(&html, &tables);
        warnings.extend(rewrite.warnings);

        let mut params = page_params.cloned().unwrap_or_default();
        params.extend(rewrite.settings);

        if let Some(page_params) = page_params {
            let title = page_params.get("name").cloned().unwrap_or_default();
            params.insert("title".to_owned(), title);
        } else {
            let metadata = detect_metadata(&rewrite.html);
            for (key, detected) in [
                ("title", metadata.title),
                ("description", metadata.description),
            ] {
                if let Some(value) = detected
                    && params.get(key).is_none_or(String::is_empty)
                {
                    params.insert(key.to_owned(), value);
                }
            }
        }

        let registers = route_regions(&rewrite.html);
        let body = registers.wrap(&tables.boxes);
        let menu = render_menu(&theme.doc_menu, &tables.menus, &mut warnings);

        let target_name = theme
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_owned());
        let target_logo = match &theme.docs_logo {
            Some(docs_logo) => {
                let logo = theme.logo.as_deref().unwrap_or(docs_logo);
                format!(
                    r#"<img src="{}" />"#,
                    html_requote(&self.logo.to_data_uri(logo))
                )
            }
            None => String::new(),
        };
        let title = params.get("title").cloned();
        let name = format!("{} - {target_name}", title.as_deref().unwrap_or_default());

        params.insert("body".to_owned(), body);
        params.insert("menu".to_owned(), menu);
        params.insert("targetname".to_owned(), target_name);
        params.insert("targetlogo".to_owned(), target_logo);
        params.insert("name".to_owned(), name);

        tracing::debug!(
            regions = registers.names().count(),
            warnings = warnings.len(),
            "Rendered page"
        );

        RenderResult {
            html: inject_html(&harvest.template, &params, UNESCAPED_PAGE_PARAMS),
            title,
            warnings,
        }
    }
}

/// Render with built-in defaults and return the page HTML.
///
/// # Example
///
/// ```
/// use kdocs_render::{Theme, render};
///
/// let html = render("<div>@body@</div>", "Hello *world*", &Theme::default(), None);
/// assert_eq!(html, "<div><p>Hello <em>world</em></p>\n</div>");
/// ```
#[must_use]
pub fn render(
    template: &str,
    source: &str,
    theme: &Theme,
    page_params: Option<&PageParams>,
) -> String {
    PageRenderer::new()
        .render(template, source, theme, page_params)
        .html
}
