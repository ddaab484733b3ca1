//! Macro-driven documentation page renderer.
//!
//! Turns an extended-markdown source and an HTML page template into a final
//! page. The template declares boxes, asides, settings, menus and macros in
//! `<aside>` blocks; the source uses them through command headings:
//!
//! - `# @name args` expands a setting or macro
//! - `# ~name args` … `# ~` wraps content in a box
//!
//! Aside boxes route their content to named regions, and the result is
//! substituted into the template's `@NAME@` placeholders together with the
//! rendered navigation menu.
//!
//! # Example
//!
//! ```
//! use kdocs_render::{DocMenuEntry, PageRenderer, Theme};
//!
//! let template = r#"<aside data-name="tip" class="macro"><b>@ARGS@</b></aside>
//! <nav>@menu@</nav>@body@"#;
//! let theme = Theme {
//!     doc_menu: vec![DocMenuEntry::link("Home", "/")],
//!     ..Theme::default()
//! };
//!
//! let result = PageRenderer::new().render(template, "## @tip Save often", &theme, None);
//! assert!(result.html.contains("<b>Save often</b>"));
//! assert!(result.html.contains(r#"<a class="item" href="/">Home</a>"#));
//! assert!(result.warnings.is_empty());
//! ```

mod attrs;
mod escape;
mod harvest;
mod headings;
mod inject;
mod links;
mod logo;
mod markdown;
mod menu;
mod regions;
mod renderer;
mod tables;
mod util;

pub use attrs::parse_html_attrs;
pub use escape::{html_quote, html_requote};
pub use harvest::{BlockKind, Declaration, Harvest, classify, harvest_blocks};
pub use headings::{Rewrite, rewrite_headings};
pub use inject::inject_html;
pub use links::{CmdLink, LinkNormalizer};
pub use logo::{DataUriLogo, LogoResolver};
pub use markdown::{CmarkConverter, MarkdownConverter};
pub use menu::{DocMenuEntry, is_valid_link, render_menu};
pub use regions::{MAIN_REGION, Metadata, Registers, detect_metadata, route_regions};
pub use renderer::{DEFAULT_TARGET_NAME, PageParams, PageRenderer, RenderResult, Theme, render};
pub use tables::{Defaults, NamedTable, Tables};
