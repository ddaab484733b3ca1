//! Logo embedding.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Turns a theme logo into something usable as an `<img src>`.
pub trait LogoResolver: Send + Sync {
    /// Resolve `logo` to an embeddable URI.
    fn to_data_uri(&self, logo: &str) -> String;
}

/// Embeds inline SVG markup as a base64 data URI.
///
/// `data:` URIs and anything that is not SVG markup (URLs, paths) are
/// returned unchanged.
///
/// # Example
///
/// ```
/// use kdocs_render::{DataUriLogo, LogoResolver};
///
/// let uri = DataUriLogo.to_data_uri("<svg xmlns='http://www.w3.org/2000/svg'/>");
/// assert!(uri.starts_with("data:image/svg+xml;base64,"));
/// assert_eq!(DataUriLogo.to_data_uri("/static/logo.png"), "/static/logo.png");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DataUriLogo;

impl LogoResolver for DataUriLogo {
    fn to_data_uri(&self, logo: &str) -> String {
        let trimmed = logo.trim_start();
        if trimmed.starts_with("<svg") || trimmed.starts_with("<?xml") {
            format!(
                "data:image/svg+xml;base64,{}",
                BASE64_STANDARD.encode(trimmed.as_bytes())
            )
        } else {
            logo.to_owned()
        }
    }
}
