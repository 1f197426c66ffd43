//! Destination templates: `[name]`, `[hash:7]`, `[ext]` substitution.

use serde::Serialize;

use crate::utils::hash::FINGERPRINT_LEN;

/// A destination path pattern with substitutable tokens, resolved per
/// matched file. Rendered destinations are relative to the output root and
/// always use forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DestTemplate(String);

impl DestTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether rendering needs a content hash.
    pub fn wants_hash(&self) -> bool {
        self.0.contains("[hash:7]")
    }

    /// Substitute tokens into the template.
    ///
    /// `hash` is truncated to the fingerprint length; templates without a
    /// hash token ignore it entirely.
    pub fn render(&self, name: &str, hash: &str, ext: &str) -> String {
        let short_hash = &hash[..hash.len().min(FINGERPRINT_LEN)];
        self.0
            .replace("[name]", name)
            .replace("[hash:7]", short_hash)
            .replace("[ext]", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_tokens() {
        let template = DestTemplate::new("assets/images/[name].[hash:7].[ext]");
        assert_eq!(
            template.render("logo", "4ba9f21", "png"),
            "assets/images/logo.4ba9f21.png"
        );
    }

    #[test]
    fn test_render_name_only() {
        let template = DestTemplate::new("assets/[name].js");
        assert_eq!(template.render("app", "deadbee", "js"), "assets/app.js");
    }

    #[test]
    fn test_render_no_tokens() {
        let template = DestTemplate::new("assets/vendor.js");
        assert_eq!(template.render("lodash", "1234567", "js"), "assets/vendor.js");
    }

    #[test]
    fn test_render_truncates_long_hash() {
        let template = DestTemplate::new("[name].[hash:7].[ext]");
        assert_eq!(
            template.render("a", "0123456789abcdef", "css"),
            "a.0123456.css"
        );
    }

    #[test]
    fn test_wants_hash() {
        assert!(DestTemplate::new("[name].[hash:7].[ext]").wants_hash());
        assert!(!DestTemplate::new("[name].css").wants_hash());
    }
}
