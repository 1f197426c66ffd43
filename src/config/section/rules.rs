//! `[rules]` section configuration.
//!
//! Knobs for the pipeline rule table: inline thresholds, the vendor path
//! marker and per-category destination templates. Templates use the tokens
//! `[name]`, `[hash:7]` and `[ext]`.
//!
//! # Example
//!
//! ```toml
//! [rules]
//! image_inline_limit = 3000
//! vendor_marker = "node_modules"
//! image_dest = "assets/images/[name].[hash:7].[ext]"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Rule table settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path component marking vendored dependencies.
    pub vendor_marker: String,

    /// Images strictly below this byte size are inlined as data URIs.
    pub image_inline_limit: u64,
    /// Fonts strictly below this byte size are inlined as data URIs.
    pub font_inline_limit: u64,
    /// Videos strictly below this byte size are inlined as data URIs.
    pub video_inline_limit: u64,

    /// Destination template for entry-reachable scripts.
    pub script_dest: String,
    /// Destination template for extracted stylesheets.
    pub style_dest: String,
    /// Destination template for compiled page templates.
    pub template_dest: String,
    /// Destination template for images emitted as files.
    pub image_dest: String,
    /// Destination template for fonts emitted as files.
    pub font_dest: String,
    /// Destination template for videos emitted as files.
    pub video_dest: String,

    /// Aggregated vendor script bundle (no tokens, single artifact).
    pub vendor_script_dest: String,
    /// Aggregated vendor stylesheet bundle (no tokens, single artifact).
    pub vendor_style_dest: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            vendor_marker: "node_modules".into(),
            image_inline_limit: 3000,
            font_inline_limit: 5000,
            video_inline_limit: 10000,
            script_dest: "assets/[name].js".into(),
            style_dest: "[name].css".into(),
            template_dest: "[name].html".into(),
            image_dest: "assets/images/[name].[hash:7].[ext]".into(),
            font_dest: "assets/fonts/[name].[hash:7].[ext]".into(),
            video_dest: "assets/videos/[name].[hash:7].[ext]".into(),
            vendor_script_dest: "assets/vendor.js".into(),
            vendor_style_dest: "vendors.css".into(),
        }
    }
}

impl RulesConfig {
    /// Validate rule settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.vendor_marker.is_empty() {
            diag.error(
                FieldPath::new("rules.vendor_marker"),
                "must not be empty",
            );
        }

        // Templated destinations need `[name]` or two inputs with the same
        // extension would always overwrite each other.
        let templated = [
            (FieldPath::new("rules.script_dest"), &self.script_dest),
            (FieldPath::new("rules.style_dest"), &self.style_dest),
            (FieldPath::new("rules.template_dest"), &self.template_dest),
            (FieldPath::new("rules.image_dest"), &self.image_dest),
            (FieldPath::new("rules.font_dest"), &self.font_dest),
            (FieldPath::new("rules.video_dest"), &self.video_dest),
        ];
        for (field, template) in templated {
            Self::validate_destination(template, field, diag);
            if !template.contains("[name]") {
                diag.error_with_hint(
                    field,
                    format!("`{template}` has no `[name]` token"),
                    "distinct inputs would collide on the same destination",
                );
            }
        }

        // Bundle destinations are fixed names.
        for (field, dest) in [
            (FieldPath::new("rules.vendor_script_dest"), &self.vendor_script_dest),
            (FieldPath::new("rules.vendor_style_dest"), &self.vendor_style_dest),
        ] {
            Self::validate_destination(dest, field, diag);
        }
    }

    /// Check a destination template for unsafe path shapes.
    fn validate_destination(dest: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if dest.is_empty() {
            diag.error(field, "must not be empty");
        } else if dest.starts_with('/') {
            diag.error(field, format!("`{dest}`: absolute paths not allowed"));
        } else if dest.split('/').any(|c| c == "..") {
            diag.error(field, format!("`{dest}`: parent directory '..' not allowed"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.rules.image_inline_limit, 3000);
        assert_eq!(config.rules.font_inline_limit, 5000);
        assert_eq!(config.rules.video_inline_limit, 10000);
        assert_eq!(config.rules.vendor_marker, "node_modules");
        assert_eq!(config.rules.script_dest, "assets/[name].js");
        assert_eq!(config.rules.vendor_style_dest, "vendors.css");
    }

    #[test]
    fn test_override_limit() {
        let config = test_parse_config("[rules]\nimage_inline_limit = 8192");
        assert_eq!(config.rules.image_inline_limit, 8192);
    }

    #[test]
    fn test_missing_name_token_rejected() {
        let mut rules = RulesConfig::default();
        rules.image_dest = "assets/images/static.[ext]".into();
        let mut diag = ConfigDiagnostics::new();
        rules.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_unsafe_destinations_rejected() {
        let mut rules = RulesConfig::default();
        rules.script_dest = "/assets/[name].js".into();
        rules.font_dest = "../fonts/[name].[ext]".into();
        let mut diag = ConfigDiagnostics::new();
        rules.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_vendor_dest_needs_no_token() {
        let rules = RulesConfig::default();
        let mut diag = ConfigDiagnostics::new();
        rules.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
