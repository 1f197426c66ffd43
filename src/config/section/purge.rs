//! `[purge]` section configuration.
//!
//! Options forwarded to the style purge step of production extract chains:
//! which bundles to purge and which class patterns survive even when no
//! source references them (classes toggled at runtime by scripts).

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Dead-style purge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeConfig {
    /// Enable purge options on production extract chains.
    pub enable: bool,
    /// Bundle names to purge (others pass through untouched).
    pub only: Vec<String>,
    /// Class patterns kept regardless of usage (regex).
    pub safelist: Vec<String>,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            only: vec!["app".into()],
            safelist: vec!["select2".into(), "my-mfp".into(), "swiper".into()],
        }
    }
}

impl PurgeConfig {
    /// Validate purge settings: every safelist entry must be a valid regex.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        for (idx, pattern) in self.safelist.iter().enumerate() {
            if let Err(e) = Regex::new(pattern) {
                diag.error_with_hint(
                    FieldPath::new("purge.safelist"),
                    format!("[{idx}] invalid regex `{pattern}`"),
                    e.to_string(),
                );
            }
        }

        if self.only.is_empty() {
            diag.error(
                FieldPath::new("purge.only"),
                "enable is true but no bundle is selected",
            );
        }
    }
}
