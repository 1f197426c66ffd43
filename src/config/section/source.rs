//! `[source]` section configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Source tree settings: where assets are discovered and which script is
/// the bundle entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source root directory, relative to the project root.
    pub root: PathBuf,
    /// Entry script, relative to the source root.
    pub entry: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            entry: PathBuf::from("app.js"),
        }
    }
}

impl SourceConfig {
    /// Normalize the source root relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.root = crate::utils::path::normalize_path(&root.join(&self.root));
    }

    /// Validate source settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.root.exists() {
            diag.error(
                FieldPath::new("source.root"),
                format!("directory not found: {}", self.root.display()),
            );
        }

        let is_script = self
            .entry
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "js" | "mjs"));
        if !is_script {
            diag.error_with_hint(
                FieldPath::new("source.entry"),
                format!("`{}` is not a script", self.entry.display()),
                "the entry point must be a .js or .mjs file",
            );
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
        assert_eq!(config.source.root, PathBuf::from("src"));
        assert_eq!(config.source.entry, PathBuf::from("app.js"));
    }

    #[test]
    fn test_custom_entry() {
        let config = test_parse_config("[source]\nentry = \"main.mjs\"");
        assert_eq!(config.source.entry, PathBuf::from("main.mjs"));
    }

    #[test]
    fn test_entry_must_be_script() {
        let source = SourceConfig {
            root: std::env::temp_dir(),
            entry: PathBuf::from("app.css"),
        };
        let mut diag = ConfigDiagnostics::new();
        source.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
