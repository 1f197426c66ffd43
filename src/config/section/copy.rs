//! `[copy]` section configuration.
//!
//! Files and directories copied verbatim into the output tree, bypassing
//! the rule table.
//!
//! # Example
//!
//! ```toml
//! [copy]
//! patterns = [
//!     "assets/fonts",                                                # → dist/assets/fonts
//!     { from = "assets/images/favicons/favicon.ico", to = "assets/favicon.ico" },
//! ]
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Verbatim copy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Copy patterns, evaluated relative to the source root.
    pub patterns: Vec<CopyEntry>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                CopyEntry::Full {
                    from: PathBuf::from("assets/images/favicons/favicon.ico"),
                    to: Some("assets/favicon.ico".into()),
                },
                CopyEntry::Simple(PathBuf::from("assets/images")),
                CopyEntry::Simple(PathBuf::from("assets/fonts")),
            ],
        }
    }
}

impl CopyConfig {
    /// Validate copy patterns: path safety and output conflicts.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut seen: FxHashMap<String, &Path> = FxHashMap::default();

        for (idx, entry) in self.patterns.iter().enumerate() {
            Self::validate_path_safety(entry.source(), idx, diag);

            let to = entry.output_name();
            if let Some(prev) = seen.get(to.as_str()) {
                diag.error(
                    FieldPath::new("copy.patterns"),
                    format!(
                        "[{idx}] output conflict: '{}' and '{}' both copy to '{to}'",
                        entry.source().display(),
                        prev.display(),
                    ),
                );
            } else {
                seen.insert(to, entry.source());
            }
        }
    }

    /// Check a single source path for unsafe components.
    fn validate_path_safety(path: &Path, idx: usize, diag: &mut ConfigDiagnostics) {
        use std::path::Component;

        for comp in path.components() {
            let msg = match comp {
                Component::ParentDir => Some("parent directory '..' not allowed"),
                Component::Prefix(_) | Component::RootDir => Some("absolute paths not allowed"),
                _ => None,
            };
            if let Some(reason) = msg {
                diag.error(
                    FieldPath::new("copy.patterns"),
                    format!("[{idx}] path '{}': {reason}", path.display()),
                );
            }
        }
    }
}

// ============================================================================
// Copy Entry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CopyEntry {
    /// Simple path string, copied under the same relative path.
    Simple(PathBuf),
    /// Full format with optional destination rename.
    Full {
        /// Source path (relative to the source root).
        from: PathBuf,
        /// Destination (relative to the output root, defaults to `from`).
        to: Option<String>,
    },
}

impl CopyEntry {
    /// Get the source path.
    pub fn source(&self) -> &Path {
        match self {
            Self::Simple(p) => p,
            Self::Full { from, .. } => from,
        }
    }

    /// Get the destination, relative to the output root.
    pub fn output_name(&self) -> String {
        match self {
            Self::Simple(p) => crate::utils::path::to_forward_slashes(p),
            Self::Full { from, to } => to
                .clone()
                .unwrap_or_else(|| crate::utils::path::to_forward_slashes(from)),
        }
    }
}
