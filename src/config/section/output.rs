//! `[output]` section configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Output settings: where the bundle lands and the URL prefix emitted
/// artifacts are referenced under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the project root.
    pub dir: PathBuf,
    /// Public URL prefix prepended to emitted asset references.
    pub public_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            public_path: String::new(),
        }
    }
}

impl OutputConfig {
    /// Normalize the output directory relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.dir = crate::utils::path::normalize_path(&root.join(&self.dir));
    }

    /// Validate output settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        // A public path is either empty, a URL, or ends with a slash so
        // destination joins stay unambiguous.
        if !self.public_path.is_empty() && !self.public_path.ends_with('/') {
            diag.error_with_hint(
                FieldPath::new("output.public_path"),
                format!("`{}` must end with '/'", self.public_path),
                "use e.g. \"/static/\" or \"https://cdn.example.com/\"",
            );
        }
    }
}
