//! `[pages]` section configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Page data settings for the template rule.
///
/// Each template `views/<key>.pug` compiles against `<data_dir>/<key>.json`;
/// a template whose key has no document is a hard error at resolve time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory holding one JSON document per page key, relative to the
    /// project root.
    pub data_dir: PathBuf,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("src/views/data"),
        }
    }
}

impl PagesConfig {
    /// Normalize the data directory relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.data_dir = crate::utils::path::normalize_path(&root.join(&self.data_dir));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.pages.data_dir, PathBuf::from("src/views/data"));
    }

    #[test]
    fn test_custom_dir() {
        let config = test_parse_config("[pages]\ndata_dir = \"data/pages\"");
        assert_eq!(config.pages.data_dir, PathBuf::from("data/pages"));
    }
}
