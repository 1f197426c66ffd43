//! `[sprite]` section configuration.
//!
//! SVG files under the sprite directory are stitched into one generated
//! spritemap instead of passing through the image rule.
//!
//! # Example
//!
//! ```toml
//! [sprite]
//! dir = "sprites"
//! output = "assets/sprite.svg"
//! stylesheet = "assets/styles/_sprites.scss"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Sprite generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Enable spritemap generation.
    pub enable: bool,
    /// Sprite source directory, relative to the source root.
    pub dir: PathBuf,
    /// Destination of the generated spritemap, relative to the output root.
    pub output: String,
    /// Optional generated stylesheet with one class per sprite symbol,
    /// relative to the source root.
    pub stylesheet: Option<PathBuf>,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            enable: true,
            dir: PathBuf::from("sprites"),
            output: "assets/sprite.svg".into(),
            stylesheet: Some(PathBuf::from("assets/styles/_sprites.scss")),
        }
    }
}

impl SpriteConfig {
    /// The path component that marks sprite sources (used by the image
    /// rule's exclusion test).
    pub fn marker(&self) -> &str {
        self.dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("sprites")
    }

    /// Validate sprite settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.output.is_empty() {
            diag.error(FieldPath::new("sprite.output"), "must not be empty");
        } else if self.output.starts_with('/') {
            diag.error(
                FieldPath::new("sprite.output"),
                format!("`{}`: absolute paths not allowed", self.output),
            );
        }

        for comp in self.dir.components() {
            use std::path::Component;
            let msg = match comp {
                Component::ParentDir => Some("parent directory '..' not allowed"),
                Component::Prefix(_) | Component::RootDir => Some("absolute paths not allowed"),
                _ => None,
            };
            if let Some(reason) = msg {
                diag.error(
                    FieldPath::new("sprite.dir"),
                    format!("path '{}': {reason}", self.dir.display()),
                );
            }
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
        assert!(config.sprite.enable);
        assert_eq!(config.sprite.dir, PathBuf::from("sprites"));
        assert_eq!(config.sprite.output, "assets/sprite.svg");
        assert_eq!(config.sprite.marker(), "sprites");
    }

    #[test]
    fn test_marker_uses_basename() {
        let config = test_parse_config("[sprite]\ndir = \"assets/icons\"");
        assert_eq!(config.sprite.marker(), "icons");
    }

    #[test]
    fn test_absolute_output_rejected() {
        let mut sprite = SpriteConfig::default();
        sprite.output = "/sprite.svg".into();
        let mut diag = ConfigDiagnostics::new();
        sprite.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_disabled_skips_validation() {
        let mut sprite = SpriteConfig::default();
        sprite.enable = false;
        sprite.output = String::new();
        let mut diag = ConfigDiagnostics::new();
        sprite.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
