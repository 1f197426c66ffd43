//! Pipeline configuration management for `packmap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── source     # [source]
//! │   ├── output     # [output]
//! │   ├── rules      # [rules]
//! │   ├── pages      # [pages]
//! │   ├── sprite     # [sprite]
//! │   ├── copy       # [copy]
//! │   └── purge      # [purge]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[source]` | Source root and entry script                     |
//! | `[output]` | Output directory and public URL prefix           |
//! | `[rules]`  | Inline limits, vendor marker, destination templates |
//! | `[pages]`  | Page data directory for the template rule        |
//! | `[sprite]` | SVG spritemap generation                         |
//! | `[copy]`   | Verbatim copy patterns                           |
//! | `[purge]`  | Dead-style purge scope and safelist              |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    CopyConfig, CopyEntry, OutputConfig, PagesConfig, PurgeConfig, RulesConfig, SourceConfig,
    SpriteConfig,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing packmap.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source tree settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Rule table settings
    #[serde(default)]
    pub rules: RulesConfig,

    /// Page data settings
    #[serde(default)]
    pub pages: PagesConfig,

    /// Spritemap settings
    #[serde(default)]
    pub sprite: SpriteConfig,

    /// Verbatim copy settings
    #[serde(default)]
    pub copy: CopyConfig,

    /// Style purge settings
    #[serde(default)]
    pub purge: PurgeConfig,
}

impl PipelineConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file; the project root
    /// is the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = match find_config_file(&cli.config) {
            Some(path) => path,
            None => {
                log!(
                    "error";
                    "Config file '{}' not found in this or any parent directory.",
                    cli.config.display()
                );
                std::process::exit(1);
            }
        };

        let mut config = Self::from_path(&config_path)?;

        // Validate raw paths before normalization
        config.validate_paths()?;

        // Set paths and apply CLI options
        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let root = crate::utils::path::normalize_path(&root);
        self.root = root.clone();
        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        self.source.normalize(&root);
        self.output.normalize(&root);
        self.pages.normalize(&root);
        // sprite.dir and copy patterns stay relative: they are joined with
        // the (now absolute) source root at scan time.

        self.apply_command_options(cli);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        // Default no (empty input), explicit "y" or "yes" to continue
        Ok(input == "y" || input == "yes")
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root (for display).
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute sprite source directory.
    pub fn sprite_dir(&self) -> PathBuf {
        self.source.root.join(&self.sprite.dir)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Plan { args } => crate::logger::set_verbose(args.verbose),
            Commands::Resolve { args } => crate::logger::set_verbose(args.verbose),
            Commands::Check { verbose } => crate::logger::set_verbose(*verbose),
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Pre-validate paths before normalization.
    ///
    /// Must run before `finalize()`: normalization joins paths with the
    /// project root, after which user-supplied absolute paths are
    /// indistinguishable from normalized ones.
    fn validate_paths(&self) -> Result<()> {
        use std::path::Component;

        let mut diag = ConfigDiagnostics::new();

        let dirs = [
            (FieldPath::new("source.root"), &self.source.root),
            (FieldPath::new("output.dir"), &self.output.dir),
            (FieldPath::new("pages.data_dir"), &self.pages.data_dir),
        ];
        for (field, path) in dirs {
            for comp in path.components() {
                let msg = match comp {
                    Component::ParentDir => Some("parent directory '..' not allowed"),
                    Component::Prefix(_) | Component::RootDir => Some("absolute paths not allowed"),
                    _ => None,
                };
                if let Some(reason) = msg {
                    diag.error(field, format!("path '{}': {reason}", path.display()));
                }
            }
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.source.validate(&mut diag);
        self.output.validate(&mut diag);
        self.rules.validate(&mut diag);
        self.sprite.validate(&mut diag);
        self.copy.validate(&mut diag);
        self.purge.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PipelineConfig {
    let (parsed, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<PipelineConfig, _> = toml::from_str("[source\nroot = \"src\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_sections() {
        let config = PipelineConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.source.root, PathBuf::from("src"));
        assert_eq!(config.output.dir, PathBuf::from("dist"));
        assert_eq!(config.rules.image_inline_limit, 3000);
        assert!(config.sprite.enable);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[source]\nroot = \"src\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.source.root, PathBuf::from("src"));
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[source]\nroot = \"src\"\n[rules]\nimage_inline_limit = 4096";
        let (_, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_paths_rejects_absolute() {
        let config = test_parse_config("[source]\nroot = \"/abs/src\"");
        assert!(config.validate_paths().is_err());
    }

    #[test]
    fn test_validate_paths_rejects_parent() {
        let config = test_parse_config("[output]\ndir = \"../dist\"");
        assert!(config.validate_paths().is_err());
    }
}
