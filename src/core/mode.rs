//! Build mode selection for development/production pipelines.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Build mode.
///
/// Switches transform-chain variants (e.g. whether stylesheets are injected
/// at runtime or extracted to files) but never the rule set's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Source maps, runtime style injection, no minification.
    Development,
    /// Extracted stylesheets, minified output, optimized images.
    Production,
}

impl Mode {
    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Display name for this mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
