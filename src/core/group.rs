//! Bundle group definitions.

use serde::{Deserialize, Serialize};

/// Logical output grouping used to aggregate related outputs into one
/// artifact.
///
/// Assignment is a pure function of (input path, rule): vendor-marked paths
/// win over everything, `.css`-producing rules come next, copied-verbatim
/// and generated outputs are `Other`, the rest is `Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleGroup {
    /// Reachable from the declared entry point.
    Main,
    /// Pulled in through the vendored-dependency directory.
    Vendor,
    /// Extracted stylesheet bundles.
    Styles,
    /// Verbatim copies and generated artifacts (sprite, favicon).
    Other,
}

impl BundleGroup {
    /// Display name for this group.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Vendor => "vendor",
            Self::Styles => "styles",
            Self::Other => "other",
        }
    }

    /// All groups in report order.
    pub const ALL: [Self; 4] = [Self::Main, Self::Vendor, Self::Styles, Self::Other];
}
