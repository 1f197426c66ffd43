//! Mapping error taxonomy.
//!
//! All three variants are fatal for the asset concerned: the mapper never
//! falls back to a default chain or silently drops an input. Retrying is
//! pointless - resolution is deterministic, so a retry reproduces the same
//! error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while mapping an asset through the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// No rule matches the input - configuration incompleteness, surfaced
    /// instead of skipping the asset.
    #[error("no pipeline rule matches `{path}`", path = .path.display())]
    UnmatchedAsset { path: PathBuf },

    /// Two distinct inputs render the same destination under one mode.
    #[error(
        "`{first}` and `{second}` both resolve to `{destination}`",
        first = .first.display(),
        second = .second.display()
    )]
    DestinationCollision {
        destination: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A template's page key has no document in the page-data directory.
    #[error("no page data for `{key}` (expected `{expected}`)", expected = .expected.display())]
    MissingPageData { key: String, expected: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_path() {
        let err = MapError::UnmatchedAsset {
            path: PathBuf::from("docs/readme.txt"),
        };
        assert!(err.to_string().contains("docs/readme.txt"));
    }

    #[test]
    fn test_collision_names_both_sources() {
        let err = MapError::DestinationCollision {
            destination: "assets/images/a.4ba9f21.png".into(),
            first: PathBuf::from("images/a.png"),
            second: PathBuf::from("subdir/a.png"),
        };
        let msg = err.to_string();
        assert!(msg.contains("images/a.png"));
        assert!(msg.contains("subdir/a.png"));
        assert!(msg.contains("assets/images/a.4ba9f21.png"));
    }

    #[test]
    fn test_missing_page_data_names_expected_file() {
        let err = MapError::MissingPageData {
            key: "index".into(),
            expected: PathBuf::from("src/views/data/index.json"),
        };
        assert!(err.to_string().contains("src/views/data/index.json"));
    }
}
