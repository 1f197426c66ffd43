//! Source tree scanning (pure, read-only).

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::config::PipelineConfig;

/// Discover candidate assets under the source root.
///
/// Returns paths relative to the source root, sorted for deterministic
/// plans. Sprite sources are left out: they only exist inside the
/// generated spritemap (see [`scan_sprites`]).
pub fn scan_assets(config: &PipelineConfig) -> Vec<PathBuf> {
    let source_root = &config.source.root;
    let sprite_dir = config.sprite_dir();

    let mut files: Vec<PathBuf> = WalkDir::new(source_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| !(config.sprite.enable && p.starts_with(&sprite_dir)))
        .filter_map(|p| p.strip_prefix(source_root).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    files
}

/// Discover SVG sprite sources.
///
/// Returns paths relative to the source root, sorted.
pub fn scan_sprites(config: &PipelineConfig) -> Vec<PathBuf> {
    if !config.sprite.enable {
        return vec![];
    }

    let sprite_dir = config.sprite_dir();
    if !sprite_dir.exists() {
        return vec![];
    }

    let source_root = &config.source.root;
    let mut files: Vec<PathBuf> = WalkDir::new(&sprite_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
        })
        .filter_map(|p| p.strip_prefix(source_root).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_root(root: &Path) -> PipelineConfig {
        let mut config = test_parse_config("");
        config.source.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_scan_assets_sorted_relative() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("styles")).unwrap();
        fs::write(dir.path().join("app.js"), "// entry").unwrap();
        fs::write(dir.path().join("styles/app.scss"), "body {}").unwrap();

        let assets = scan_assets(&config_with_root(dir.path()));
        assert_eq!(
            assets,
            vec![PathBuf::from("app.js"), PathBuf::from("styles/app.scss")]
        );
    }

    #[test]
    fn test_scan_assets_skips_sprite_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sprites")).unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("sprites/arrow.svg"), "<svg/>").unwrap();

        let config = config_with_root(dir.path());
        let assets = scan_assets(&config);
        assert_eq!(assets, vec![PathBuf::from("logo.svg")]);

        let sprites = scan_sprites(&config);
        assert_eq!(sprites, vec![PathBuf::from("sprites/arrow.svg")]);
    }

    #[test]
    fn test_scan_sprites_svg_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sprites")).unwrap();
        fs::write(dir.path().join("sprites/arrow.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("sprites/readme.txt"), "docs").unwrap();

        let sprites = scan_sprites(&config_with_root(dir.path()));
        assert_eq!(sprites, vec![PathBuf::from("sprites/arrow.svg")]);
    }

    #[test]
    fn test_scan_sprites_disabled() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sprites")).unwrap();
        fs::write(dir.path().join("sprites/arrow.svg"), "<svg/>").unwrap();

        let mut config = config_with_root(dir.path());
        config.sprite.enable = false;

        assert!(scan_sprites(&config).is_empty());
        // disabled sprites are ordinary discoverable assets again
        assert_eq!(scan_assets(&config).len(), 1);
    }

    #[test]
    fn test_scan_missing_root() {
        let config = config_with_root(Path::new("/nonexistent/src"));
        assert!(scan_assets(&config).is_empty());
    }
}
