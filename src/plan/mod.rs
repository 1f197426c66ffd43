//! Build plan assembly.
//!
//! The plan is the hand-off document to the executing bundler: every
//! discovered asset resolved through the rule table, plus the fixed outputs
//! the configuration declares (verbatim copies, the generated spritemap).
//! Resolutions are independent and side-effect-free, so they run on the
//! rayon pool; failures are collected and surfaced together rather than
//! aborting at the first one.

pub mod report;
mod scan;

pub use scan::{scan_assets, scan_sprites};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::core::{BundleGroup, Mode};
use crate::mapper::{AssetInput, Emit, MapError, Mapper, Resolution};
use crate::utils::path::to_forward_slashes;
use crate::{debug, log};

// ============================================================================
// Plan document
// ============================================================================

/// One resolved asset in the plan.
#[derive(Debug, Serialize)]
pub struct PlannedAsset {
    /// Source path relative to the source root (forward slashes).
    pub source: String,
    #[serde(flatten)]
    pub resolution: Resolution,
    /// Encoded payload for inlined assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}

/// A verbatim copy into the output tree.
#[derive(Debug, Serialize)]
pub struct CopyOutput {
    pub from: String,
    pub to: String,
    pub group: BundleGroup,
}

/// A generated artifact assembled from multiple sources.
#[derive(Debug, Serialize)]
pub struct GeneratedOutput {
    pub destination: String,
    pub sources: Vec<String>,
    pub group: BundleGroup,
}

/// The full build plan for one mode.
#[derive(Debug, Serialize)]
pub struct BuildPlan {
    pub mode: Mode,
    pub entry: String,
    pub public_path: String,
    pub assets: Vec<PlannedAsset>,
    pub copies: Vec<CopyOutput>,
    pub generated: Vec<GeneratedOutput>,
}

impl BuildPlan {
    /// Count resolved assets in a bundle group.
    pub fn group_count(&self, group: BundleGroup) -> usize {
        self.assets
            .iter()
            .filter(|a| a.resolution.group == group)
            .count()
    }

    /// Count assets marked for data-URI inlining.
    pub fn inline_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| a.resolution.emit == Emit::Inline)
            .count()
    }

    /// Serialize the plan document.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

// ============================================================================
// Plan assembly
// ============================================================================

/// Scan the source root and resolve every discovered asset.
///
/// # Errors
///
/// Fails when any asset is unreadable or unmapped, or when two outputs
/// collide on one destination. All failures are logged before bailing so a
/// broken tree surfaces every problem at once.
pub fn build_plan(config: &PipelineConfig, mapper: &Mapper, mode: Mode) -> Result<BuildPlan> {
    let paths = scan_assets(config);
    debug!("plan"; "discovered {} file(s) under {}", paths.len(), config.source.root.display());

    let entry_abs = config.source.root.join(&config.source.entry);
    if !entry_abs.is_file() {
        log!("warning"; "entry `{}` not found under {}",
            config.source.entry.display(), config.source.root.display());
    }

    // Independent pure resolutions: fan out across the rayon pool.
    let results: Vec<Result<PlannedAsset, (PathBuf, String)>> = paths
        .par_iter()
        .map(|rel| resolve_one(config, mapper, rel, mode))
        .collect();

    let mut assets = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(asset) => assets.push(asset),
            Err(failure) => failures.push(failure),
        }
    }

    if !failures.is_empty() {
        for (path, message) in &failures {
            log!("error"; "{}: {}", path.display(), message);
        }
        bail!("{} asset(s) failed to resolve", failures.len());
    }

    let copies = collect_copies(config);
    let generated = collect_generated(config);

    let collisions = detect_collisions(&assets, &copies, &generated);
    if !collisions.is_empty() {
        for error in &collisions {
            log!("error"; "{error}");
        }
        bail!("{} destination collision(s)", collisions.len());
    }

    Ok(BuildPlan {
        mode,
        entry: to_forward_slashes(&config.source.entry),
        public_path: config.output.public_path.clone(),
        assets,
        copies,
        generated,
    })
}

/// Resolve a single asset: metadata, fingerprint, mapping, inline payload.
fn resolve_one(
    config: &PipelineConfig,
    mapper: &Mapper,
    rel: &Path,
    mode: Mode,
) -> Result<PlannedAsset, (PathBuf, String)> {
    let fail = |e: String| (rel.to_path_buf(), e);

    let abs = config.source.root.join(rel);
    let size = fs::metadata(&abs).map_err(|e| fail(e.to_string()))?.len();
    let hash = crate::utils::hash::fingerprint_file(&abs).map_err(|e| fail(e.to_string()))?;

    let input = AssetInput::new(rel.to_path_buf(), size, hash);
    let resolution = mapper
        .resolve(&input, mode)
        .map_err(|e| fail(e.to_string()))?;

    // The plan carries the encoded payload so the executing side never has
    // to re-read inlined sources.
    let data_uri = if resolution.emit == Emit::Inline {
        let bytes = fs::read(&abs).map_err(|e| fail(e.to_string()))?;
        Some(crate::utils::data_uri::encode(rel, &bytes))
    } else {
        None
    };

    Ok(PlannedAsset {
        source: to_forward_slashes(rel),
        resolution,
        data_uri,
    })
}

/// Gather verbatim copy outputs, skipping missing sources.
fn collect_copies(config: &PipelineConfig) -> Vec<CopyOutput> {
    let mut copies = Vec::new();
    for entry in &config.copy.patterns {
        let abs = config.source.root.join(entry.source());
        if !abs.exists() {
            debug!("plan"; "copy source missing, skipping: {}", entry.source().display());
            continue;
        }
        copies.push(CopyOutput {
            from: to_forward_slashes(entry.source()),
            to: entry.output_name(),
            group: BundleGroup::Other,
        });
    }
    copies
}

/// Gather generated artifacts (the SVG spritemap).
fn collect_generated(config: &PipelineConfig) -> Vec<GeneratedOutput> {
    let mut generated = Vec::new();
    let sprites = scan_sprites(config);
    if !sprites.is_empty() {
        generated.push(GeneratedOutput {
            destination: config.sprite.output.clone(),
            sources: sprites.iter().map(|p| to_forward_slashes(p)).collect(),
            group: BundleGroup::Other,
        });
    }
    generated
}

/// Detect destination collisions across the whole output set.
///
/// Vendor outputs are exempt: many sources aggregating into one vendor
/// bundle is the point, not a collision.
fn detect_collisions(
    assets: &[PlannedAsset],
    copies: &[CopyOutput],
    generated: &[GeneratedOutput],
) -> Vec<MapError> {
    let asset_entries = assets
        .iter()
        .map(|a| (a.resolution.destination.as_str(), a.source.as_str(), a.resolution.group));
    let copy_entries = copies.iter().map(|c| (c.to.as_str(), c.from.as_str(), c.group));
    let generated_entries = generated
        .iter()
        .map(|g| (g.destination.as_str(), "(generated)", g.group));

    check_collisions(asset_entries.chain(copy_entries).chain(generated_entries))
}

/// Pure collision check over (destination, source, group) triples.
fn check_collisions<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str, BundleGroup)>,
) -> Vec<MapError> {
    let mut seen: FxHashMap<&str, &str> = FxHashMap::default();
    let mut errors = Vec::new();

    for (destination, source, group) in entries {
        if group == BundleGroup::Vendor {
            continue;
        }
        if let Some(first) = seen.get(destination) {
            errors.push(MapError::DestinationCollision {
                destination: destination.to_string(),
                first: PathBuf::from(*first),
                second: PathBuf::from(source),
            });
        } else {
            seen.insert(destination, source);
        }
    }

    errors
}

/// Read an asset and build its mapper input (shared with `resolve` CLI).
pub fn asset_input(abs: &Path, rel: PathBuf) -> Result<AssetInput> {
    let size = fs::metadata(abs)
        .with_context(|| format!("cannot stat {}", abs.display()))?
        .len();
    let hash = crate::utils::hash::fingerprint_file(abs)
        .with_context(|| format!("cannot read {}", abs.display()))?;
    Ok(AssetInput::new(rel, size, hash))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::pages::PageStore;
    use std::fs;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> PipelineConfig {
        let mut config = test_parse_config("");
        config.source.root = dir.path().to_path_buf();
        config.copy.patterns = vec![];
        config
    }

    fn mapper(config: &PipelineConfig) -> Mapper {
        Mapper::new(config, PageStore::empty("src/views/data"))
    }

    #[test]
    fn test_build_plan_simple_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("styles")).unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        fs::write(dir.path().join("styles/app.scss"), "body {}").unwrap();
        fs::write(dir.path().join("images/logo.png"), vec![0u8; 2048]).unwrap();

        let config = setup(&dir);
        let plan = build_plan(&config, &mapper(&config), Mode::Production).unwrap();

        assert_eq!(plan.assets.len(), 3);
        assert_eq!(plan.group_count(BundleGroup::Main), 2);
        assert_eq!(plan.group_count(BundleGroup::Styles), 1);
        assert_eq!(plan.inline_count(), 1); // the 2 KB logo

        let logo = plan.assets.iter().find(|a| a.source.ends_with("logo.png")).unwrap();
        assert!(logo.data_uri.as_deref().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_build_plan_unmatched_asset_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "// ok").unwrap();
        fs::write(dir.path().join("notes.txt"), "stray").unwrap();

        let config = setup(&dir);
        let err = build_plan(&config, &mapper(&config), Mode::Production).unwrap_err();
        assert!(err.to_string().contains("failed to resolve"));
    }

    #[test]
    fn test_build_plan_detects_hash_collision() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("subdir")).unwrap();
        // identical name and identical bytes: same hash, same destination
        fs::write(dir.path().join("a.png"), vec![1u8; 4000]).unwrap();
        fs::write(dir.path().join("subdir/a.png"), vec![1u8; 4000]).unwrap();

        let config = setup(&dir);
        let err = build_plan(&config, &mapper(&config), Mode::Production).unwrap_err();
        assert!(err.to_string().contains("collision"));
    }

    #[test]
    fn test_build_plan_distinct_content_no_collision() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("subdir")).unwrap();
        // same name, different bytes: hashes differ, destinations differ
        fs::write(dir.path().join("a.png"), vec![1u8; 4000]).unwrap();
        fs::write(dir.path().join("subdir/a.png"), vec![2u8; 4000]).unwrap();

        let config = setup(&dir);
        let plan = build_plan(&config, &mapper(&config), Mode::Production).unwrap();
        assert_eq!(plan.assets.len(), 2);
    }

    #[test]
    fn test_vendor_bundle_exempt_from_collision() {
        let entries = [
            ("assets/vendor.js", "node_modules/a/index.js", BundleGroup::Vendor),
            ("assets/vendor.js", "node_modules/b/index.js", BundleGroup::Vendor),
        ];
        assert!(check_collisions(entries).is_empty());
    }

    #[test]
    fn test_copy_output_collides_with_asset() {
        let entries = [
            ("assets/favicon.ico", "images/favicon.ico", BundleGroup::Main),
            ("assets/favicon.ico", "icons/favicon.ico", BundleGroup::Other),
        ];
        let errors = check_collisions(entries);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], MapError::DestinationCollision { .. }));
    }

    #[test]
    fn test_plan_includes_sprite_and_copies() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sprites")).unwrap();
        fs::create_dir_all(dir.path().join("assets/fonts")).unwrap();
        fs::write(dir.path().join("app.js"), "// entry").unwrap();
        fs::write(dir.path().join("sprites/arrow.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("assets/fonts/site.woff2"), vec![0u8; 6000]).unwrap();

        let mut config = setup(&dir);
        config.copy.patterns = vec![crate::config::CopyEntry::Simple("assets/fonts".into())];

        let plan = build_plan(&config, &mapper(&config), Mode::Production).unwrap();

        assert_eq!(plan.generated.len(), 1);
        assert_eq!(plan.generated[0].destination, "assets/sprite.svg");
        assert_eq!(plan.generated[0].sources, vec!["sprites/arrow.svg"]);

        assert_eq!(plan.copies.len(), 1);
        assert_eq!(plan.copies[0].to, "assets/fonts");
        assert_eq!(plan.copies[0].group, BundleGroup::Other);
    }

    #[test]
    fn test_plan_json_roundtrips_fields() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "// entry").unwrap();

        let config = setup(&dir);
        let plan = build_plan(&config, &mapper(&config), Mode::Development).unwrap();
        let json = plan.to_json(false).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "development");
        assert_eq!(value["entry"], "app.js");
        assert_eq!(value["assets"][0]["source"], "app.js");
        assert_eq!(value["assets"][0]["destination"], "assets/app.js");
        assert_eq!(value["assets"][0]["group"], "main");
    }
}
