//! Asset resolution: the pure mapping contract.
//!
//! `Mapper::resolve` takes one asset (path, byte size, content digest - the
//! latter two supplied by the caller, so the mapper itself does no I/O) and
//! a mode, and returns the transform chain, rendered destination, bundle
//! group and emit decision. Identical inputs yield identical results;
//! invocations are independent and safe to run from parallel workers.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::config::{PipelineConfig, PurgeConfig};
use crate::core::{BundleGroup, Mode};
use crate::pages::PageStore;

use super::chain::{
    self, TransformStep, media_chain, script_chain, style_chain, template_chain,
};
use super::{AssetClass, DestTemplate, MapError, Rule, RuleSet};

// ============================================================================
// Inputs and outputs
// ============================================================================

/// One asset as seen by the mapper.
///
/// `path` is relative to the source root. `size` and `hash` come from the
/// caller (filesystem metadata and the content-hash provider).
#[derive(Debug, Clone)]
pub struct AssetInput {
    pub path: PathBuf,
    pub size: u64,
    pub hash: String,
}

impl AssetInput {
    pub fn new(path: impl Into<PathBuf>, size: u64, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size,
            hash: hash.into(),
        }
    }
}

/// How a resolved output leaves the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// Written to its destination path.
    File,
    /// Embedded as a data URI in the referencing output.
    Inline,
}

/// The mapper's verdict for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Which rule class matched.
    pub class: AssetClass,
    /// Transform steps in application order.
    pub chain: Vec<TransformStep>,
    /// Rendered destination, relative to the output root.
    pub destination: String,
    /// Bundle group the output aggregates into.
    pub group: BundleGroup,
    /// File vs data-URI emission.
    pub emit: Emit,
}

// ============================================================================
// Mapper
// ============================================================================

/// The configured rule table plus the collaborator data resolution needs.
///
/// Built once per invocation; immutable afterwards.
#[derive(Debug)]
pub struct Mapper {
    rules: RuleSet,
    vendor_marker: String,
    vendor_script_dest: DestTemplate,
    vendor_style_dest: DestTemplate,
    purge: PurgeConfig,
    pages: PageStore,
}

impl Mapper {
    /// Build a mapper from configuration and a loaded page-data store.
    pub fn new(config: &PipelineConfig, pages: PageStore) -> Self {
        Self {
            rules: RuleSet::from_config(config),
            vendor_marker: config.rules.vendor_marker.clone(),
            vendor_script_dest: DestTemplate::new(&config.rules.vendor_script_dest),
            vendor_style_dest: DestTemplate::new(&config.rules.vendor_style_dest),
            purge: config.purge.clone(),
            pages,
        }
    }

    /// Resolve one asset.
    ///
    /// # Errors
    ///
    /// - [`MapError::UnmatchedAsset`] when no rule matches the path
    /// - [`MapError::MissingPageData`] when a template's key has no document
    pub fn resolve(&self, input: &AssetInput, mode: Mode) -> Result<Resolution, MapError> {
        let path = &input.path;
        let is_vendor = self.is_vendor(path);

        // Vendored scripts and styles aggregate into the fixed vendor
        // bundles and never see the per-file rules below.
        if is_vendor
            && let Some(resolution) = self.resolve_vendor_bundle(input, mode)?
        {
            return Ok(resolution);
        }

        let rule = self
            .rules
            .matched(path)
            .ok_or_else(|| MapError::UnmatchedAsset { path: path.clone() })?;

        let chain = self.chain_for(rule, path, mode)?;
        let destination = Self::render_destination(&rule.destination, path, &input.hash);

        let group = if is_vendor {
            BundleGroup::Vendor
        } else if rule.class.produces_css() {
            BundleGroup::Styles
        } else {
            BundleGroup::Main
        };

        // Strict "below the limit": an asset exactly at the limit is a file.
        let emit = match rule.inline_limit {
            Some(limit) if input.size < limit => Emit::Inline,
            _ => Emit::File,
        };

        Ok(Resolution {
            class: rule.class,
            chain,
            destination,
            group,
            emit,
        })
    }

    /// Check whether the path crosses the vendored-dependency marker.
    pub fn is_vendor(&self, path: &Path) -> bool {
        path.components().any(|comp| match comp {
            Component::Normal(os) => os.to_str() == Some(self.vendor_marker.as_str()),
            _ => false,
        })
    }

    /// Vendor bundle resolution for script and stylesheet classes.
    ///
    /// Media under the vendor marker falls through (`None`) to the normal
    /// rules; only its group changes.
    fn resolve_vendor_bundle(
        &self,
        input: &AssetInput,
        mode: Mode,
    ) -> Result<Option<Resolution>, MapError> {
        let path = &input.path;
        let class = AssetClass::from_path(path)
            .ok_or_else(|| MapError::UnmatchedAsset { path: path.clone() })?;

        let resolution = match class {
            AssetClass::Script => Some(Resolution {
                class,
                chain: chain::vendor_script_chain(mode),
                destination: Self::render_destination(&self.vendor_script_dest, path, &input.hash),
                group: BundleGroup::Vendor,
                emit: Emit::File,
            }),
            AssetClass::Stylesheet | AssetClass::Sass => Some(Resolution {
                class,
                chain: style_chain(class, mode, &self.purge),
                destination: Self::render_destination(&self.vendor_style_dest, path, &input.hash),
                group: BundleGroup::Vendor,
                emit: Emit::File,
            }),
            _ => None,
        };

        Ok(resolution)
    }

    /// Select the transform chain for a matched rule.
    fn chain_for(&self, rule: &Rule, path: &Path, mode: Mode) -> Result<Vec<TransformStep>, MapError> {
        match rule.class {
            AssetClass::Script => Ok(script_chain(mode)),
            AssetClass::Stylesheet | AssetClass::Sass => {
                Ok(style_chain(rule.class, mode, &self.purge))
            }
            AssetClass::Template => {
                let key = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                let data = self.pages.get(key).ok_or_else(|| MapError::MissingPageData {
                    key: key.to_string(),
                    expected: self.pages.expected_path(key),
                })?;
                Ok(template_chain(data))
            }
            AssetClass::Image | AssetClass::Font | AssetClass::Video => Ok(media_chain(
                rule.class,
                mode,
                rule.inline_limit.unwrap_or_default(),
            )),
        }
    }

    /// Render a destination template for a path.
    fn render_destination(template: &DestTemplate, path: &Path, hash: &str) -> String {
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        template.render(name, hash, ext)
    }
}

// ============================================================================
// tests
// ============================================================================
