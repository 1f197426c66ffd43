//! Transform chains: named processing steps per rule, parameterized by mode.
//!
//! Chains are pure descriptions in application order; the external bundler
//! executes them. Step options are structured JSON so the plan document can
//! carry them verbatim to the executing side.

use serde_json::{Value as JsonValue, json};

use crate::config::PurgeConfig;
use crate::core::Mode;

use super::AssetClass;

/// A single named processing step with its options.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TransformStep {
    /// Step name, e.g. `sass-compile` or `extract-to-file`.
    pub name: &'static str,
    /// Step options; `null` when the step takes none.
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    pub options: JsonValue,
}

impl TransformStep {
    /// Create a step without options.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            options: JsonValue::Null,
        }
    }

    /// Create a step with options.
    pub fn with_options(name: &'static str, options: JsonValue) -> Self {
        Self { name, options }
    }
}

/// Chain for entry-reachable scripts.
pub fn script_chain(mode: Mode) -> Vec<TransformStep> {
    let mut chain = vec![TransformStep::with_options(
        "babel-transpile",
        json!({ "presets": ["@babel/preset-env"] }),
    )];
    if !mode.is_dev() {
        chain.push(TransformStep::with_options("minify", json!({ "parallel": true })));
    }
    chain
}

/// Chain for vendored scripts: concatenated into the vendor bundle
/// untranspiled, minified in production.
pub fn vendor_script_chain(mode: Mode) -> Vec<TransformStep> {
    if mode.is_dev() {
        vec![]
    } else {
        vec![TransformStep::with_options("minify", json!({ "parallel": true }))]
    }
}

/// Chain for stylesheets, plain or preprocessed.
///
/// Development injects compiled styles at runtime; production extracts them
/// to a file, with purge options attached when enabled.
pub fn style_chain(class: AssetClass, mode: Mode, purge: &PurgeConfig) -> Vec<TransformStep> {
    let mut chain = Vec::new();

    if class == AssetClass::Sass {
        chain.push(TransformStep::with_options(
            "sass-compile",
            json!({ "glob_imports": true }),
        ));
    }

    chain.push(TransformStep::with_options(
        "css-loader",
        json!({ "import_loaders": 1, "source_map": true }),
    ));

    if mode.is_dev() {
        chain.push(TransformStep::new("style-inject"));
    } else {
        let options = if purge.enable {
            json!({ "purge": { "only": purge.only, "safelist": purge.safelist } })
        } else {
            JsonValue::Null
        };
        chain.push(TransformStep { name: "extract-to-file", options });
    }

    chain
}

/// Chain for page templates, carrying the page's data as compile context.
pub fn template_chain(data: &JsonValue) -> Vec<TransformStep> {
    vec![TransformStep::with_options(
        "template-compile",
        json!({ "data": data }),
    )]
}

/// Chain for images, fonts and video.
///
/// `url-emit` inlines sources below the limit and emits the rest as files;
/// images additionally pass the lossless optimizer in production.
pub fn media_chain(class: AssetClass, mode: Mode, limit: u64) -> Vec<TransformStep> {
    let mut chain = Vec::new();

    if class == AssetClass::Image && !mode.is_dev() {
        chain.push(TransformStep::with_options(
            "image-optimize",
            json!({
                "gifsicle": { "interlaced": true },
                "jpegtran": { "progressive": true },
                "optipng": { "optimization_level": 5 },
                "svgo": { "preserve_view_box": true },
            }),
        ));
    }

    chain.push(TransformStep::with_options("url-emit", json!({ "limit": limit })));
    chain
}
