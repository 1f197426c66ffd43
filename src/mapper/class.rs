//! Asset class definitions.

use serde::Serialize;
use std::path::Path;

/// Category of an asset, determines which pipeline rule governs it.
///
/// Variants are listed in rule priority order; matching walks them
/// top-to-bottom and the first extension hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Script source (.js, .mjs) - transpiled into the entry bundle
    Script,
    /// Plain stylesheet (.css)
    Stylesheet,
    /// Preprocessed stylesheet (.scss, .sass)
    Sass,
    /// Page template (.pug) - compiled against page data
    Template,
    /// Raster/vector image
    Image,
    /// Web font
    Font,
    /// Video
    Video,
}

impl AssetClass {
    /// All classes in rule priority order.
    pub const ORDERED: [Self; 7] = [
        Self::Script,
        Self::Stylesheet,
        Self::Sass,
        Self::Template,
        Self::Image,
        Self::Font,
        Self::Video,
    ];

    /// Detect asset class from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" => Some(Self::Script),
            "css" => Some(Self::Stylesheet),
            "scss" | "sass" => Some(Self::Sass),
            "pug" => Some(Self::Template),
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "ico" => Some(Self::Image),
            "woff" | "woff2" | "eot" | "ttf" | "otf" => Some(Self::Font),
            "mp4" => Some(Self::Video),
            _ => None,
        }
    }

    /// Detect asset class from file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions for this class.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Script => &["js", "mjs"],
            Self::Stylesheet => &["css"],
            Self::Sass => &["scss", "sass"],
            Self::Template => &["pug"],
            Self::Image => &["png", "jpg", "jpeg", "gif", "svg", "ico"],
            Self::Font => &["woff", "woff2", "eot", "ttf", "otf"],
            Self::Video => &["mp4"],
        }
    }

    /// Display name for this class.
    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Sass => "sass",
            Self::Template => "template",
            Self::Image => "image",
            Self::Font => "font",
            Self::Video => "video",
        }
    }

    /// Whether outputs of this class are stylesheets.
    #[inline]
    pub const fn produces_css(self) -> bool {
        matches!(self, Self::Stylesheet | Self::Sass)
    }
}
