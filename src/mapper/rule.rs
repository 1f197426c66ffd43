//! The pipeline rule table.
//!
//! An ordered sequence of immutable rules built once at configuration-load
//! time and evaluated top-to-bottom, first match wins. A rule matches when
//! its class owns the input's extension and no exclusion marker appears in
//! the input's path.

use std::path::{Component, Path};

use crate::config::PipelineConfig;

use super::{AssetClass, DestTemplate};

/// A single pipeline rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Asset category this rule governs.
    pub class: AssetClass,
    /// Path components that disqualify an input (e.g. `node_modules`).
    pub exclude: Vec<String>,
    /// Destination template for matched outputs.
    pub destination: DestTemplate,
    /// Inputs strictly below this byte size are inlined. `None` disables
    /// inlining for the class.
    pub inline_limit: Option<u64>,
}

impl Rule {
    /// Check whether an exclusion marker appears in the path.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        path.components().any(|comp| match comp {
            Component::Normal(os) => os
                .to_str()
                .is_some_and(|s| self.exclude.iter().any(|marker| marker == s)),
            _ => false,
        })
    }

    /// Full match test: extension owned by this class, not excluded.
    pub fn matches(&self, path: &Path) -> bool {
        AssetClass::from_path(path) == Some(self.class) && !self.is_excluded(path)
    }
}

/// The fixed, ordered rule table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build the rule table from configuration.
    ///
    /// Rules appear in declared priority order: scripts, plain stylesheets,
    /// preprocessed stylesheets, templates, images, fonts, video.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let rules = &config.rules;

        let sprite_exclude = if config.sprite.enable {
            vec![config.sprite.marker().to_string()]
        } else {
            vec![]
        };

        let table = AssetClass::ORDERED
            .into_iter()
            .map(|class| match class {
                AssetClass::Script => Rule {
                    class,
                    exclude: vec![rules.vendor_marker.clone()],
                    destination: DestTemplate::new(&rules.script_dest),
                    inline_limit: None,
                },
                AssetClass::Stylesheet | AssetClass::Sass => Rule {
                    class,
                    exclude: vec![],
                    destination: DestTemplate::new(&rules.style_dest),
                    inline_limit: None,
                },
                AssetClass::Template => Rule {
                    class,
                    exclude: vec![],
                    destination: DestTemplate::new(&rules.template_dest),
                    inline_limit: None,
                },
                AssetClass::Image => Rule {
                    class,
                    exclude: sprite_exclude.clone(),
                    destination: DestTemplate::new(&rules.image_dest),
                    inline_limit: Some(rules.image_inline_limit),
                },
                AssetClass::Font => Rule {
                    class,
                    exclude: vec![],
                    destination: DestTemplate::new(&rules.font_dest),
                    inline_limit: Some(rules.font_inline_limit),
                },
                AssetClass::Video => Rule {
                    class,
                    exclude: vec![],
                    destination: DestTemplate::new(&rules.video_dest),
                    inline_limit: Some(rules.video_inline_limit),
                },
            })
            .collect();

        Self { rules: table }
    }

    /// First rule matching the path, in priority order.
    pub fn matched(&self, path: &Path) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Iterate rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    fn rule_set() -> RuleSet {
        RuleSet::from_config(&test_parse_config(""))
    }

    #[test]
    fn test_every_recognized_extension_matches_exactly_one_rule() {
        let rules = rule_set();
        for class in AssetClass::ORDERED {
            for ext in class.extensions() {
                let path = PathBuf::from(format!("anything/file.{ext}"));
                let hits: Vec<_> = rules.iter().filter(|r| r.matches(&path)).collect();
                assert_eq!(hits.len(), 1, "extension {ext} matched {} rules", hits.len());
                assert_eq!(hits[0].class, class);
            }
        }
    }

    #[test]
    fn test_unrecognized_extension_matches_nothing() {
        let rules = rule_set();
        assert!(rules.matched(&PathBuf::from("notes.txt")).is_none());
        assert!(rules.matched(&PathBuf::from("Makefile")).is_none());
    }

    #[test]
    fn test_script_rule_excludes_vendor_dir() {
        let rules = rule_set();
        assert!(rules.matched(&PathBuf::from("scripts/app.js")).is_some());
        assert!(
            rules
                .matched(&PathBuf::from("node_modules/lodash/index.js"))
                .is_none()
        );
    }

    #[test]
    fn test_image_rule_excludes_sprite_dir() {
        let rules = rule_set();
        assert!(rules.matched(&PathBuf::from("assets/images/logo.svg")).is_some());
        assert!(rules.matched(&PathBuf::from("sprites/arrow.svg")).is_none());
    }

    #[test]
    fn test_sprite_exclusion_disabled() {
        let config = test_parse_config("[sprite]\nenable = false");
        let rules = RuleSet::from_config(&config);
        assert!(rules.matched(&PathBuf::from("sprites/arrow.svg")).is_some());
    }

    #[test]
    fn test_custom_vendor_marker() {
        let config = test_parse_config("[rules]\nvendor_marker = \"third_party\"");
        let rules = RuleSet::from_config(&config);
        assert!(
            rules
                .matched(&PathBuf::from("third_party/lib/index.js"))
                .is_none()
        );
        assert!(
            rules
                .matched(&PathBuf::from("node_modules/lib/index.js"))
                .is_some()
        );
    }

    #[test]
    fn test_marker_matches_whole_component_only() {
        let rules = rule_set();
        // "node_modules_backup" is not the vendor directory
        assert!(
            rules
                .matched(&PathBuf::from("node_modules_backup/app.js"))
                .is_some()
        );
    }

    #[test]
    fn test_inline_limits_from_config() {
        let config = test_parse_config("[rules]\nimage_inline_limit = 1234");
        let rules = RuleSet::from_config(&config);
        let image = rules.matched(&PathBuf::from("logo.png")).unwrap();
        assert_eq!(image.inline_limit, Some(1234));
        let script = rules.matched(&PathBuf::from("app.js")).unwrap();
        assert_eq!(script.inline_limit, None);
    }
}
