//! Configuration section definitions.

pub mod copy;
pub mod output;
pub mod pages;
pub mod purge;
pub mod rules;
pub mod source;
pub mod sprite;

pub use copy::{CopyConfig, CopyEntry};
pub use output::OutputConfig;
pub use pages::PagesConfig;
pub use purge::PurgeConfig;
pub use rules::RulesConfig;
pub use source::SourceConfig;
pub use sprite::SpriteConfig;
