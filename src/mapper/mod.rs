//! Asset pipeline mapping.
//!
//! The mapper decides, for an arbitrary input file, which rule governs it,
//! the ordered transform chain for that rule, the destination the output
//! receives, whether it is inlined as a data URI, and which bundle group it
//! belongs to. It is a stateless pure function over configuration and path
//! strings: all file I/O, hashing and transform execution belong to the
//! caller.

mod chain;
mod class;
mod dest;
mod error;
mod resolve;
mod rule;

// Types
pub use chain::TransformStep;
pub use class::AssetClass;
pub use dest::DestTemplate;
pub use error::MapError;
pub use rule::{Rule, RuleSet};

// Resolution (pure functions)
pub use resolve::{AssetInput, Emit, Mapper, Resolution};
