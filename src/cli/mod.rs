//! Command-line interface.

pub mod args;
pub mod check;
pub mod plan;
pub mod resolve;

pub use args::{Cli, Commands, PlanArgs, ResolveArgs};
