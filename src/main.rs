//! packmap - asset pipeline mapper for front-end bundles.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod logger;
mod mapper;
mod pages;
mod plan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = PipelineConfig::load(cli)?;

    match &cli.command {
        Commands::Plan { args } => cli::plan::run_plan(args, &config),
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
        Commands::Check { .. } => cli::check::run_check(&config),
    }
}
