//! `resolve` command: map explicit paths through the rule table.

use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::ResolveArgs;
use crate::config::PipelineConfig;
use crate::log;
use crate::mapper::{Mapper, Resolution};
use crate::pages::PageStore;
use crate::plan::asset_input;
use crate::utils::path::{resolve_path, to_forward_slashes};

/// JSON shape for one resolved path.
#[derive(Serialize)]
struct ResolveOutput<'a> {
    source: String,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

pub fn run_resolve(args: &ResolveArgs, config: &PipelineConfig) -> Result<()> {
    let pages = PageStore::load(&config.pages.data_dir)?;
    let mapper = Mapper::new(config, pages);

    let mut failed = 0usize;
    for path in &args.paths {
        let abs = resolve_path(path, &config.source.root);
        let rel = abs
            .strip_prefix(&config.source.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());

        let input = match asset_input(&abs, rel.clone()) {
            Ok(input) => input,
            Err(e) => {
                log!("error"; "{e:#}");
                failed += 1;
                continue;
            }
        };

        match mapper.resolve(&input, args.mode) {
            Ok(resolution) => {
                let out = ResolveOutput {
                    source: to_forward_slashes(&rel),
                    resolution: &resolution,
                };
                let json = if args.pretty {
                    serde_json::to_string_pretty(&out)?
                } else {
                    serde_json::to_string(&out)?
                };
                println!("{json}");
            }
            Err(e) => {
                log!("error"; "{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} path(s) failed to resolve");
    }
    Ok(())
}
