//! `check` command: validate configuration and collaborator data.

use anyhow::Result;

use crate::config::PipelineConfig;
use crate::log;
use crate::pages::PageStore;
use crate::plan::scan_sprites;

pub fn run_check(config: &PipelineConfig) -> Result<()> {
    // Reaching this point means load-time validation already passed.
    log!("check"; "config ok: {}", config.root_relative(&config.config_path).display());

    let entry = config.source.root.join(&config.source.entry);
    if entry.is_file() {
        log!("check"; "entry ok: {}", config.source.entry.display());
    } else {
        log!("warning"; "entry not found: {}", entry.display());
    }

    let pages = PageStore::load(&config.pages.data_dir)?;
    log!("check"; "page data: {} document(s)", pages.len());

    if config.sprite.enable {
        let sprites = scan_sprites(config);
        log!("check"; "sprites: {} file(s) -> {}", sprites.len(), config.sprite.output);
    }

    Ok(())
}
