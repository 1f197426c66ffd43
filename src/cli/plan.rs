//! `plan` command: scan, resolve everything, emit the plan.

use anyhow::Result;

use crate::cli::PlanArgs;
use crate::config::PipelineConfig;
use crate::log;
use crate::mapper::Mapper;
use crate::pages::PageStore;
use crate::plan::{build_plan, report};

pub fn run_plan(args: &PlanArgs, config: &PipelineConfig) -> Result<()> {
    let pages = PageStore::load(&config.pages.data_dir)?;
    let mapper = Mapper::new(config, pages);

    let plan = build_plan(config, &mapper, args.mode)?;

    if args.json || args.output.is_some() {
        let json = plan.to_json(args.pretty)?;
        match &args.output {
            Some(path) => {
                std::fs::write(path, json)?;
                log!("plan"; "wrote {}", path.display());
            }
            None => println!("{json}"),
        }
    } else {
        report::print_summary(&plan);
    }

    Ok(())
}
