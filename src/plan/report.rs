//! Human-readable plan summary.

use crate::core::BundleGroup;
use crate::{debug, log};

use super::BuildPlan;

/// Print a per-group summary of the plan.
pub fn print_summary(plan: &BuildPlan) {
    log!("plan"; "{} mode, entry `{}`", plan.mode.name(), plan.entry);

    let counts: Vec<String> = BundleGroup::ALL
        .iter()
        .map(|&group| {
            let mut count = plan.group_count(group);
            if group == BundleGroup::Other {
                count += plan.copies.len() + plan.generated.len();
            }
            format!("{}({})", group.name(), count)
        })
        .collect();
    log!("plan"; "{}", counts.join(" "));

    let inlined = plan.inline_count();
    if inlined > 0 {
        log!("plan"; "{} asset(s) inlined as data URIs", inlined);
    }

    for artifact in &plan.generated {
        log!("plan"; "sprite: {} ({} source(s))", artifact.destination, artifact.sources.len());
    }

    for copy in &plan.copies {
        debug!("plan"; "copy: {} -> {}", copy.from, copy.to);
    }
}
