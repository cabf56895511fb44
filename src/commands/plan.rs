//! Build the page plan and hand it off as JSON

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::plan::SitePlan;
use crate::Site;

/// Serialize a plan, pretty-printed unless `compact`
pub fn to_json(plan: &SitePlan, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(plan)?
    } else {
        serde_json::to_string_pretty(plan)?
    };
    Ok(json)
}

/// Build the plan and print it, or write it to `output`
pub fn run(site: &Site, output: Option<&Path>, compact: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let plan = site.plan()?;
    let json = to_json(&plan, compact)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {:?}", parent))?;
            }
            fs::write(path, &json).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote plan to {:?}", path);
        }
        None => println!("{}", json),
    }

    let duration = start.elapsed();
    tracing::info!(
        "Planned {} pages in {:.2}s",
        plan.page_count(),
        duration.as_secs_f64()
    );

    Ok(())
}
