//! List site content

use anyhow::Result;

use crate::plan::{GroupSummary, SitePlan};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = site.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.id
                );
            }
        }
        "tag" | "tags" => {
            let plan = site.plan()?;
            print_summary("Tags", &plan.tag_summary);
        }
        "category" | "categories" => {
            let plan = site.plan()?;
            print_summary("Categories", &plan.category_summary);
        }
        "route" | "routes" => {
            let plan = site.plan()?;
            print_routes(&plan);
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, route",
                content_type
            );
        }
    }

    Ok(())
}

fn print_summary(heading: &str, summary: &[GroupSummary]) {
    println!("{} ({}):", heading, summary.len());
    let mut summary: Vec<_> = summary.iter().collect();
    // Most used first; the plan already breaks ties by key
    summary.sort_by(|a, b| b.count.cmp(&a.count));
    for group in summary {
        println!("  {} ({}) -> {}", group.label, group.count, group.path);
    }
}

fn print_routes(plan: &SitePlan) {
    let routes = plan.routes();
    println!("Routes ({}):", routes.len());
    for route in routes {
        println!("  {}", route);
    }
}
