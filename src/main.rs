//! CLI entry point for pageplan

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pageplan")]
#[command(version)]
#[command(about = "Plan the paginated listing pages of a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the page plan and print it as JSON
    #[command(alias = "p")]
    Plan {
        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,

        /// Override the configured number of posts per page
        #[arg(long, allow_negative_numbers = true)]
        page_length: Option<i64>,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag, category, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pageplan=debug,info"
    } else {
        "pageplan=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Plan {
            output,
            compact,
            page_length,
        } => {
            let mut site = pageplan::Site::new(&base_dir)?;
            if let Some(page_length) = page_length {
                site.config.pagination.page_length = page_length;
            }
            tracing::info!("Planning pages for {:?}", site.content_dir);
            pageplan::commands::plan::run(&site, output.as_deref(), compact)?;
        }

        Commands::List { r#type } => {
            let site = pageplan::Site::new(&base_dir)?;
            pageplan::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("pageplan version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
