//! pageplan: content indexing and paginated page planning for static blogs
//!
//! This crate scans markdown posts, groups them by tag and category, and
//! produces the ordered list of listing pages (index, tag, category) a
//! static site needs, each with its slice of posts and prev/next links.
//! Rendering those pages is left to the caller.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod plan;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::Post;
pub use error::{LoadError, PlanError};
pub use plan::{PageDescriptor, PageKind, SitePlan};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "pageplan.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub content_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `pageplan.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Load all posts from the content directory, sorted for listing
    pub fn load_posts(&self) -> std::result::Result<Vec<Post>, LoadError> {
        content::ContentLoader::new(self).load_posts()
    }

    /// Load the posts and build the full page plan
    pub fn plan(&self) -> Result<SitePlan> {
        let posts = self.load_posts()?;
        let plan = plan::build_site_plan(posts, &self.config)?;
        Ok(plan)
    }
}
