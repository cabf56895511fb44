//! Content loader - loads posts from the content directory

use chrono::Local;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{excerpt, sort_posts, FrontMatter, Post};
use crate::error::LoadError;
use crate::Site;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all posts, validated and sorted newest first
    pub fn load_posts(&self) -> Result<Vec<Post>, LoadError> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let excludes = self.exclude_patterns()?;
        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let source = relative_source(content_dir, path);
            if excludes.iter().any(|p| p.matches(&source)) {
                tracing::debug!("Excluded: {}", source);
                continue;
            }

            match self.load_post(path, &source) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping unpublished post: {}", source),
                Err(e) => tracing::warn!("Failed to load post {}: {}", source, e),
            }
        }

        validate_posts(&posts)?;
        sort_posts(&mut posts);

        tracing::info!("Loaded {} posts from {:?}", posts.len(), content_dir);
        Ok(posts)
    }

    /// Load a single post; `None` for unpublished posts
    fn load_post(&self, path: &Path, source: &str) -> Result<Option<Post>, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| LoadError::Frontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if !fm.published && !self.site.config.include_drafts {
            return Ok(None);
        }

        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .or(modified)
            .unwrap_or_else(Local::now);

        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback_title(path));

        let excerpt = match fm.excerpt.as_deref().map(str::trim) {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => excerpt(body, self.site.config.excerpt_length),
        };

        let mut post = Post::new(source, title, date);
        post.modified = modified;
        post.excerpt = excerpt;
        post.category = fm.category();
        post.tags = dedup_tags(fm.tags);
        post.thumbnail = fm.thumbnail;

        Ok(Some(post))
    }

    fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, LoadError> {
        self.site
            .config
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| LoadError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// Reject post collections with repeated ids or slugs
pub fn validate_posts(posts: &[Post]) -> Result<(), LoadError> {
    let mut ids = HashSet::new();
    let mut slugs: HashMap<&str, &str> = HashMap::new();

    for post in posts {
        if !ids.insert(post.id.as_str()) {
            return Err(LoadError::DuplicateId(post.id.clone()));
        }
        if let Some(first) = slugs.insert(post.slug.as_str(), post.id.as_str()) {
            return Err(LoadError::DuplicateSlug {
                slug: post.slug.clone(),
                first: first.to_string(),
                second: post.id.clone(),
            });
        }
    }

    Ok(())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Source path relative to the content directory, `/`-separated
fn relative_source(content_dir: &Path, path: &Path) -> String {
    path.strip_prefix(content_dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Title from the file name, or the directory name for `index.md`
fn fallback_title(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled");
    if stem != "index" {
        return stem.to_string();
    }

    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

/// Trim tags and drop blanks and repeats, keeping first-seen order
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}
