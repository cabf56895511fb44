//! Site plan - every page one build produces

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    build_index_pages_with, category_keys, group_posts, paginate_groups, tag_keys, GroupPaths,
    PageDescriptor, PageKind, PlanOptions, PostGroup,
};
use crate::config::SiteConfig;
use crate::content::{sort_posts, Post};
use crate::error::PlanError;
use crate::helpers::full_url;

/// Detail page of a single post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRoute {
    pub id: String,
    pub title: String,
    pub path: String,
    pub permalink: Option<String>,
    /// Path of the next newer post
    pub newer: Option<String>,
    /// Path of the next older post
    pub older: Option<String>,
}

/// One tag or category with its post count, for overview pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub label: String,
    pub count: usize,
    /// Path of the group's first listing page
    pub path: String,
    pub permalink: Option<String>,
}

/// All pages of one build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitePlan {
    pub index: Vec<PageDescriptor>,
    pub tags: Vec<PageDescriptor>,
    pub categories: Vec<PageDescriptor>,
    pub posts: Vec<PostRoute>,
    pub tag_summary: Vec<GroupSummary>,
    pub category_summary: Vec<GroupSummary>,
}

impl SitePlan {
    /// All listing descriptors: index, then tags, then categories
    pub fn descriptors(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.index
            .iter()
            .chain(self.tags.iter())
            .chain(self.categories.iter())
    }

    /// Listing descriptors of one kind
    pub fn of_kind(&self, kind: PageKind) -> &[PageDescriptor] {
        match kind {
            PageKind::Index => &self.index,
            PageKind::Tag => &self.tags,
            PageKind::Category => &self.categories,
        }
    }

    /// Every path the renderer has to produce
    pub fn routes(&self) -> Vec<&str> {
        self.descriptors()
            .map(|d| d.path.as_str())
            .chain(self.posts.iter().map(|p| p.path.as_str()))
            .collect()
    }

    /// Number of pages in the plan
    pub fn page_count(&self) -> usize {
        self.index.len() + self.tags.len() + self.categories.len() + self.posts.len()
    }
}

/// Build the complete plan for a post collection
///
/// The posts are sorted into listing order first, so callers may pass them
/// in any order. Fails before doing any work when the page size is invalid.
pub fn build_site_plan(mut posts: Vec<Post>, config: &SiteConfig) -> Result<SitePlan, PlanError> {
    let options = PlanOptions::from_config(config)?;
    sort_posts(&mut posts);

    let permalink = |path: &str| -> Option<String> {
        if config.url.trim().is_empty() {
            None
        } else {
            Some(full_url(&config.url, path))
        }
    };

    let index = build_index_pages_with(&posts, options.page_size, &options.index_paths)?;

    let tag_groups = group_posts(&posts, tag_keys(options.key_style));
    let tags = paginate_groups(
        &tag_groups,
        PageKind::Tag,
        |key, i| options.tag_paths.page_path(key, i),
        options.page_size,
    );

    let category_groups = group_posts(&posts, category_keys(options.key_style));
    let categories = paginate_groups(
        &category_groups,
        PageKind::Category,
        |key, i| options.category_paths.page_path(key, i),
        options.page_size,
    );

    let routes = post_routes(&posts, &permalink);
    let tag_summary = summarize(&tag_groups, &options.tag_paths, &permalink);
    let category_summary = summarize(&category_groups, &options.category_paths, &permalink);

    tracing::info!(
        "Planned {} index, {} tag and {} category pages for {} posts",
        index.len(),
        tags.len(),
        categories.len(),
        routes.len()
    );

    Ok(SitePlan {
        index,
        tags,
        categories,
        posts: routes,
        tag_summary,
        category_summary,
    })
}

/// Detail routes with newer/older neighbours in listing order
fn post_routes<F>(posts: &[Post], permalink: &F) -> Vec<PostRoute>
where
    F: Fn(&str) -> Option<String>,
{
    let paths: Vec<String> = posts.iter().map(Post::path).collect();

    posts
        .iter()
        .enumerate()
        .map(|(i, post)| PostRoute {
            id: post.id.clone(),
            title: post.title.clone(),
            path: paths[i].clone(),
            permalink: permalink(&paths[i]),
            newer: i.checked_sub(1).map(|j| paths[j].clone()),
            older: paths.get(i + 1).cloned(),
        })
        .collect()
}

/// Group summaries ordered by key
fn summarize<F>(
    groups: &IndexMap<String, PostGroup<'_>>,
    paths: &GroupPaths,
    permalink: &F,
) -> Vec<GroupSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let mut summary: Vec<GroupSummary> = groups
        .iter()
        .map(|(key, group)| {
            let path = paths.page_path(key, 1);
            GroupSummary {
                key: key.clone(),
                label: group.label.clone(),
                count: group.posts.len(),
                permalink: permalink(&path),
                path,
            }
        })
        .collect();

    summary.sort_by(|a, b| a.key.cmp(&b.key));
    summary
}
