//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::helpers::kebab_case;

/// A blog post, as handed to the page planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique id (source path relative to the content directory)
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Last modification time of the source file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,

    /// URL-friendly name derived from the source path
    pub slug: String,

    /// Plain-text summary
    pub excerpt: String,

    /// Raw tag values, in frontmatter order
    pub tags: Vec<String>,

    /// Raw category value
    pub category: Option<String>,

    /// Opaque thumbnail reference (usually a relative image path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: DateTime<Local>) -> Self {
        let id = id.into();
        let slug = slug_from_source(&id);
        Self {
            id,
            title: title.into(),
            date,
            modified: None,
            slug,
            excerpt: String::new(),
            tags: Vec::new(),
            category: None,
            thumbnail: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Site-absolute path of the post's detail page
    pub fn path(&self) -> String {
        format!("/{}/", self.slug.trim_matches('/'))
    }

    /// Global listing order: newest first, ties broken by id
    pub fn listing_order(a: &Post, b: &Post) -> Ordering {
        b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
    }
}

/// A post as listed on index, tag and category pages
///
/// Carries the detail page path so listings can link without recomputing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub path: String,
    pub date: DateTime<Local>,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            path: post.path(),
            date: post.date,
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            category: post.category.clone(),
            thumbnail: post.thumbnail.clone(),
        }
    }
}

/// Sort posts into global listing order (date descending, id ascending)
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(Post::listing_order);
}

/// Derive a slug from a source path relative to the content directory
///
/// The extension is dropped and a trailing `index` file name resolves to its
/// directory. The remaining path is kebab-cased as a whole, so directory
/// separators become `-` like any other separator.
///
/// # Examples
/// ```ignore
/// slug_from_source("Hello World/index.md")    // -> "hello-world"
/// slug_from_source("aws/EC2 Basics/index.md") // -> "aws-ec-2-basics"
/// ```
pub fn slug_from_source(source: &str) -> String {
    let normalized = source.replace('\\', "/");
    let mut segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(last) = segments.pop() {
        let stem = match last.rsplit_once('.') {
            Some((stem, ext)) if matches!(ext, "md" | "markdown") => stem,
            _ => last,
        };
        if stem != "index" {
            segments.push(stem);
        }
    }

    kebab_case(&segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_slug_from_source() {
        assert_eq!(slug_from_source("Hello World/index.md"), "hello-world");
        assert_eq!(slug_from_source("aws/EC2 Basics/index.md"), "aws-ec-2-basics");
        assert_eq!(slug_from_source("aws/EC2 Basics.md"), "aws-ec-2-basics");
        assert_eq!(slug_from_source("terraform_recipes.markdown"), "terraform-recipes");
        assert_eq!(slug_from_source("nested\\Win Path\\index.md"), "nested-win-path");
        assert_eq!(slug_from_source("index.md"), "");
    }

    #[test]
    fn test_post_path() {
        let post = Post::new("My Post/index.md", "My Post", date(1));
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.path(), "/my-post/");
    }

    #[test]
    fn test_nested_post_path_is_flat() {
        let post = Post::new("aws/EC2 Basics/index.md", "EC2 Basics", date(1));
        assert_eq!(post.path(), "/aws-ec-2-basics/");
    }

    #[test]
    fn test_summary_shape() {
        let mut post = Post::new("My Post/index.md", "My Post", date(1)).with_tags(["aws"]);
        post.modified = Some(date(2));

        let summary = PostSummary::from(&post);
        assert_eq!(summary.path, "/my-post/");

        let value = serde_json::to_value(&summary).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["id", "title", "slug", "path", "date", "excerpt", "tags", "category"]
        );
    }

    #[test]
    fn test_sort_posts_by_date_then_id() {
        let mut posts = vec![
            Post::new("b.md", "B", date(1)),
            Post::new("c.md", "C", date(2)),
            Post::new("a.md", "A", date(1)),
        ];
        sort_posts(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c.md", "a.md", "b.md"]);
    }
}
