//! Page planner - decides which listing pages exist and what each contains
//!
//! Posts are expected in listing order (see [`crate::content::sort_posts`]).
//! Every builder here is a pure function: the same posts and options always
//! produce the same descriptors in the same order.

mod paths;
mod site;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};
use crate::error::PlanError;
use crate::helpers::KeyStyle;

pub use paths::{FirstPage, GroupPaths, PathConvention};
pub use site::{build_site_plan, GroupSummary, PostRoute, SitePlan};

/// Kind of listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Index,
    Tag,
    Category,
}

/// One paginated listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub kind: PageKind,
    /// Normalized group key; `None` for index pages
    pub group_key: Option<String>,
    /// First raw spelling seen for the group key
    pub group_label: Option<String>,
    /// 1-based page number within the listing
    pub page_index: usize,
    pub page_count: usize,
    pub posts: Vec<PostSummary>,
    pub is_first: bool,
    pub is_last: bool,
    pub path: String,
    pub prev_path: Option<String>,
    pub next_path: Option<String>,
}

/// A normalized group key with its display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    pub key: String,
    pub label: String,
}

impl GroupKey {
    /// Normalize a raw tag or category value; `None` if nothing remains
    pub fn new(raw: &str, style: KeyStyle) -> Option<Self> {
        let label = raw.trim();
        if label.is_empty() {
            return None;
        }

        let key = style.normalize(label);
        if key.is_empty() {
            tracing::debug!("Ignoring group value {:?} with empty key", raw);
            return None;
        }

        Some(Self {
            key,
            label: label.to_string(),
        })
    }
}

/// Posts sharing one group key, in listing order
#[derive(Debug, Clone)]
pub struct PostGroup<'a> {
    pub label: String,
    pub posts: Vec<&'a Post>,
}

/// Key extractor for tags (zero or more keys per post)
pub fn tag_keys(style: KeyStyle) -> impl Fn(&Post) -> Vec<GroupKey> {
    move |post: &Post| {
        post.tags
            .iter()
            .filter_map(|t| GroupKey::new(t, style))
            .collect()
    }
}

/// Key extractor for categories (zero or one key per post)
pub fn category_keys(style: KeyStyle) -> impl Fn(&Post) -> Vec<GroupKey> {
    move |post: &Post| {
        post.category
            .as_deref()
            .and_then(|c| GroupKey::new(c, style))
            .into_iter()
            .collect()
    }
}

/// Everything the builders need, resolved from [`SiteConfig`]
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub page_size: usize,
    pub key_style: KeyStyle,
    pub index_paths: PathConvention,
    pub tag_paths: GroupPaths,
    pub category_paths: GroupPaths,
}

impl PlanOptions {
    /// Resolve and validate options; fails on a non-positive page length
    pub fn from_config(config: &SiteConfig) -> Result<Self, PlanError> {
        let pagination = &config.pagination;
        let grouping = &config.grouping;

        Ok(Self {
            page_size: pagination.page_size()?,
            key_style: grouping.key_style,
            index_paths: PathConvention::index(pagination.index_first_page)
                .with_trailing_slash(pagination.trailing_slash),
            tag_paths: GroupPaths::new(&grouping.tag_dir, pagination.group_first_page)
                .with_trailing_slash(pagination.trailing_slash),
            category_paths: GroupPaths::new(&grouping.category_dir, pagination.group_first_page)
                .with_trailing_slash(pagination.trailing_slash),
        })
    }
}

fn check_page_size(page_size: usize) -> Result<(), PlanError> {
    if page_size == 0 {
        return Err(PlanError::page_size(0));
    }
    Ok(())
}

/// Split one listing into pages of at most `page_size` posts
fn paginate<F>(
    posts: &[&Post],
    kind: PageKind,
    group: Option<(&str, &str)>,
    page_size: usize,
    path_fn: F,
) -> Vec<PageDescriptor>
where
    F: Fn(usize) -> String,
{
    let page_count = posts.len().div_ceil(page_size);

    posts
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| {
            let page_index = i + 1;
            PageDescriptor {
                kind,
                group_key: group.map(|(key, _)| key.to_string()),
                group_label: group.map(|(_, label)| label.to_string()),
                page_index,
                page_count,
                posts: chunk.iter().map(|p| PostSummary::from(*p)).collect(),
                is_first: page_index == 1,
                is_last: page_index == page_count,
                path: path_fn(page_index),
                prev_path: (page_index > 1).then(|| path_fn(page_index - 1)),
                next_path: (page_index < page_count).then(|| path_fn(page_index + 1)),
            }
        })
        .collect()
}

/// Build the main index pages: page 1 at `/`, page n at `/<n>`
///
/// An empty collection yields no pages at all.
pub fn build_index_pages(posts: &[Post], page_size: usize) -> Result<Vec<PageDescriptor>, PlanError> {
    build_index_pages_with(posts, page_size, &PathConvention::default())
}

/// Build the main index pages with an explicit path convention
pub fn build_index_pages_with(
    posts: &[Post],
    page_size: usize,
    paths: &PathConvention,
) -> Result<Vec<PageDescriptor>, PlanError> {
    check_page_size(page_size)?;

    let all: Vec<&Post> = posts.iter().collect();
    let pages = paginate(&all, PageKind::Index, None, page_size, |i| paths.page_path(i));

    tracing::debug!("Planned {} index pages", pages.len());
    Ok(pages)
}

/// Group posts by key, in first-seen key order
///
/// A post listing the same key more than once appears in that group once.
/// Posts without keys belong to no group.
pub fn group_posts<'a, K>(posts: &'a [Post], key_extractor: K) -> IndexMap<String, PostGroup<'a>>
where
    K: Fn(&Post) -> Vec<GroupKey>,
{
    posts.iter().fold(IndexMap::new(), |mut groups, post| {
        let mut seen = HashSet::new();
        for GroupKey { key, label } in key_extractor(post) {
            if !seen.insert(key.clone()) {
                continue;
            }
            groups
                .entry(key)
                .or_insert_with(|| PostGroup {
                    label,
                    posts: Vec::new(),
                })
                .posts
                .push(post);
        }
        groups
    })
}

/// Paginate already-grouped posts
pub(crate) fn paginate_groups<P>(
    groups: &IndexMap<String, PostGroup<'_>>,
    kind: PageKind,
    path_fn: P,
    page_size: usize,
) -> Vec<PageDescriptor>
where
    P: Fn(&str, usize) -> String,
{
    groups
        .iter()
        .flat_map(|(key, group)| {
            let pages = paginate(
                &group.posts,
                kind,
                Some((key.as_str(), group.label.as_str())),
                page_size,
                |i| path_fn(key.as_str(), i),
            );
            tracing::debug!("Planned {} {:?} pages for '{}'", pages.len(), kind, key);
            pages
        })
        .collect()
}

/// Build paginated listings for every group key found in `posts`
///
/// `key_extractor` yields the keys of one post and `path_fn` maps a key and
/// a 1-based page number to a path.
pub fn build_grouped_pages<K, P>(
    posts: &[Post],
    kind: PageKind,
    key_extractor: K,
    path_fn: P,
    page_size: usize,
) -> Result<Vec<PageDescriptor>, PlanError>
where
    K: Fn(&Post) -> Vec<GroupKey>,
    P: Fn(&str, usize) -> String,
{
    check_page_size(page_size)?;

    let groups = group_posts(posts, key_extractor);
    Ok(paginate_groups(&groups, kind, path_fn, page_size))
}

/// Build tag listings with the configured key style and paths
pub fn build_tag_pages(
    posts: &[Post],
    options: &PlanOptions,
) -> Result<Vec<PageDescriptor>, PlanError> {
    build_grouped_pages(
        posts,
        PageKind::Tag,
        tag_keys(options.key_style),
        |key, i| options.tag_paths.page_path(key, i),
        options.page_size,
    )
}

/// Build category listings with the configured key style and paths
pub fn build_category_pages(
    posts: &[Post],
    options: &PlanOptions,
) -> Result<Vec<PageDescriptor>, PlanError> {
    build_grouped_pages(
        posts,
        PageKind::Category,
        category_keys(options.key_style),
        |key, i| options.category_paths.page_path(key, i),
        options.page_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sort_posts;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn day(n: i64) -> DateTime<Local> {
        Local.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    fn post(id: &str, days: i64, tags: &[&str]) -> Post {
        Post::new(format!("{}.md", id), id.to_uppercase(), day(days)).with_tags(tags.iter().copied())
    }

    fn ids(page: &PageDescriptor) -> Vec<&str> {
        page.posts.iter().map(|p| p.id.as_str()).collect()
    }

    fn tag_paths(key: &str, i: usize) -> String {
        GroupPaths::new("tags", FirstPage::Bare).page_path(key, i)
    }

    #[test]
    fn test_grouped_example() {
        let posts = vec![
            post("p1", 3, &["a", "b"]),
            post("p2", 2, &["a"]),
            post("p3", 1, &["b"]),
        ];

        let pages = build_grouped_pages(
            &posts,
            PageKind::Tag,
            tag_keys(KeyStyle::Kebab),
            tag_paths,
            2,
        )
        .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].group_key.as_deref(), Some("a"));
        assert_eq!(ids(&pages[0]), vec!["p1.md", "p2.md"]);
        assert!(pages[0].is_first && pages[0].is_last);
        assert_eq!(pages[0].path, "/tags/a");
        assert_eq!(pages[1].group_key.as_deref(), Some("b"));
        assert_eq!(ids(&pages[1]), vec!["p1.md", "p3.md"]);
        assert!(pages[1].is_first && pages[1].is_last);
    }

    #[test]
    fn test_index_seven_posts_page_size_six() {
        let mut posts: Vec<Post> = (0..7).map(|i| post(&format!("p{}", i), i, &[])).collect();
        sort_posts(&mut posts);

        let pages = build_index_pages(&posts, 6).unwrap();
        assert_eq!(pages.len(), 2);

        assert_eq!(pages[0].posts.len(), 6);
        assert_eq!(pages[0].path, "/");
        assert!(pages[0].is_first);
        assert!(!pages[0].is_last);
        assert_eq!(pages[0].prev_path, None);
        assert_eq!(pages[0].next_path.as_deref(), Some("/2"));

        assert_eq!(pages[1].posts.len(), 1);
        assert_eq!(pages[1].path, "/2");
        assert!(!pages[1].is_first);
        assert!(pages[1].is_last);
        assert_eq!(pages[1].prev_path.as_deref(), Some("/"));
        assert_eq!(pages[1].next_path, None);
        assert_eq!(pages[1].page_count, 2);
        assert_eq!(pages[1].posts[0].id, "p0.md");
    }

    #[test]
    fn test_empty_collection_has_no_index_pages() {
        assert!(build_index_pages(&[], 6).unwrap().is_empty());
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let posts = vec![post("p1", 1, &["a"])];
        assert!(matches!(
            build_index_pages(&posts, 0),
            Err(PlanError::InvalidConfig(_))
        ));
        assert!(matches!(
            build_grouped_pages(&posts, PageKind::Tag, tag_keys(KeyStyle::Kebab), tag_paths, 0),
            Err(PlanError::InvalidConfig(_))
        ));
        // Rejected even when there is nothing to paginate
        assert!(build_index_pages(&[], 0).is_err());
    }

    #[test]
    fn test_no_keys_no_pages() {
        let posts = vec![post("p1", 2, &[]), post("p2", 1, &[])];
        let pages = build_grouped_pages(
            &posts,
            PageKind::Category,
            category_keys(KeyStyle::Kebab),
            tag_paths,
            3,
        )
        .unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_keys_are_normalized_and_labels_kept() {
        let posts = vec![
            post("p1", 3, &["Cloud Functions"]),
            post("p2", 2, &["cloud-functions", "cloud functions"]),
            post("p3", 1, &["  ", "!!"]),
        ];
        let pages = build_grouped_pages(
            &posts,
            PageKind::Tag,
            tag_keys(KeyStyle::Kebab),
            tag_paths,
            10,
        )
        .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].group_key.as_deref(), Some("cloud-functions"));
        assert_eq!(pages[0].group_label.as_deref(), Some("Cloud Functions"));
        assert_eq!(ids(&pages[0]), vec!["p1.md", "p2.md"]);
    }

    #[test]
    fn test_preserve_case_splits_groups() {
        let posts = vec![post("p1", 2, &["AWS"]), post("p2", 1, &["aws"])];
        let pages = build_grouped_pages(
            &posts,
            PageKind::Tag,
            tag_keys(KeyStyle::KebabPreserveCase),
            tag_paths,
            10,
        )
        .unwrap();
        let keys: Vec<_> = pages.iter().filter_map(|p| p.group_key.as_deref()).collect();
        assert_eq!(keys, vec!["AWS", "aws"]);
    }

    #[test]
    fn test_group_key_order_is_first_seen() {
        let posts = vec![
            post("p1", 3, &["zeta"]),
            post("p2", 2, &["alpha", "zeta"]),
            post("p3", 1, &["mid"]),
        ];
        let groups = group_posts(&posts, tag_keys(KeyStyle::Kebab));
        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_category_pages_from_config() {
        let mut config = SiteConfig::default();
        config.pagination.page_length = 1;
        config.pagination.group_first_page = FirstPage::Numbered;
        config.grouping.category_dir = "category".to_string();
        let options = PlanOptions::from_config(&config).unwrap();

        let posts = vec![
            post("p1", 2, &[]).with_category("DevOps"),
            post("p2", 1, &[]).with_category("Dev Ops"),
        ];
        let pages = build_category_pages(&posts, &options).unwrap();
        let paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/category/dev-ops/1", "/category/dev-ops/2"]);
        assert_eq!(pages[1].prev_path.as_deref(), Some("/category/dev-ops/1"));
    }

    #[test]
    fn test_tag_pages_from_default_config() {
        let options = PlanOptions::from_config(&SiteConfig::default()).unwrap();
        let posts = vec![post("p1", 1, &["Terraform"])];
        let pages = build_tag_pages(&posts, &options).unwrap();
        assert_eq!(pages[0].path, "/tags/terraform");
        assert_eq!(pages[0].kind, PageKind::Tag);
    }

    const TAG_POOL: &[&str] = &["aws", "GCP", "gcp", "Machine Learning", "terraform", ""];

    fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
        prop::collection::vec(
            (
                0i64..20,
                prop::collection::vec(prop::sample::select(TAG_POOL), 0..4),
                prop::option::of(prop::sample::select(&["AWS", "GCP", "Other"][..])),
            ),
            0..40,
        )
        .prop_map(|specs| {
            let mut posts: Vec<Post> = specs
                .into_iter()
                .enumerate()
                .map(|(i, (days, tags, category))| {
                    let mut p = post(&format!("p{:03}", i), days, &tags);
                    p.category = category.map(str::to_string);
                    p
                })
                .collect();
            sort_posts(&mut posts);
            posts
        })
    }

    fn check_chunking(pages: &[PageDescriptor], page_size: usize) {
        let mut by_group: IndexMap<Option<String>, Vec<&PageDescriptor>> = IndexMap::new();
        for page in pages {
            by_group.entry(page.group_key.clone()).or_default().push(page);
        }

        for (_, group) in by_group {
            assert_eq!(group.iter().filter(|p| p.is_first).count(), 1);
            assert_eq!(group.iter().filter(|p| p.is_last).count(), 1);
            for (i, page) in group.iter().enumerate() {
                assert_eq!(page.page_index, i + 1);
                assert_eq!(page.page_count, group.len());
                assert!(!page.posts.is_empty());
                assert!(page.posts.len() <= page_size);
                if !page.is_last {
                    assert_eq!(page.posts.len(), page_size);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn index_pages_reproduce_collection(posts in arb_posts(), page_size in 1usize..8) {
            let pages = build_index_pages(&posts, page_size).unwrap();
            let flattened: Vec<&str> = pages
                .iter()
                .flat_map(|p| p.posts.iter().map(|s| s.id.as_str()))
                .collect();
            let expected: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
            prop_assert_eq!(flattened, expected);
            check_chunking(&pages, page_size);
        }

        #[test]
        fn grouped_pages_preserve_order(posts in arb_posts(), page_size in 1usize..8) {
            let pages = build_grouped_pages(
                &posts,
                PageKind::Tag,
                tag_keys(KeyStyle::Kebab),
                tag_paths,
                page_size,
            ).unwrap();
            check_chunking(&pages, page_size);

            let mut per_key: HashMap<String, Vec<String>> = HashMap::new();
            for page in &pages {
                let key = page.group_key.clone().unwrap();
                per_key.entry(key).or_default().extend(page.posts.iter().map(|p| p.id.clone()));
            }
            for (key, listed) in per_key {
                let expected: Vec<String> = posts
                    .iter()
                    .filter(|p| p.tags.iter().any(|t| KeyStyle::Kebab.normalize(t) == key))
                    .map(|p| p.id.clone())
                    .collect();
                prop_assert_eq!(listed, expected);
            }

            let mut seen = HashSet::new();
            for page in &pages {
                prop_assert!(seen.insert((page.group_key.clone(), page.page_index)));
            }
        }

        #[test]
        fn grouped_pages_are_deterministic(posts in arb_posts(), page_size in 1usize..8) {
            let first = build_grouped_pages(
                &posts, PageKind::Category, category_keys(KeyStyle::Kebab), tag_paths, page_size,
            ).unwrap();
            let second = build_grouped_pages(
                &posts, PageKind::Category, category_keys(KeyStyle::Kebab), tag_paths, page_size,
            ).unwrap();
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }
}
