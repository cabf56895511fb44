//! Site configuration (pageplan.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PlanError;
use crate::helpers::KeyStyle;
use crate::plan::FirstPage;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    /// Absolute site URL; permalinks are omitted when empty
    pub url: String,

    // Content
    pub content_dir: String,
    /// Glob patterns, relative to `content_dir`, of files to skip
    #[serde(default)]
    pub exclude: Vec<String>,
    pub include_drafts: bool,
    /// Characters kept in generated excerpts; 0 leaves them empty
    pub excerpt_length: usize,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub grouping: GroupingConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),
            url: String::new(),

            content_dir: "src/pages".to_string(),
            exclude: Vec::new(),
            include_drafts: false,
            excerpt_length: 140,

            pagination: PaginationConfig::default(),
            grouping: GroupingConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Validated number of posts per listing page
    pub fn page_size(&self) -> Result<usize, PlanError> {
        self.pagination.page_size()
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Posts per listing page; must be at least 1
    pub page_length: i64,
    /// Path of page 1 of the main index
    pub index_first_page: FirstPage,
    /// Path of page 1 of each tag and category listing
    pub group_first_page: FirstPage,
    /// Append `/` to listing paths
    pub trailing_slash: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_length: 6,
            index_first_page: FirstPage::Bare,
            group_first_page: FirstPage::Bare,
            trailing_slash: false,
        }
    }
}

impl PaginationConfig {
    /// Validated number of posts per listing page
    pub fn page_size(&self) -> Result<usize, PlanError> {
        usize::try_from(self.page_length)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| PlanError::page_size(self.page_length))
    }
}

/// Tag and category grouping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub key_style: KeyStyle,
    pub tag_dir: String,
    /// Empty puts category listings at the site root
    pub category_dir: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            key_style: KeyStyle::Kebab,
            tag_dir: "tags".to_string(),
            category_dir: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "src/pages");
        assert_eq!(config.pagination.page_length, 6);
        assert_eq!(config.page_size(), Ok(6));
        assert_eq!(config.grouping.tag_dir, "tags");
        assert_eq!(config.grouping.key_style, KeyStyle::Kebab);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Hands-On Cloud
url: https://example.com
pagination:
  page_length: 10
  group_first_page: numbered
grouping:
  key_style: kebab_preserve_case
  category_dir: categories
exclude:
  - "drafts/**"
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Hands-On Cloud");
        assert_eq!(config.page_size(), Ok(10));
        assert_eq!(config.pagination.group_first_page, FirstPage::Numbered);
        assert_eq!(config.pagination.index_first_page, FirstPage::Bare);
        assert_eq!(config.grouping.key_style, KeyStyle::KebabPreserveCase);
        assert_eq!(config.grouping.category_dir, "categories");
        assert_eq!(config.grouping.tag_dir, "tags");
        assert_eq!(config.exclude, vec!["drafts/**"]);
    }

    #[test]
    fn test_non_positive_page_length_is_invalid() {
        let mut config = SiteConfig::default();
        config.pagination.page_length = 0;
        assert!(matches!(
            config.page_size(),
            Err(PlanError::InvalidConfig(_))
        ));

        config.pagination.page_length = -3;
        assert!(matches!(
            config.page_size(),
            Err(PlanError::InvalidConfig(_))
        ));
    }
}
