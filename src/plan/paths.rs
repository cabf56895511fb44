//! Path conventions for paginated listings

use serde::{Deserialize, Serialize};

use crate::helpers::{join_path, with_trailing_slash};

/// Where page 1 of a listing lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPage {
    /// Page 1 is the bare prefix: `/tags/aws`, `/`
    #[default]
    Bare,
    /// Page 1 carries its number like every other page: `/tags/aws/1`, `/1`
    Numbered,
}

/// Builds the path of each page of one listing
///
/// Page n > 1 is always `/<prefix>/<n>`; page 1 depends on [`FirstPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConvention {
    pub prefix: String,
    pub first_page: FirstPage,
    pub trailing_slash: bool,
}

impl PathConvention {
    pub fn new(prefix: impl Into<String>, first_page: FirstPage) -> Self {
        Self {
            prefix: prefix.into(),
            first_page,
            trailing_slash: false,
        }
    }

    /// The main index: page 1 at `/`, page n at `/<n>`
    pub fn index(first_page: FirstPage) -> Self {
        Self::new("", first_page)
    }

    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Path of a 1-based page
    pub fn page_path(&self, page_index: usize) -> String {
        let path = match (page_index, self.first_page) {
            (1, FirstPage::Bare) => join_path(&[self.prefix.as_str()]),
            _ => {
                let number = page_index.to_string();
                join_path(&[self.prefix.as_str(), number.as_str()])
            }
        };

        if self.trailing_slash {
            with_trailing_slash(&path)
        } else {
            path
        }
    }
}

impl Default for PathConvention {
    fn default() -> Self {
        Self::index(FirstPage::Bare)
    }
}

/// Path conventions for every group of one kind, rooted at a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPaths {
    /// `tags` for tag listings; empty puts groups at the site root
    pub base_dir: String,
    pub first_page: FirstPage,
    pub trailing_slash: bool,
}

impl GroupPaths {
    pub fn new(base_dir: impl Into<String>, first_page: FirstPage) -> Self {
        Self {
            base_dir: base_dir.into(),
            first_page,
            trailing_slash: false,
        }
    }

    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Convention for one group key
    pub fn for_key(&self, key: &str) -> PathConvention {
        let prefix = join_path(&[self.base_dir.as_str(), key]);
        PathConvention::new(prefix, self.first_page).with_trailing_slash(self.trailing_slash)
    }

    /// Path of a 1-based page of one group
    pub fn page_path(&self, key: &str, page_index: usize) -> String {
        self.for_key(key).page_path(page_index)
    }
}
