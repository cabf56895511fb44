//! Helper functions shared by the loader and the page planner

pub mod case;
pub mod url;

pub use case::{kebab_case, split_words, KeyStyle};
pub use url::{full_url, join_path, with_trailing_slash};
