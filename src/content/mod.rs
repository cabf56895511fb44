//! Content module - loads posts from markdown files

mod excerpt;
mod frontmatter;
pub mod loader;
mod post;

pub use excerpt::{excerpt, plain_text};
pub use frontmatter::FrontMatter;
pub use loader::{validate_posts, ContentLoader};
pub use post::{slug_from_source, sort_posts, Post, PostSummary};
