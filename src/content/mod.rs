//! Content module - posts, categories and the file-backed store

mod category;
mod frontmatter;
mod post;
mod slug;
pub mod store;

pub use category::{default_categories, same_category, Category, CategoryPatch, NewCategory, DEFAULT_COLOR};
pub use frontmatter::FrontMatter;
pub use post::{DecodeOptions, NewPost, Post, PostPatch};
pub use slug::slugify;
pub use store::{FileStorage, StoreError};
