//! Create a new post

use anyhow::Result;

use crate::content::{slugify, NewPost, Post};
use crate::Blog;

/// Options for a post created from the command line
#[derive(Debug, Clone, Default)]
pub struct NewPostOptions {
    pub category: Option<String>,
    pub slug: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
}

/// Create a post with an empty body through the content store
pub async fn create_post(blog: &Blog, title: &str, options: NewPostOptions) -> Result<Post> {
    let store = blog.open_storage().await;

    let slug = options
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(title));

    // The store overwrites on collision; the CLI refuses instead
    if store.post_by_slug(&slug).await.is_some() {
        anyhow::bail!("Post already exists: {}", slug);
    }

    let data = NewPost {
        title: title.to_string(),
        slug: Some(slug),
        content: String::new(),
        excerpt: String::new(),
        category: options
            .category
            .unwrap_or_else(|| blog.config.default_category.clone()),
        tags: options.tags,
        featured_image: None,
        published: !options.draft,
    };

    let post = store.create_post(data).await?;
    println!(
        "Created: {:?}",
        store.posts_dir().join(format!("{}.md", post.slug))
    );

    Ok(post)
}
