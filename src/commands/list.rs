//! List site content

use anyhow::Result;

use crate::helpers::short_date;
use crate::Blog;

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let store = blog.open_storage().await;

    match content_type {
        "post" | "posts" => {
            let posts = store.all_posts().await;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let draft = if post.published { "" } else { " (draft)" };
                println!(
                    "  {} - {} [{}]{}",
                    short_date(&post.created_at),
                    post.title,
                    post.slug,
                    draft
                );
            }
        }
        "category" | "categories" => {
            let categories = store.all_categories().await;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!(
                    "  {} [{}] ({})",
                    category.name, category.slug, category.post_count
                );
            }
        }
        "tag" | "tags" => {
            let posts = store.all_posts().await;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(())
}
