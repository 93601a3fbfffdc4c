//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::NewPost;
use crate::Blog;

const DEFAULT_CONFIG: &str = r#"# Blog Configuration

# Site
title: YBYMythBust
description: Busting myths with evidence
url: http://localhost:5000

# Directory
content_dir: content
public_dir: public

# Writing
excerpt_length: 200
default_category: uncategorized

# Admin (ADMIN_PASSWORD in the environment takes precedence)
admin_password: admin123

# Server (PORT in the environment takes precedence)
server:
  ip: 0.0.0.0
  port: 5000
"#;

const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

/// Initialize a new blog in the given directory
///
/// Existing configuration and content are left alone.
pub async fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let blog = Blog::new(target_dir)?;

    fs::create_dir_all(&blog.public_dir)?;
    let robots_path = blog.public_dir.join("robots.txt");
    if !robots_path.exists() {
        fs::write(&robots_path, ROBOTS_TXT)?;
    }

    let store = blog.open_storage().await;
    if store.all_posts().await.is_empty() {
        store.create_post(sample_post()).await?;
    }

    Ok(())
}

fn sample_post() -> NewPost {
    NewPost {
        title: "Welcome to the Myth Busters".to_string(),
        slug: Some("welcome".to_string()),
        content: r#"Welcome! This is your very first post.

## Writing posts

Posts are Markdown files with YAML front-matter under `content/posts`.
Create one from the command line:

```bash
$ mythblog new "Do We Really Use Only 10% of Our Brains?" --category "Science Myths"
```

or through the admin API with your admin password.

## Run the server

```bash
$ mythblog server
```
"#
        .to_string(),
        excerpt: "Your first post: how content is stored and how to publish more.".to_string(),
        category: "Science Myths".to_string(),
        tags: vec!["welcome".to_string()],
        featured_image: None,
        published: true,
    }
}

/// Run the init command with an existing Blog instance
pub async fn run(blog: &Blog) -> Result<()> {
    init_site(&blog.base_dir).await
}
