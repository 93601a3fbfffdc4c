//! mythblog: a file-backed myth-busting blog
//!
//! Posts are Markdown files with YAML front-matter, categories a JSON
//! document. The crate provides the content store, an HTTP API with a
//! password-gated admin surface, and a small CLI around both.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{DecodeOptions, FileStorage};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (posts and categories)
    pub content_dir: std::path::PathBuf,
    /// Static files served as a fallback
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present and applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Store over the content directory, without bootstrapping it
    pub fn storage(&self) -> FileStorage {
        FileStorage::with_options(&self.content_dir, self.decode_options())
    }

    /// Store over the content directory, creating directories and default
    /// categories on first use
    pub async fn open_storage(&self) -> FileStorage {
        let store = self.storage();
        store.ensure_directories().await;
        store
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            excerpt_length: self.config.excerpt_length,
            default_category: self.config.default_category.clone(),
        }
    }

    /// Initialize a new site
    pub async fn init(&self) -> Result<()> {
        commands::init::run(self).await
    }

    /// Serve the HTTP API
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_paths_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "content_dir: data\npublic_dir: dist\nexcerpt_length: 50\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("data"));
        assert_eq!(blog.public_dir, dir.path().join("dist"));
        assert_eq!(blog.storage().posts_dir(), dir.path().join("data/posts"));
        assert_eq!(blog.decode_options().excerpt_length, 50);
    }

    #[test]
    fn test_blog_without_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("content"));
    }

    #[tokio::test]
    async fn test_blog_init_new_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("site");

        Blog::new(&target).unwrap().init().await.unwrap();

        assert!(target.join("_config.yml").is_file());
        assert!(target.join("content/categories.json").is_file());
        assert!(target.join("content/posts/welcome.md").is_file());
    }
}
