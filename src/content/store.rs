//! File-backed content store
//!
//! Posts live as `<slug>.md` files under `<content_dir>/posts`, categories as
//! a single JSON array in `<content_dir>/categories.json`. Every mutation is a
//! whole-file read-modify-write with no locking, so the store assumes a single
//! writer.

use std::cmp::Reverse;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

use super::{
    default_categories, slugify, Category, CategoryPatch, DecodeOptions, NewCategory, NewPost,
    Post, PostPatch,
};
use crate::helpers::{now_iso, parse_timestamp};

/// Errors raised by store mutations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid categories document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Owns the posts directory and the categories file
#[derive(Debug, Clone)]
pub struct FileStorage {
    content_dir: PathBuf,
    posts_dir: PathBuf,
    categories_file: PathBuf,
    options: DecodeOptions,
}

impl FileStorage {
    /// Create a store rooted at `content_dir` without touching the disk
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self::with_options(content_dir, DecodeOptions::default())
    }

    /// Create a store with custom decode defaults
    pub fn with_options<P: AsRef<Path>>(content_dir: P, options: DecodeOptions) -> Self {
        let content_dir = content_dir.as_ref().to_path_buf();
        Self {
            posts_dir: content_dir.join("posts"),
            categories_file: content_dir.join("categories.json"),
            content_dir,
            options,
        }
    }

    /// Create a store and bootstrap its directories
    pub async fn open<P: AsRef<Path>>(content_dir: P) -> Self {
        let store = Self::new(content_dir);
        store.ensure_directories().await;
        store
    }

    /// Content root
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Directory holding the post files
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Path of the categories document
    pub fn categories_file(&self) -> &Path {
        &self.categories_file
    }

    /// Create the content directories and seed the default categories
    ///
    /// Failures are logged; the store stays usable and later calls report
    /// their own errors.
    pub async fn ensure_directories(&self) {
        if let Err(e) = self.bootstrap().await {
            tracing::error!("Error ensuring content directories: {}", e);
        }
    }

    async fn bootstrap(&self) -> Result<()> {
        fs::create_dir_all(&self.posts_dir).await?;

        if !fs::try_exists(&self.categories_file).await? {
            self.write_categories(&default_categories()).await?;
            tracing::info!("Seeded default categories in {:?}", self.categories_file);
        }

        Ok(())
    }

    // ----- Posts -----

    /// Every post on disk, newest first
    ///
    /// Files that cannot be read or decoded are logged and skipped.
    pub async fn all_posts(&self) -> Vec<Post> {
        let entries = match fs::read_dir(&self.posts_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error reading posts directory {:?}: {}", self.posts_dir, e);
                return Vec::new();
            }
        };

        let mut files = ReadDirStream::new(entries)
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|path| is_markdown_file(path));

        let mut posts = Vec::new();
        while let Some(path) = files.next().await {
            match self.read_post(&path).await {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        // Unparseable timestamps sort last
        posts.sort_by_cached_key(|post| Reverse(parse_timestamp(&post.created_at)));
        posts
    }

    /// Posts visible to readers, newest first
    pub async fn published_posts(&self) -> Vec<Post> {
        self.all_posts()
            .await
            .into_iter()
            .filter(|post| post.published)
            .collect()
    }

    /// Look a post up by its file name
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        let path = self.post_path(slug).ok()?;
        match self.read_post(&path).await {
            Ok(post) => Some(post),
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", path, e);
                None
            }
        }
    }

    /// Published posts whose category matches `name` case-insensitively
    pub async fn posts_by_category(&self, name: &str) -> Vec<Post> {
        self.published_posts()
            .await
            .into_iter()
            .filter(|post| post.in_category(name))
            .collect()
    }

    /// Create a post and write it to `<slug>.md`
    ///
    /// The slug is not checked for uniqueness: a post whose slug matches an
    /// existing file replaces that file.
    pub async fn create_post(&self, data: NewPost) -> Result<Post> {
        let now = now_iso();
        let slug = data
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&data.title));

        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            title: data.title,
            slug,
            content: data.content,
            excerpt: data.excerpt,
            category: data.category,
            tags: data.tags,
            featured_image: data.featured_image,
            published: data.published,
            created_at: now.clone(),
            updated_at: now,
        };

        self.save_post(&post).await?;
        tracing::info!("Created post {:?} ({})", post.slug, post.id);
        Ok(post)
    }

    /// Merge `patch` into the post with `id`
    ///
    /// Returns `Ok(None)` when no post has that id. A changed slug moves the
    /// post to a new file; removing the old file is best-effort.
    pub async fn update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>> {
        let Some(mut post) = self.find_post(id).await else {
            return Ok(None);
        };

        let old_slug = post.slug.clone();
        post.apply(patch);
        post.updated_at = now_iso();

        let path = self.post_path(&post.slug)?;
        let text = post.to_markdown()?;

        if post.slug != old_slug {
            self.remove_old_file(&old_slug).await;
        }

        fs::write(&path, text).await?;
        tracing::info!("Updated post {:?} ({})", post.slug, post.id);
        Ok(Some(post))
    }

    /// Delete the post with `id`; `false` if it does not exist or removal fails
    pub async fn delete_post(&self, id: &str) -> bool {
        let Some(post) = self.find_post(id).await else {
            return false;
        };

        let path = match self.post_path(&post.slug) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Error deleting post {}: {}", id, e);
                return false;
            }
        };

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Deleted post {:?} ({})", post.slug, post.id);
                true
            }
            Err(e) => {
                tracing::error!("Error deleting post {:?}: {}", path, e);
                false
            }
        }
    }

    async fn find_post(&self, id: &str) -> Option<Post> {
        self.all_posts().await.into_iter().find(|post| post.id == id)
    }

    async fn read_post(&self, path: &Path) -> Result<Post> {
        let text = fs::read_to_string(path).await?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Ok(Post::from_markdown(&text, stem, &self.options)?)
    }

    async fn save_post(&self, post: &Post) -> Result<()> {
        let path = self.post_path(&post.slug)?;
        let text = post.to_markdown()?;
        fs::write(&path, text).await?;
        Ok(())
    }

    async fn remove_old_file(&self, slug: &str) {
        let Ok(path) = self.post_path(slug) else {
            return;
        };
        if let Err(e) = fs::remove_file(&path).await {
            tracing::error!("Error deleting old post file {:?}: {}", path, e);
        }
    }

    /// File path for a slug; slugs that would escape the posts directory are rejected
    fn post_path(&self, slug: &str) -> Result<PathBuf> {
        if slug.is_empty() || slug.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(self.posts_dir.join(format!("{}.md", slug)))
    }

    // ----- Categories -----

    /// All categories with post counts computed from the published posts
    pub async fn all_categories(&self) -> Vec<Category> {
        let categories = match self.read_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("Error getting categories: {}", e);
                return Vec::new();
            }
        };

        let posts = self.published_posts().await;
        categories
            .into_iter()
            .map(|mut category| {
                category.post_count = category.count_posts(&posts);
                category
            })
            .collect()
    }

    /// First category with the given slug
    pub async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.all_categories()
            .await
            .into_iter()
            .find(|category| category.slug == slug)
    }

    /// Append a new category and rewrite the document
    pub async fn create_category(&self, data: NewCategory) -> Result<Category> {
        let mut categories = self.load_document().await?;

        let category = Category {
            id: uuid::Uuid::new_v4().to_string(),
            slug: data
                .slug
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| slugify(&data.name)),
            name: data.name,
            description: data.description,
            color: data
                .color
                .unwrap_or_else(|| super::DEFAULT_COLOR.to_string()),
            post_count: 0,
        };

        categories.push(category.clone());
        self.write_categories(&categories).await?;
        tracing::info!("Created category {:?} ({})", category.slug, category.id);
        Ok(category)
    }

    /// Merge `patch` into the category with `id` and rewrite the document
    pub async fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Option<Category>> {
        let mut categories = self.load_document().await?;
        let Some(index) = categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };

        categories[index].apply(patch);
        self.write_categories(&categories).await?;

        let mut category = categories.swap_remove(index);
        category.post_count = category.count_posts(&self.published_posts().await);
        tracing::info!("Updated category {:?} ({})", category.slug, category.id);
        Ok(Some(category))
    }

    /// Remove the category with `id`; `Ok(false)` if there was none
    pub async fn delete_category(&self, id: &str) -> Result<bool> {
        let mut categories = self.load_document().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);

        if categories.len() == before {
            return Ok(false);
        }

        self.write_categories(&categories).await?;
        tracing::info!("Deleted category {}", id);
        Ok(true)
    }

    async fn read_categories(&self) -> Result<Vec<Category>> {
        let text = fs::read_to_string(&self.categories_file).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The stored document for a mutation; a missing file counts as empty
    async fn load_document(&self) -> Result<Vec<Category>> {
        match self.read_categories().await {
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            other => other,
        }
    }

    async fn write_categories(&self, categories: &[Category]) -> Result<()> {
        let text = serde_json::to_string_pretty(categories)?;
        fs::write(&self.categories_file, text).await?;
        Ok(())
    }
}

/// Check if a path is a post file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().map(|e| e == "md").unwrap_or(false)
}
