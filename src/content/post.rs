//! Post model and the Markdown codec

use serde::{Deserialize, Serialize};

use super::frontmatter::{
    empty_as_none, null_as_false, nullable, optional_string_or_vec, string_or_vec,
};
use super::FrontMatter;
use crate::helpers::now_iso;

/// Defaults applied when decoding a post file with missing metadata
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Number of characters taken from the body for a derived excerpt
    pub excerpt_length: usize,
    /// Category assigned to posts without one
    pub default_category: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            excerpt_length: 200,
            default_category: "uncategorized".to_string(),
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque identifier, fixed at creation
    pub id: String,

    /// Post title
    pub title: String,

    /// URL-friendly name, also the file name on disk
    pub slug: String,

    /// Raw markdown content
    pub content: String,

    /// Short summary shown on cards
    pub excerpt: String,

    /// Category name (free text, matched case-insensitively)
    pub category: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,

    /// Whether the post is visible to readers
    pub published: bool,

    /// Creation time (ISO 8601)
    pub created_at: String,

    /// Last modification time (ISO 8601)
    pub updated_at: String,
}

impl Post {
    /// Decode a post from the text of `<file_stem>.md`
    pub fn from_markdown(
        text: &str,
        file_stem: &str,
        options: &DecodeOptions,
    ) -> Result<Self, serde_yaml::Error> {
        let (fm, body) = FrontMatter::parse(text)?;
        let published = fm.is_published();

        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        Ok(Self {
            id: present(fm.id).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: fm.title.unwrap_or_default(),
            slug: present(fm.slug).unwrap_or_else(|| file_stem.to_string()),
            excerpt: present(fm.excerpt)
                .unwrap_or_else(|| derive_excerpt(body, options.excerpt_length)),
            category: present(fm.category).unwrap_or_else(|| options.default_category.clone()),
            tags: fm.tags,
            featured_image: fm.featured_image,
            published,
            created_at: present(fm.created_at).unwrap_or_else(now_iso),
            updated_at: present(fm.updated_at).unwrap_or_else(now_iso),
            content: body.to_string(),
        })
    }

    /// Encode the post as front-matter followed by the markdown body
    pub fn to_markdown(&self) -> Result<String, serde_yaml::Error> {
        self.front_matter().render(&self.content)
    }

    fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            id: Some(self.id.clone()),
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            excerpt: Some(self.excerpt.clone()),
            category: Some(self.category.clone()),
            tags: self.tags.clone(),
            featured_image: self.featured_image.clone(),
            published: Some(serde_yaml::Value::Bool(self.published)),
            created_at: Some(self.created_at.clone()),
            updated_at: Some(self.updated_at.clone()),
        }
    }

    /// Merge a partial update over this post
    ///
    /// `id` and `createdAt` are never touched; an empty slug keeps the
    /// current one.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(slug) = patch.slug.filter(|s| !s.is_empty()) {
            self.slug = slug;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(image) = patch.featured_image {
            self.featured_image = image.filter(|s| !s.is_empty());
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
    }

    /// Whether the post belongs to the named category
    pub fn in_category(&self, name: &str) -> bool {
        super::same_category(&self.category, name)
    }
}

/// First `length` characters of the body followed by an ellipsis
fn derive_excerpt(body: &str, length: usize) -> String {
    let mut excerpt: String = body.chars().take(length).collect();
    excerpt.push_str("...");
    excerpt
}

/// Input for creating a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    /// Derived from the title when absent or empty
    #[serde(default)]
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    #[serde(default, deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub featured_image: Option<String>,
    /// New posts start as drafts
    #[serde(default, deserialize_with = "null_as_false")]
    pub published: bool,
}

/// Partial update of a post; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_vec")]
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the image
    #[serde(default, deserialize_with = "nullable")]
    pub featured_image: Option<Option<String>>,
    pub published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: "0b6f3f4e-3c1a-4c43-9d0e-2d1c1f8a7b11".to_string(),
            title: "Myth: Sugar Makes Kids Hyper".to_string(),
            slug: "sugar-makes-kids-hyper".to_string(),
            content: "\n# The claim\n\nDouble-blind studies say otherwise.\n".to_string(),
            excerpt: "Double-blind studies say otherwise.".to_string(),
            category: "Health Myths".to_string(),
            tags: vec!["sugar".to_string(), "children".to_string()],
            featured_image: Some("https://img.example.com/sugar.jpg".to_string()),
            published: false,
            created_at: "2024-03-01T09:00:00.000Z".to_string(),
            updated_at: "2024-03-02T10:15:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let post = sample_post();
        let text = post.to_markdown().unwrap();
        let decoded = Post::from_markdown(&text, "ignored", &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, post);
    }

    #[test]
    fn test_round_trip_without_image_or_tags() {
        let post = Post {
            featured_image: None,
            tags: Vec::new(),
            published: true,
            ..sample_post()
        };
        let text = post.to_markdown().unwrap();
        assert!(!text.contains("featuredImage"));
        let decoded = Post::from_markdown(&text, "ignored", &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, post);
    }

    #[test]
    fn test_encode_layout() {
        let text = sample_post().to_markdown().unwrap();
        assert!(text.starts_with("---\nid: "));
        assert!(text.ends_with("---\n\n# The claim\n\nDouble-blind studies say otherwise.\n"));
    }

    #[test]
    fn test_decode_defaults() {
        let body = "x".repeat(250);
        let post = Post::from_markdown(&body, "from-filename", &DecodeOptions::default()).unwrap();

        assert!(!post.id.is_empty());
        assert_eq!(post.title, "");
        assert_eq!(post.slug, "from-filename");
        assert_eq!(post.excerpt, format!("{}...", "x".repeat(200)));
        assert_eq!(post.category, "uncategorized");
        assert!(post.tags.is_empty());
        assert_eq!(post.featured_image, None);
        assert!(post.published);
        assert!(crate::helpers::parse_timestamp(&post.created_at).is_some());
        assert!(crate::helpers::parse_timestamp(&post.updated_at).is_some());
        assert_eq!(post.content, body);
    }

    #[test]
    fn test_decode_short_body_excerpt() {
        let text = "---\ntitle: Short\n---\nTiny body";
        let post = Post::from_markdown(text, "short", &DecodeOptions::default()).unwrap();
        assert_eq!(post.excerpt, "Tiny body...");
    }

    #[test]
    fn test_decode_fresh_ids_differ() {
        let options = DecodeOptions::default();
        let a = Post::from_markdown("body", "a", &options).unwrap();
        let b = Post::from_markdown("body", "a", &options).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_decode_custom_options() {
        let options = DecodeOptions {
            excerpt_length: 4,
            default_category: "misc".to_string(),
        };
        let post = Post::from_markdown("abcdefgh", "p", &options).unwrap();
        assert_eq!(post.excerpt, "abcd...");
        assert_eq!(post.category, "misc");
    }

    #[test]
    fn test_decode_malformed() {
        let text = "---\ntags: [a, b\n---\nbody";
        assert!(Post::from_markdown(text, "bad", &DecodeOptions::default()).is_err());
    }

    #[test]
    fn test_apply_patch() {
        let mut post = sample_post();
        let patch: PostPatch = serde_json::from_value(serde_json::json!({
            "title": "New title",
            "tags": "single",
            "featuredImage": null,
            "published": true,
            "id": "attempted-override",
            "createdAt": "1999-01-01T00:00:00.000Z"
        }))
        .unwrap();

        post.apply(patch);
        assert_eq!(post.title, "New title");
        assert_eq!(post.tags, vec!["single"]);
        assert_eq!(post.featured_image, None);
        assert!(post.published);
        assert_eq!(post.id, sample_post().id);
        assert_eq!(post.created_at, sample_post().created_at);
        assert_eq!(post.slug, sample_post().slug);
    }

    #[test]
    fn test_apply_empty_patch_keeps_everything() {
        let mut post = sample_post();
        post.apply(PostPatch::default());
        assert_eq!(post, sample_post());
    }

    #[test]
    fn test_new_post_defaults() {
        let data: NewPost = serde_json::from_value(serde_json::json!({
            "title": "Bulls Hate Red",
            "content": "They are colorblind to red.",
            "excerpt": "Color has nothing to do with it.",
            "category": "Science Myths",
            "featuredImage": ""
        }))
        .unwrap();

        assert_eq!(data.slug, None);
        assert!(data.tags.is_empty());
        assert_eq!(data.featured_image, None);
        assert!(!data.published);
    }

    #[test]
    fn test_new_post_null_published_is_draft() {
        let data: NewPost = serde_json::from_value(serde_json::json!({
            "title": "Goldfish Memory",
            "content": "Months, not seconds.",
            "excerpt": "e",
            "category": "Science Myths",
            "published": null
        }))
        .unwrap();
        assert!(!data.published);
    }

    #[test]
    fn test_new_post_requires_title() {
        let result = serde_json::from_value::<NewPost>(serde_json::json!({
            "content": "c",
            "excerpt": "e",
            "category": "x"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_in_category_ignores_case() {
        let post = sample_post();
        assert!(post.in_category("health myths"));
        assert!(post.in_category("HEALTH MYTHS"));
        assert!(!post.in_category("Health"));
    }
}
