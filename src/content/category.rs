//! Category model

use serde::{Deserialize, Serialize};

use super::frontmatter::{empty_as_none, nullable};
use super::Post;

/// Color given to categories created without one
pub const DEFAULT_COLOR: &str = "#3B82F6";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Case-insensitive comparison used to join posts to categories by name
pub fn same_category(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A category; posts reference it by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    /// Derived from the published posts on every read; the stored value is ignored
    #[serde(default)]
    pub post_count: usize,
}

impl Category {
    /// Number of `posts` filed under this category
    pub fn count_posts(&self, posts: &[Post]) -> usize {
        posts.iter().filter(|p| p.in_category(&self.name)).count()
    }

    /// Merge a partial update over this category; `id` never changes
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(slug) = patch.slug.filter(|s| !s.is_empty()) {
            self.slug = slug;
        }
        if let Some(description) = patch.description {
            self.description = description.filter(|d| !d.is_empty());
        }
        if let Some(color) = patch.color.filter(|c| !c.is_empty()) {
            self.color = color;
        }
    }
}

/// The categories written when the content directory is first bootstrapped
pub fn default_categories() -> Vec<Category> {
    [
        (
            "Health Myths",
            "health-myths",
            "Debunking common health and nutrition myths",
            "#3B82F6",
        ),
        (
            "Science Myths",
            "science-myths",
            "Exploring scientific misconceptions",
            "#8B5CF6",
        ),
        (
            "History Myths",
            "history-myths",
            "Fact-checking historical beliefs",
            "#F59E0B",
        ),
    ]
    .into_iter()
    .map(|(name, slug, description, color)| Category {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        color: color.to_string(),
        post_count: 0,
    })
    .collect()
}

/// Input for creating a category
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    /// Derived from the name when absent or empty
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color: Option<String>,
}

/// Partial update of a category
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    /// `Some(None)` clears the description
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, ["health-myths", "science-myths", "history-myths"]);
        assert!(categories.iter().all(|c| c.post_count == 0));
        assert_ne!(categories[0].id, categories[1].id);
    }

    #[test]
    fn test_same_category() {
        assert!(same_category("Health Myths", "health myths"));
        assert!(same_category("ÉTÉ", "été"));
        assert!(!same_category("Health Myths", "health-myths"));
    }

    #[test]
    fn test_stored_document_shape() {
        let json = r##"[{"id":"c1","name":"Space","slug":"space","postCount":42}]"##;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories[0].color, DEFAULT_COLOR);
        assert_eq!(categories[0].description, None);
        assert_eq!(categories[0].post_count, 42);

        let value = serde_json::to_value(&categories[0]).unwrap();
        assert_eq!(value["postCount"], 42);
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_apply_patch() {
        let mut category = default_categories().remove(0);
        let id = category.id.clone();
        let patch: CategoryPatch = serde_json::from_value(serde_json::json!({
            "name": "Nutrition Myths",
            "description": null,
            "color": ""
        }))
        .unwrap();

        category.apply(patch);
        assert_eq!(category.id, id);
        assert_eq!(category.name, "Nutrition Myths");
        assert_eq!(category.slug, "health-myths");
        assert_eq!(category.description, None);
        assert_eq!(category.color, "#3B82F6");
    }
}
