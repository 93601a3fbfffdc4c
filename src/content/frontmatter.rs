//! Front-matter parsing and rendering

use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
///
/// An empty string, `null` or a missing value all produce an empty list.
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_string(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![value])
            }
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Like [`string_or_vec`], for fields that may be left out of a partial update
pub(crate) fn optional_string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_vec(deserializer).map(Some)
}

/// Distinguish an explicit `null` (`Some(None)`) from a missing field (`None`)
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treat an empty string the same as a missing value
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.filter(|s| !s.is_empty()))
}

/// Read a flag where `null` means the same as leaving it out
pub(crate) fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Front-matter block of a post file
///
/// Every field is optional on the way in; the codec in `post.rs` fills in
/// defaults for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Kept loose: anything other than an explicit `false` means published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<serde_yaml::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A document that does not open with a `---` line has no front-matter
    /// and is returned whole. Malformed YAML inside the block is an error.
    /// A leading byte order mark is dropped.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let Some((yaml, body)) = split_block(content) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
        Ok((fm, body))
    }

    /// Whether the block marks the post as published
    pub fn is_published(&self) -> bool {
        !matches!(self.published, Some(serde_yaml::Value::Bool(false)))
    }

    /// Render the block followed by `body`
    pub fn render(&self, body: &str) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n{}", yaml, body))
    }
}

/// Split `---\n<yaml>---\n<body>` into its YAML and body parts
///
/// Exactly one line break after the closing delimiter belongs to the block.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = strip_line_break(rest)?;

    let mut offset = 0;
    loop {
        let line = &rest[offset..];
        if let Some(after) = line.strip_prefix("---") {
            if after.is_empty() {
                return Some((&rest[..offset], after));
            }
            if let Some(body) = strip_line_break(after) {
                return Some((&rest[..offset], body));
            }
        }
        offset += line.find('\n')? + 1;
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: hello-world
createdAt: 2024-01-15T10:30:00.000Z
tags:
  - health
  - nutrition
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.slug, Some("hello-world".to_string()));
        assert_eq!(fm.created_at, Some("2024-01-15T10:30:00.000Z".to_string()));
        assert_eq!(fm.tags, vec!["health", "nutrition"]);
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: One Tag\ntags: Notes\n---\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some markdown\n\n---\n\nwith a rule.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_is_content() {
        let content = "---\ntitle: never closed\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody text").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Windows".to_string()));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_byte_order_mark() {
        let content = "\u{feff}---\nid: fixed-id\npublished: false\n---\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.id, Some("fixed-id".to_string()));
        assert!(!fm.is_published());
        assert_eq!(body, "Body");

        let (fm, body) = FrontMatter::parse("\u{feff}Just text").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Just text");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unterminated\n---\nBody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_published_flag() {
        let (fm, _) = FrontMatter::parse("---\npublished: false\n---\n").unwrap();
        assert!(!fm.is_published());

        let (fm, _) = FrontMatter::parse("---\npublished: true\n---\n").unwrap();
        assert!(fm.is_published());

        // Only a real boolean false unpublishes
        let (fm, _) = FrontMatter::parse("---\npublished: \"false\"\n---\n").unwrap();
        assert!(fm.is_published());

        assert!(FrontMatter::default().is_published());
    }

    #[test]
    fn test_render_then_parse() {
        let fm = FrontMatter {
            title: Some("Myth: Cracking Knuckles Causes Arthritis".to_string()),
            tags: vec!["joints".to_string()],
            published: Some(serde_yaml::Value::Bool(true)),
            ..Default::default()
        };

        let rendered = fm.render("# Heading\n").unwrap();
        assert!(rendered.starts_with("---\n"));
        assert!(!rendered.contains("featuredImage"));

        let (parsed, body) = FrontMatter::parse(&rendered).unwrap();
        assert_eq!(parsed, fm);
        assert_eq!(body, "# Heading\n");
    }
}
