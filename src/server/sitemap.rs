//! sitemap.xml generated from the live content

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use super::AppState;
use crate::config::SiteConfig;
use crate::content::{Category, Post};
use crate::helpers::{category_url, full_url_for, parse_timestamp, post_url};

/// Pages of the reading UI that exist regardless of content
const STATIC_PAGES: [&str; 3] = ["/", "/about", "/contact"];

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state.store.published_posts().await;
    let categories = state.store.all_categories().await;

    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&state.config, &posts, &categories),
    )
}

/// Render a sitemap listing the static pages, `posts` and `categories`
pub fn render_sitemap(config: &SiteConfig, posts: &[Post], categories: &[Category]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for page in STATIC_PAGES {
        push_url(&mut xml, &full_url_for(config, page), None);
    }

    for post in posts {
        let lastmod = parse_timestamp(&post.updated_at).map(|dt| dt.format("%Y-%m-%d").to_string());
        push_url(&mut xml, &post_url(config, &post.slug), lastmod.as_deref());
    }

    for category in categories {
        push_url(&mut xml, &category_url(config, &category.slug), None);
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    xml.push_str("  </url>\n");
}

/// Simple XML escaping
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sitemap() {
        let config = SiteConfig {
            url: "https://myths.example.com".to_string(),
            ..SiteConfig::default()
        };
        let post = Post {
            id: "1".to_string(),
            title: "Lightning Never Strikes Twice".to_string(),
            slug: "lightning-twice".to_string(),
            content: String::new(),
            excerpt: String::new(),
            category: "Science Myths".to_string(),
            tags: Vec::new(),
            featured_image: None,
            published: true,
            created_at: "2024-05-01T12:00:00.000Z".to_string(),
            updated_at: "2024-05-03T12:00:00.000Z".to_string(),
        };
        let categories = crate::content::default_categories();

        let xml = render_sitemap(&config, &[post], &categories);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://myths.example.com/</loc>"));
        assert!(xml.contains("<loc>https://myths.example.com/about</loc>"));
        assert!(xml.contains("<loc>https://myths.example.com/post/lightning-twice</loc>"));
        assert!(xml.contains("<lastmod>2024-05-03</lastmod>"));
        assert!(xml.contains("<loc>https://myths.example.com/category/history-myths</loc>"));
        assert_eq!(xml.matches("<url>").count(), 3 + 1 + 3);
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
