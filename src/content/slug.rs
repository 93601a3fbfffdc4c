//! Slug generation for post titles and category names

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not an ASCII word character, whitespace or hyphen
    static ref DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9_\s-]").unwrap();
    /// Runs of separators that collapse into a single hyphen
    static ref SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Derive a lowercase, hyphen-separated, URL-safe token from arbitrary text
///
/// # Examples
/// ```ignore
/// slugify("Hello, World! 2024") // -> "hello-world-2024"
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lower, "");
    let hyphenated = SEPARATORS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}
