use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// ISO calendar date, kept verbatim from the index.
    pub date: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Post {
    /// Parsed publication date. Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn href(&self) -> String {
        format!("blog/posts/{}.html", self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

pub type CategoryMap = HashMap<String, CategoryName>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

/// The `blog/index.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteInfo>,
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
}

/// Where the loaded posts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    Index,
    Fallback,
}

/// Posts plus category lookup for one page load.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub posts: Vec<Post>,
    pub categories: CategoryMap,
    pub origin: ContentOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "title": "VASP Tutorial",
            "slug": "vasp-tutorial",
            "excerpt": "Step by step.",
            "date": "2025-01-05",
            "category": "tutorials",
            "readTime": "15 min read",
            "image": null
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.read_time.as_deref(), Some("15 min read"));
        assert!(post.image.is_none());
        assert!(post.tags().is_empty());
        assert_eq!(post.href(), "blog/posts/vasp-tutorial.html");
        assert_eq!(post.published_on(), NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn unparsable_date_has_no_published_on() {
        let json = r#"{"title":"t","slug":"s","excerpt":"e","date":"soon","category":"dft"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.published_on().is_none());
    }
}
