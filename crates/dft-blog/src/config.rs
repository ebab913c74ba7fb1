use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::filter::ALL_CATEGORIES;

pub const INDEX_REL_PATH: &str = "blog/index.json";
const DEFAULT_RECENT_LIMIT: usize = 3;

/// Which page of the site the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Blog,
    Home,
    Post,
}

impl PageKind {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "blog" => Ok(Self::Blog),
            "home" | "index" => Ok(Self::Home),
            "post" => Ok(Self::Post),
            other => Err(AppError::Config(format!(
                "DFT_BLOG_PAGE must be one of blog, home, post (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum IndexLocation {
    Url(String),
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub index: IndexLocation,
    pub page: PageKind,
    pub category: String,
    pub query: String,
    pub slug: Option<String>,
    pub recent_limit: usize,
}

impl Config {
    /// Optional:
    /// - `DFT_BLOG_BASE_URL` (site root; wins over `DFT_BLOG_SITE_ROOT`)
    /// - `DFT_BLOG_SITE_ROOT` (default: ".")
    /// - `DFT_BLOG_PAGE` (blog | home | post, default: blog)
    /// - `DFT_BLOG_CATEGORY` (default: "all")
    /// - `DFT_BLOG_QUERY` (default: "")
    /// - `DFT_BLOG_SLUG` (required for the post page)
    /// - `DFT_BLOG_RECENT_LIMIT` (default: 3)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let index = match lookup("DFT_BLOG_BASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => IndexLocation::Url(url.trim().trim_end_matches('/').to_string()),
            None => {
                let root = lookup("DFT_BLOG_SITE_ROOT").unwrap_or_else(|| ".".to_string());
                IndexLocation::Dir(PathBuf::from(root))
            }
        };

        let page = PageKind::parse(&lookup("DFT_BLOG_PAGE").unwrap_or_default())?;

        let category = lookup("DFT_BLOG_CATEGORY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        let query = lookup("DFT_BLOG_QUERY").unwrap_or_default();

        let slug = lookup("DFT_BLOG_SLUG").filter(|s| !s.trim().is_empty());
        if page == PageKind::Post && slug.is_none() {
            return Err(AppError::Config(
                "DFT_BLOG_SLUG environment variable is required for DFT_BLOG_PAGE=post"
                    .to_string(),
            ));
        }

        let recent_limit = match lookup("DFT_BLOG_RECENT_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!(
                    "DFT_BLOG_RECENT_LIMIT must be a non-negative integer (got {raw:?})"
                ))
            })?,
            None => DEFAULT_RECENT_LIMIT,
        };

        Ok(Self {
            index,
            page,
            category,
            query,
            slug,
            recent_limit,
        })
    }

    pub fn index_file_path(root: &Path) -> PathBuf {
        root.join(INDEX_REL_PATH)
    }

    pub fn index_url(base: &str) -> String {
        format!("{}/{INDEX_REL_PATH}", base.trim_end_matches('/'))
    }
}
