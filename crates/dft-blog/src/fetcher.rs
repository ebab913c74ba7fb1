/// Content index loading.
///
/// Retrieves `blog/index.json` from the configured source. Every failure (transport, bad
/// JSON, missing `posts`) is logged and replaced by the built-in fallback set, so callers
/// always get something to render.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::filter::sort_by_date_desc;
use crate::model::{
    CategoryMap, CategoryName, ContentIndex, ContentOrigin, LoadedContent, Post, SiteInfo,
};
use crate::source::ContentSource;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

const FALLBACK_AUTHOR: &str = "Nishi Prabhat Hazarika";
const FALLBACK_CONTENT: &str = "Full content would be loaded from individual post files...";

pub struct ContentIndexFetcher {
    source: Box<dyn ContentSource>,
}

impl ContentIndexFetcher {
    pub fn new(source: Box<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Load posts and category names. Never fails.
    pub async fn load(&self) -> LoadedContent {
        match self.try_load().await {
            Ok(index) => {
                for problem in validate_posts(&index.posts) {
                    warn!(
                        source = %self.source.describe(),
                        problem = %problem,
                        "content index convention violated"
                    );
                }
                info!(
                    source = %self.source.describe(),
                    posts = index.posts.len(),
                    categories = index.categories.as_ref().map_or(0, |c| c.len()),
                    "content index loaded"
                );
                LoadedContent {
                    posts: index.posts,
                    categories: index.categories.unwrap_or_default(),
                    origin: ContentOrigin::Index,
                }
            }
            Err(e) => {
                warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "content index unavailable, using fallback posts"
                );
                let content = fallback_content();
                index_snapshot(&content.posts);
                content
            }
        }
    }

    async fn try_load(&self) -> Result<ContentIndex, AppError> {
        let text = self.source.fetch_index().await?;
        parse_index(&text)
    }
}

/// Parse an index document. A document without a `posts` array is rejected.
pub fn parse_index(text: &str) -> Result<ContentIndex, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.get("posts").is_some_and(|p| p.is_array()) {
        return Err(AppError::Index("document has no posts array".to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Report slug convention and uniqueness problems without rejecting anything.
pub fn validate_posts(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut problems = Vec::new();

    for post in posts {
        if !SLUG_RE.is_match(&post.slug) {
            problems.push(format!("slug {:?} is not URL-safe", post.slug));
        }
        if !seen.insert(post.slug.as_str()) {
            problems.push(format!("slug {:?} appears more than once", post.slug));
        }
        if post.published_on().is_none() {
            problems.push(format!("post {:?} has unparsable date {:?}", post.slug, post.date));
        }
    }
    problems
}

/// Build the full index document for `posts` (newest first) and log it.
///
/// Nothing is written; the document is only emitted as a development aid.
pub fn index_snapshot(posts: &[Post]) -> ContentIndex {
    let snapshot = ContentIndex {
        site: Some(site_info()),
        posts: sort_by_date_desc(posts),
        categories: None,
    };
    match serde_json::to_string(&snapshot) {
        Ok(json) => debug!(posts = snapshot.posts.len(), index = %json, "blog index updated"),
        Err(e) => warn!(error = %e, "failed to serialize blog index snapshot"),
    }
    snapshot
}

pub fn site_info() -> SiteInfo {
    SiteInfo {
        title: "DFT.codes - Nishi Prabhat Hazarika".to_string(),
        description: "Blog about Density Functional Theory, Topological Quantum Materials, and \
Computational Condensed Matter Physics"
            .to_string(),
        author: FALLBACK_AUTHOR.to_string(),
        url: "https://dft.codes".to_string(),
    }
}

pub fn fallback_content() -> LoadedContent {
    LoadedContent {
        posts: fallback_posts(),
        categories: fallback_categories(),
        origin: ContentOrigin::Fallback,
    }
}

pub fn fallback_categories() -> CategoryMap {
    [
        ("dft", "DFT"),
        ("quantum-materials", "Quantum Materials"),
        ("tutorials", "Tutorials"),
        ("research", "Research"),
    ]
    .into_iter()
    .map(|(id, name)| {
        (
            id.to_string(),
            CategoryName {
                name: name.to_string(),
            },
        )
    })
    .collect()
}

pub fn fallback_posts() -> Vec<Post> {
    let post = |title: &str,
                slug: &str,
                excerpt: &str,
                date: &str,
                category: &str,
                tags: &[&str],
                read_time: &str| Post {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: excerpt.to_string(),
        content: Some(FALLBACK_CONTENT.to_string()),
        date: date.to_string(),
        category: category.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        author: Some(FALLBACK_AUTHOR.to_string()),
        read_time: Some(read_time.to_string()),
        image: None,
    };

    vec![
        post(
            "Introduction to Density Functional Theory in Computational Physics",
            "introduction-to-dft",
            "Exploring the fundamentals of DFT and its applications in predicting material properties from first principles.",
            "2025-01-15",
            "dft",
            &["DFT", "Theory", "Computational Physics"],
            "8 min read",
        ),
        post(
            "Topological Insulators: A Computational Perspective",
            "topological-insulators-computational",
            "Understanding topological phases of matter through advanced computational methods and band structure analysis.",
            "2025-01-10",
            "quantum-materials",
            &["Topological Insulators", "Band Structure", "Quantum Materials"],
            "12 min read",
        ),
        post(
            "VASP Tutorial: Calculating Electronic Properties",
            "vasp-tutorial-electronic-properties",
            "Step-by-step guide to using VASP for electronic structure calculations, including practical examples and best practices.",
            "2025-01-05",
            "tutorials",
            &["VASP", "Tutorial", "Electronic Structure"],
            "15 min read",
        ),
        post(
            "Berry Curvature and Topological Invariants",
            "berry-curvature-topological-invariants",
            "Deep dive into the mathematical foundations of topology in condensed matter physics and computational methods to calculate topological invariants.",
            "2024-12-28",
            "research",
            &["Berry Curvature", "Topology", "Quantum Geometry"],
            "10 min read",
        ),
        post(
            "Phonon Calculations Using Density Functional Perturbation Theory",
            "phonon-calculations-dfpt",
            "Understanding vibrational properties of materials through DFPT calculations and their implications for thermal transport.",
            "2024-12-20",
            "dft",
            &["DFPT", "Phonons", "Thermal Properties"],
            "11 min read",
        ),
        post(
            "Machine Learning in Materials Discovery",
            "machine-learning-materials-discovery",
            "How machine learning algorithms are revolutionizing computational materials science and accelerating materials discovery.",
            "2024-12-15",
            "research",
            &["Machine Learning", "Materials Discovery", "AI"],
            "9 min read",
        ),
    ]
}
