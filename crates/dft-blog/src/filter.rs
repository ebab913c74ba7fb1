/// Category and free-text filtering over the in-memory post list.
use std::cmp::Reverse;

use crate::model::Post;

/// Category selector that matches every post.
pub const ALL_CATEGORIES: &str = "all";

/// Posts matching both `category` and `query`, in input order.
///
/// `query` is trimmed and compared case-insensitively against the title, the excerpt and
/// each tag. An empty query matches everything.
pub fn filter_posts<'a>(posts: &'a [Post], category: &str, query: &str) -> Vec<&'a Post> {
    let needle = normalize_query(query);
    posts
        .iter()
        .filter(|post| matches_category(post, category) && matches_query(post, &needle))
        .collect()
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn matches_category(post: &Post, category: &str) -> bool {
    category == ALL_CATEGORIES || post.category == category
}

/// `needle` must already be normalized.
fn matches_query(post: &Post, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.tags().iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Copy of `posts`, newest first. Ties keep input order; unparsable dates go last.
pub fn sort_by_date_desc(posts: &[Post]) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by_key(|post| Reverse(post.published_on()));
    sorted
}

/// The `limit` newest posts, for the homepage preview.
pub fn recent_posts(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut sorted = sort_by_date_desc(posts);
    sorted.truncate(limit);
    sorted
}
