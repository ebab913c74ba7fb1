use crate::filter::{filter_posts, normalize_query, ALL_CATEGORIES};
use crate::model::LoadedContent;
use crate::render::render_listing;

/// Filter selection for the blog listing. Replaced on every change, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    category: String,
    query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
        }
    }
}

impl ViewState {
    pub fn new(category: &str, query: &str) -> Self {
        Self::default().with_category(category).with_query(query)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn with_category(&self, category: &str) -> Self {
        let category = category.trim();
        Self {
            category: if category.is_empty() {
                ALL_CATEGORIES.to_string()
            } else {
                category.to_string()
            },
            query: self.query.clone(),
        }
    }

    pub fn with_query(&self, query: &str) -> Self {
        Self {
            category: self.category.clone(),
            query: normalize_query(query),
        }
    }
}

/// Markup for the `blog-posts` container under `state`.
pub fn render_view(content: &LoadedContent, state: &ViewState) -> String {
    let visible = filter_posts(&content.posts, &state.category, &state.query);
    render_listing(&visible, &content.categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::fallback_content;

    #[test]
    fn updates_return_new_states() {
        let base = ViewState::default();
        let dft = base.with_category("dft");
        let searched = dft.with_query("  Phonon ");
        assert_eq!(base.category(), "all");
        assert_eq!(dft.query(), "");
        assert_eq!(searched.category(), "dft");
        assert_eq!(searched.query(), "phonon");
        assert_eq!(ViewState::new("", ""), base);
    }

    #[test]
    fn render_view_filters_without_a_document() {
        let content = fallback_content();
        let all = render_view(&content, &ViewState::default());
        assert_eq!(all.matches("<article").count(), 6);

        let dft = render_view(&content, &ViewState::new("dft", ""));
        assert_eq!(dft.matches("<article").count(), 2);

        let phonon = render_view(&content, &ViewState::new("dft", "phonon"));
        assert_eq!(phonon.matches("<article").count(), 1);
        assert!(phonon.contains("phonon-calculations-dfpt"));

        let none = render_view(&content, &ViewState::new("tutorials", "berry"));
        assert!(none.contains("No posts found"));
    }
}
