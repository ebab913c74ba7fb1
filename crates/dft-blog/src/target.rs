/// Rendering target seam between the page controller and a document.
///
/// The controller only ever addresses elements by selector and swaps whole markup blocks, so
/// a real DOM binding and the in-memory document below are interchangeable.
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bid="([^"]+)""#).expect("valid regex"));

pub trait RenderTarget {
    /// Whether an element matching `selector` exists.
    fn query(&self, selector: &str) -> bool;

    /// Replace the inner markup of `selector`. Returns `false` if the element is missing.
    fn mount(&mut self, selector: &str, markup: &str) -> bool;

    /// Insert `markup` as a new element named `selector` right after `anchor`.
    fn insert_after(&mut self, anchor: &str, selector: &str, markup: &str) -> bool;

    /// Add or remove `class` on `selector`. Returns `false` if the element is missing.
    fn set_class(&mut self, selector: &str, class: &str, on: bool) -> bool;

    fn has_class(&self, selector: &str, class: &str) -> bool;
}

#[derive(Debug, Default, Clone)]
struct Element {
    markup: String,
    classes: BTreeSet<String>,
}

/// Headless document: a flat, ordered set of selector-addressed elements.
///
/// Elements with an `id` attribute inside mounted or inserted markup become addressable as
/// `#id`.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, Element>,
    order: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document containing empty elements for each selector.
    pub fn with_elements<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc = Self::new();
        for selector in selectors {
            doc.add(selector, "");
        }
        doc
    }

    pub fn add(&mut self, selector: &str, markup: &str) {
        if !self.elements.contains_key(selector) {
            self.order.push(selector.to_string());
        }
        self.elements.insert(
            selector.to_string(),
            Element {
                markup: markup.to_string(),
                classes: BTreeSet::new(),
            },
        );
        self.register_ids(markup);
    }

    pub fn markup(&self, selector: &str) -> Option<&str> {
        self.elements.get(selector).map(|e| e.markup.as_str())
    }

    /// Every non-empty element in document order, each preceded by a selector comment.
    pub fn dump(&self) -> String {
        self.order
            .iter()
            .filter_map(|selector| {
                let element = self.elements.get(selector)?;
                (!element.markup.is_empty())
                    .then(|| format!("<!-- {selector} -->\n{}\n", element.markup))
            })
            .collect()
    }

    fn register_ids(&mut self, markup: &str) {
        let ids: Vec<String> = ID_ATTR_RE
            .captures_iter(markup)
            .map(|caps| format!("#{}", &caps[1]))
            .collect();
        for id in ids {
            self.elements.entry(id).or_default();
        }
    }
}

impl RenderTarget for MemoryDocument {
    fn query(&self, selector: &str) -> bool {
        self.elements.contains_key(selector)
    }

    fn mount(&mut self, selector: &str, markup: &str) -> bool {
        let Some(element) = self.elements.get_mut(selector) else {
            return false;
        };
        element.markup = markup.to_string();
        self.register_ids(markup);
        true
    }

    fn insert_after(&mut self, anchor: &str, selector: &str, markup: &str) -> bool {
        let Some(pos) = self.order.iter().position(|s| s == anchor) else {
            return false;
        };
        if self.elements.contains_key(selector) {
            return false;
        }
        self.order.insert(pos + 1, selector.to_string());
        self.elements.insert(
            selector.to_string(),
            Element {
                markup: markup.to_string(),
                classes: BTreeSet::new(),
            },
        );
        self.register_ids(markup);
        true
    }

    fn set_class(&mut self, selector: &str, class: &str, on: bool) -> bool {
        let Some(element) = self.elements.get_mut(selector) else {
            return false;
        };
        if on {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        true
    }

    fn has_class(&self, selector: &str, class: &str) -> bool {
        self.elements
            .get(selector)
            .is_some_and(|e| e.classes.contains(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_requires_existing_element() {
        let mut doc = MemoryDocument::with_elements(["#blog-posts"]);
        assert!(doc.mount("#blog-posts", "<p>hi</p>"));
        assert_eq!(doc.markup("#blog-posts"), Some("<p>hi</p>"));
        assert!(!doc.mount("#recent-posts-container", "<p>hi</p>"));
    }

    #[test]
    fn inserted_markup_ids_become_queryable() {
        let mut doc = MemoryDocument::with_elements([".blog-header", "#blog-posts"]);
        assert!(!doc.query("#blog-search-input"));
        assert!(doc.insert_after(".blog-header", ".blog-search", r#"<input id="blog-search-input">"#));
        assert!(doc.query(".blog-search"));
        assert!(doc.query("#blog-search-input"));
        assert!(!doc.insert_after(".blog-header", ".blog-search", "again"));

        let dump = doc.dump();
        let search = dump.find(".blog-search").unwrap();
        let posts = dump.find("#blog-posts").unwrap_or(usize::MAX);
        assert!(search < posts);
    }

    #[test]
    fn every_mount_registers_its_ids() {
        let mut doc = MemoryDocument::with_elements(["#recent-posts-container"]);
        for slug in ["a", "b", "c"] {
            let markup = format!(r#"<div class="blog-preview-card" id="preview-{slug}"></div>"#);
            assert!(doc.mount("#recent-posts-container", &markup));
            assert!(doc.query(&format!("#preview-{slug}")));
        }
        assert!(doc.query("#preview-a"));
    }

    #[test]
    fn classes_toggle() {
        let mut doc = MemoryDocument::with_elements(["#nav-menu"]);
        assert!(doc.set_class("#nav-menu", "active", true));
        assert!(doc.has_class("#nav-menu", "active"));
        assert!(doc.set_class("#nav-menu", "active", false));
        assert!(!doc.has_class("#nav-menu", "active"));
        assert!(!doc.set_class("#hamburger", "active", true));
    }
}
