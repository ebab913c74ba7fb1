use std::collections::BTreeMap;

use crate::target::RenderTarget;

/// Classes of elements that fade in when scrolled into view.
pub const REVEAL_SELECTORS: [&str; 3] = [".area-card", ".project-card", ".blog-preview-card"];
/// Minimum visible fraction that counts as "in view". The host shrinks the viewport by a
/// 50px bottom margin before reporting ratios.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Present once an element has faded in. Without it the stylesheet keeps the element at
/// opacity 0, shifted down 20px.
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Revealed,
}

impl Visibility {
    pub fn write<T: RenderTarget + ?Sized>(self, target: &mut T, selector: &str) -> bool {
        target.set_class(selector, VISIBLE_CLASS, self == Self::Revealed)
    }
}

/// One-way hidden → revealed tracking, keyed by element selector.
#[derive(Debug, Default)]
pub struct RevealTracker {
    elements: BTreeMap<String, Visibility>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `selector`. Re-registering a revealed element keeps it revealed.
    pub fn register(&mut self, selector: &str) -> Visibility {
        *self
            .elements
            .entry(selector.to_string())
            .or_insert(Visibility::Hidden)
    }

    /// Feed an intersection report. Returns `true` when this report reveals the element.
    pub fn on_intersect(&mut self, selector: &str, ratio: f64) -> bool {
        let Some(state) = self.elements.get_mut(selector) else {
            return false;
        };
        if *state == Visibility::Hidden && ratio >= REVEAL_THRESHOLD {
            *state = Visibility::Revealed;
            return true;
        }
        false
    }

    pub fn hidden_count(&self) -> usize {
        self.elements
            .values()
            .filter(|v| **v == Visibility::Hidden)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MemoryDocument;

    #[test]
    fn reveals_once_past_threshold() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.register(".area-card"), Visibility::Hidden);
        assert!(!tracker.on_intersect(".area-card", 0.05));
        assert_eq!(tracker.hidden_count(), 1);
        assert!(tracker.on_intersect(".area-card", 0.1));
        assert!(!tracker.on_intersect(".area-card", 0.9));
        assert!(!tracker.on_intersect(".area-card", 0.0));
        assert_eq!(tracker.hidden_count(), 0);
    }

    #[test]
    fn unregistered_elements_are_ignored() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.on_intersect(".project-card", 1.0));
        assert_eq!(tracker.hidden_count(), 0);
    }

    #[test]
    fn re_register_keeps_revealed() {
        let mut tracker = RevealTracker::new();
        tracker.register("#preview-a");
        tracker.on_intersect("#preview-a", 1.0);
        assert_eq!(tracker.register("#preview-a"), Visibility::Revealed);
        assert_eq!(tracker.hidden_count(), 0);
    }

    #[test]
    fn visibility_is_written_as_class() {
        let mut doc = MemoryDocument::with_elements([".area-card"]);
        assert!(Visibility::Revealed.write(&mut doc, ".area-card"));
        assert!(doc.has_class(".area-card", VISIBLE_CLASS));
        assert!(Visibility::Hidden.write(&mut doc, ".area-card"));
        assert!(!doc.has_class(".area-card", VISIBLE_CLASS));
        assert!(!Visibility::Revealed.write(&mut doc, ".project-card"));
    }
}
