pub const NAVBAR: &str = ".navbar";
const SCROLLED_PAST_PX: f64 = 50.0;

/// Whether a nav link with `href` is the active page for `path`.
pub fn is_active_link(href: &str, path: &str) -> bool {
    let current = path.strip_prefix('/').unwrap_or(path);
    href == current || (current.is_empty() && href == "index.html")
}

/// Scroll position for an in-page anchor link, or `None` when the browser should handle it.
///
/// A bare `#` is left alone, as is an anchor whose target is missing. The fixed header's
/// height is subtracted so the target is not hidden beneath it.
pub fn anchor_scroll_top(
    href: &str,
    target_top: Option<f64>,
    header_height: Option<f64>,
) -> Option<f64> {
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    let top = target_top?;
    Some(top - header_height.unwrap_or(0.0))
}

pub fn navbar_background(scroll_y: f64) -> &'static str {
    if scroll_y > SCROLLED_PAST_PX {
        "rgba(255,255,255,0.98)"
    } else {
        "rgba(255,255,255,0.95)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_link_matching() {
        assert!(is_active_link("blog.html", "/blog.html"));
        assert!(is_active_link("index.html", "/"));
        assert!(is_active_link("index.html", ""));
        assert!(!is_active_link("about.html", "/blog.html"));
    }

    #[test]
    fn anchor_scroll_compensates_for_header() {
        assert_eq!(anchor_scroll_top("#research", Some(900.0), Some(70.0)), Some(830.0));
        assert_eq!(anchor_scroll_top("#research", Some(900.0), None), Some(900.0));
        assert_eq!(anchor_scroll_top("#", Some(900.0), Some(70.0)), None);
        assert_eq!(anchor_scroll_top("#missing", None, Some(70.0)), None);
        assert_eq!(anchor_scroll_top("blog.html", Some(10.0), None), None);
    }

    #[test]
    fn navbar_background_switches_after_fifty_pixels() {
        assert_eq!(navbar_background(0.0), "rgba(255,255,255,0.95)");
        assert_eq!(navbar_background(50.0), "rgba(255,255,255,0.95)");
        assert_eq!(navbar_background(51.0), "rgba(255,255,255,0.98)");
    }
}
