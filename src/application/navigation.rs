//! Navigation links with exact-match active detection.

use crate::domain::navigation::NavEntry;
use crate::presentation::views::{NavigationLinkView, NavigationView};

/// A link is active only when its href equals the current path byte for byte:
/// no prefix matching and no trailing-slash normalisation.
pub fn is_active(href: &str, current_path: &str) -> bool {
    href == current_path
}

pub fn link_views(entries: &[NavEntry], current_path: &str) -> Vec<NavigationLinkView> {
    entries
        .iter()
        .map(|entry| NavigationLinkView {
            label: entry.label.to_string(),
            href: entry.href.to_string(),
            is_active: is_active(entry.href, current_path),
        })
        .collect()
}

pub fn navigation_view(entries: &[NavEntry], current_path: &str) -> NavigationView {
    NavigationView {
        entries: link_views(entries, current_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::PRIMARY_NAVIGATION;

    #[test]
    fn exact_match_marks_entry_active() {
        let view = navigation_view(PRIMARY_NAVIGATION, "/blog");
        let active: Vec<_> = view
            .entries
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(active, vec!["Blog"]);
    }

    #[test]
    fn trailing_slash_is_not_normalised() {
        let entry = NavEntry {
            label: "Blog",
            href: "/blog/",
        };
        let view = navigation_view(&[entry], "/blog");
        assert!(!view.entries[0].is_active);
    }

    #[test]
    fn nested_paths_do_not_activate_parents() {
        let view = navigation_view(PRIMARY_NAVIGATION, "/blog/some-post");
        assert!(view.entries.iter().all(|entry| !entry.is_active));
    }

    #[test]
    fn order_is_preserved() {
        let view = navigation_view(PRIMARY_NAVIGATION, "/");
        let labels: Vec<_> = view.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "Blog"]);
        assert!(view.entries[0].is_active);
    }
}
