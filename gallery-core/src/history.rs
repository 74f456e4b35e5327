//! Mirrors the navigation state into the location path and back.

use crate::error::GalleryError;
use crate::models::{Category, Sculpture};
use crate::slug::{gallery_path, parse_path};

/// Non-reloading access to the location. The browser implementation wraps
/// `history.pushState`.
pub trait HistoryBackend {
    fn push(&mut self, path: &str, title: &str);
    fn current_path(&self) -> String;
}

/// Navigation state recovered from a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restored {
    pub category_index: usize,
    pub sculpture_index: usize,
    pub focused: bool,
    /// Set when part of the path did not match anything and a default was used.
    pub miss: Option<GalleryError>,
}

impl Default for Restored {
    fn default() -> Self {
        Restored {
            category_index: 0,
            sculpture_index: 1,
            focused: false,
            miss: None,
        }
    }
}

#[derive(Debug)]
pub struct HistorySync<H> {
    backend: H,
    default_route: String,
    separator: char,
}

impl<H: HistoryBackend> HistorySync<H> {
    pub fn new(backend: H, default_route: &str, separator: char) -> Self {
        HistorySync {
            backend,
            default_route: default_route.trim_matches('/').to_string(),
            separator,
        }
    }

    pub fn backend(&self) -> &H {
        &self.backend
    }

    pub fn current_path(&self) -> String {
        self.backend.current_path()
    }

    pub fn path_for(&self, category: &Category, sculpture: Option<&Sculpture>) -> String {
        let sculpture_slug = sculpture.map(|s| s.slug(self.separator));
        gallery_path(&self.default_route, &category.slug, sculpture_slug.as_deref())
    }

    /// Push the path for the given state unless it is already current.
    /// Returns the published path.
    pub fn publish(&mut self, category: &Category, sculpture: Option<&Sculpture>) -> String {
        let path = self.path_for(category, sculpture);
        if self.backend.current_path() != path {
            let title = sculpture.map_or(category.name.as_str(), |s| s.title.as_str());
            self.backend.push(&path, title);
        }
        path
    }

    /// Resolve a path against the loaded categories. Unknown slugs fall back
    /// to the first category, unfocused.
    pub fn restore(&self, path: &str, categories: &[Category]) -> Restored {
        let parsed = parse_path(path, &self.default_route);
        let Some(category_slug) = parsed.category_slug else {
            return Restored::default();
        };
        let Some(category_index) = categories.iter().position(|c| c.slug == category_slug) else {
            log::debug!("deep link names unknown category {category_slug:?}");
            return Restored {
                miss: Some(GalleryError::UnknownSlug(category_slug)),
                ..Restored::default()
            };
        };
        let Some(sculpture_slug) = parsed.sculpture_slug else {
            return Restored {
                category_index,
                ..Restored::default()
            };
        };
        match categories[category_index].position_of(&sculpture_slug, self.separator) {
            Some(sculpture_index) => Restored {
                category_index,
                sculpture_index,
                focused: true,
                miss: None,
            },
            None => {
                log::debug!("deep link names unknown sculpture {sculpture_slug:?}");
                Restored {
                    category_index,
                    miss: Some(GalleryError::UnknownSlug(sculpture_slug)),
                    ..Restored::default()
                }
            }
        }
    }
}

/// In-memory history, for hosts without a browser location.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<(String, String)>,
    initial: String,
}

impl MemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        MemoryHistory {
            entries: Vec::new(),
            initial: initial_path.to_string(),
        }
    }

    /// Every pushed `(path, title)`, oldest first.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&mut self, path: &str, title: &str) {
        self.entries.push((path.to_string(), title.to_string()));
    }

    fn current_path(&self) -> String {
        self.entries
            .last()
            .map(|(p, _)| p.clone())
            .unwrap_or_else(|| self.initial.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        let s = |t: &str| Sculpture {
            title: t.to_string(),
            ..Default::default()
        };
        vec![
            Category {
                name: "Bois".into(),
                slug: "bois".into(),
                sculptures: vec![s("Chêne")],
            },
            Category {
                name: "Metal works".into(),
                slug: "metal-works".into(),
                sculptures: vec![s("Grey Owl"), s("Red Bird")],
            },
        ]
    }

    fn sync(initial: &str) -> HistorySync<MemoryHistory> {
        HistorySync::new(MemoryHistory::new(initial), "home", '-')
    }

    #[test]
    fn publish_skips_duplicate_paths() {
        let cats = categories();
        let mut h = sync("/");
        assert_eq!(h.publish(&cats[1], None), "/home/metal-works");
        assert_eq!(h.publish(&cats[1], None), "/home/metal-works");
        h.publish(&cats[1], cats[1].sculpture(2));
        assert_eq!(
            h.backend().entries(),
            &[
                ("/home/metal-works".to_string(), "Metal works".to_string()),
                ("/home/metal-works/red-bird".to_string(), "Red Bird".to_string()),
            ]
        );
    }

    #[test]
    fn restore_focused_sculpture() {
        let r = sync("/").restore("/home/metal-works/red-bird", &categories());
        assert_eq!(
            r,
            Restored {
                category_index: 1,
                sculpture_index: 2,
                focused: true,
                miss: None
            }
        );
    }

    #[test]
    fn restore_accented_title() {
        let r = sync("/").restore("/home/bois/chene", &categories());
        assert_eq!((r.category_index, r.sculpture_index, r.focused), (0, 1, true));
    }

    #[test]
    fn restore_unknown_category_falls_back() {
        let r = sync("/").restore("/home/does-not-exist", &categories());
        assert_eq!((r.category_index, r.sculpture_index, r.focused), (0, 1, false));
        assert_eq!(r.miss, Some(GalleryError::UnknownSlug("does-not-exist".into())));
    }

    #[test]
    fn restore_unknown_sculpture_keeps_category() {
        let r = sync("/").restore("/home/metal-works/blue-cat", &categories());
        assert_eq!((r.category_index, r.sculpture_index, r.focused), (1, 1, false));
        assert!(r.miss.is_some());
    }

    #[test]
    fn restore_empty_path_is_default() {
        assert_eq!(sync("/").restore("/home", &categories()), Restored::default());
        assert_eq!(sync("/").restore("/home/x", &[]).category_index, 0);
    }
}
