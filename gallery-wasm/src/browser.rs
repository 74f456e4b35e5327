//! Browser implementations of the core's host traits.

use gallery_core::{HistoryBackend, Theme, ThemeProvider, ViewportQuery};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// `history.pushState` / `location.pathname`.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        BrowserHistory { window }
    }
}

impl HistoryBackend for BrowserHistory {
    fn push(&mut self, path: &str, title: &str) {
        let Ok(history) = self.window.history() else {
            return;
        };
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, title, Some(path)) {
            log::warn!("pushState to {path} failed: {err:?}");
        }
    }

    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }
}

/// `prefers-color-scheme` media queries.
pub struct MediaTheme {
    window: Window,
}

impl MediaTheme {
    pub fn new(window: Window) -> Self {
        MediaTheme { window }
    }

    fn matches(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .is_some_and(|mql| mql.matches())
    }
}

impl ThemeProvider for MediaTheme {
    fn preferred(&self) -> Option<Theme> {
        if self.matches("(prefers-color-scheme: dark)") {
            Some(Theme::Night)
        } else if self.matches("(prefers-color-scheme: light)") {
            Some(Theme::Day)
        } else {
            None
        }
    }
}

pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        WindowViewport { window }
    }

    fn height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

impl ViewportQuery for WindowViewport {
    fn width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn is_visible(&self, element_id: &str) -> bool {
        let Some(el) = self
            .window
            .document()
            .and_then(|d| d.get_element_by_id(element_id))
        else {
            return false;
        };
        let rect = el.get_bounding_client_rect();
        rect.top() >= 0.0
            && rect.left() >= 0.0
            && rect.bottom() <= self.height()
            && rect.right() <= self.width()
    }
}
