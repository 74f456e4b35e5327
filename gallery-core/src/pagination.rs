//! Navigation state over the loaded categories.
//!
//! The engine is the only owner of the current category, the 1-based sculpture
//! index and the focus flag. Other components go through its operations and
//! read its emissions.

use crate::error::{GalleryError, Result};
use crate::models::{Category, Sculpture};

/// Current place in the gallery. `sculpture` is 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub category: usize,
    pub sculpture: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// The previewed image changed. `generation` identifies this change so an
    /// image-load completion can be matched to it.
    PreviewChanged { url: String, generation: u64 },
}

#[derive(Debug)]
pub struct PaginationEngine {
    categories: Vec<Category>,
    selected: usize,
    sculpture_index: usize,
    sculpture_max: usize,
    focused: bool,
    generation: u64,
    events: Vec<NavEvent>,
}

impl Default for PaginationEngine {
    fn default() -> Self {
        PaginationEngine {
            categories: Vec::new(),
            selected: 0,
            sculpture_index: 1,
            sculpture_max: 0,
            focused: false,
            generation: 0,
            events: Vec::new(),
        }
    }
}

impl PaginationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all categories and start over at the first one, unfocused.
    pub fn load(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.selected = 0;
        self.sculpture_index = 1;
        self.sculpture_max = 0;
        self.focused = false;
        if !self.categories.is_empty() {
            // Index 0 exists, so this cannot fail.
            let _ = self.select_category(0, false);
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loaded(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn position(&self) -> Position {
        Position {
            category: self.selected,
            sculpture: self.sculpture_index,
        }
    }

    pub fn sculpture_max(&self) -> usize {
        self.sculpture_max
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.selected)
    }

    pub fn current_sculpture(&self) -> Option<&Sculpture> {
        self.selected_category()
            .and_then(|c| c.sculpture(self.sculpture_index))
    }

    /// The sculpture shown in detail view, if any. Always the current one.
    pub fn focused(&self) -> Option<&Sculpture> {
        if self.focused {
            self.current_sculpture()
        } else {
            None
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Fraction of the current category already seen, for the progress bar.
    pub fn progress(&self) -> f64 {
        if self.sculpture_max == 0 {
            0.0
        } else {
            self.sculpture_index as f64 / self.sculpture_max as f64
        }
    }

    /// Whether `advance` would move somewhere else. Wrapping counts as moving.
    pub fn can_advance(&self) -> bool {
        self.sculpture_max > 0 && (self.sculpture_max > 1 || self.categories.len() > 1)
    }

    /// Whether `retreat` would move somewhere else.
    pub fn can_retreat(&self) -> bool {
        self.can_advance()
    }

    pub fn preview_generation(&self) -> u64 {
        self.generation
    }

    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch category. Entering from the end lands on its last sculpture.
    pub fn select_category(&mut self, index: usize, enter_from_end: bool) -> Result<()> {
        let len = self.categories.len();
        let max = self
            .categories
            .get(index)
            .map(Category::len)
            .ok_or(GalleryError::Range { index, len })?;
        self.selected = index;
        self.sculpture_max = max;
        self.sculpture_index = if enter_from_end && max > 0 { max } else { 1 };
        log::debug!(
            "category {} selected at {}/{}",
            index,
            self.sculpture_index,
            self.sculpture_max
        );
        self.emit_preview();
        Ok(())
    }

    /// Next sculpture, or the first one of the next category.
    pub fn advance(&mut self) -> Result<()> {
        if !self.is_loaded() {
            return Ok(());
        }
        self.check_not_empty("advance")?;
        if self.sculpture_index < self.sculpture_max {
            self.sculpture_index += 1;
            self.emit_preview();
            Ok(())
        } else {
            let next = (self.selected + 1) % self.categories.len();
            self.select_category(next, false)
        }
    }

    /// Previous sculpture, or the last one of the previous category.
    pub fn retreat(&mut self) -> Result<()> {
        if !self.is_loaded() {
            return Ok(());
        }
        self.check_not_empty("retreat")?;
        if self.sculpture_index > 1 {
            self.sculpture_index -= 1;
            self.emit_preview();
            Ok(())
        } else {
            let len = self.categories.len();
            let prev = (self.selected + len - 1) % len;
            self.select_category(prev, true)
        }
    }

    /// Enter or leave detail view. Returns whether the engine is now focused.
    pub fn toggle_focus(&mut self) -> Result<bool> {
        if !self.is_loaded() {
            return Ok(false);
        }
        self.check_not_empty("toggle focus")?;
        self.focused = !self.focused;
        Ok(self.focused)
    }

    /// Leave detail view if it is active.
    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    /// Jump to an exact place, as when resuming a deep link.
    pub fn restore_position(&mut self, category: usize, sculpture: usize, focused: bool) -> Result<()> {
        let len = self.categories.len();
        let max = self
            .categories
            .get(category)
            .map(Category::len)
            .ok_or(GalleryError::Range { index: category, len })?;
        if sculpture == 0 || sculpture > max {
            return Err(GalleryError::InvariantViolation(format!(
                "sculpture {sculpture} outside 1..={max} in category {category}"
            )));
        }
        self.selected = category;
        self.sculpture_max = max;
        self.sculpture_index = sculpture;
        self.focused = focused;
        self.emit_preview();
        Ok(())
    }

    fn check_not_empty(&self, op: &str) -> Result<()> {
        if self.sculpture_max == 0 {
            let slug = self
                .selected_category()
                .map(|c| c.slug.as_str())
                .unwrap_or_default();
            log::error!("cannot {op}: category {slug:?} has no sculptures");
            return Err(GalleryError::InvariantViolation(format!(
                "category {slug:?} has no sculptures"
            )));
        }
        Ok(())
    }

    fn emit_preview(&mut self) {
        let Some(url) = self.current_sculpture().map(|s| s.featured_image_url.clone()) else {
            return;
        };
        self.generation += 1;
        self.events.push(NavEvent::PreviewChanged {
            url,
            generation: self.generation,
        });
    }
}
