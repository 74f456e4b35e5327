//! List/detail switching.
//!
//! A toggle happens in two steps so the host can fade the current view out
//! before the content changes: [`FocusToggle::begin`] hands back the
//! transition to animate, [`FocusToggle::commit`] applies it.

use crate::autoplay::Autoplay;
use crate::error::Result;
use crate::history::{HistoryBackend, HistorySync};
use crate::pagination::PaginationEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Category list with the paginated preview.
    List,
    /// One sculpture's full content.
    Detail,
}

impl View {
    pub fn of(engine: &PaginationEngine) -> Self {
        if engine.is_focused() {
            View::Detail
        } else {
            View::List
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransition {
    pub from: View,
    pub to: View,
    pub fade_ms: u32,
}

#[derive(Debug)]
pub struct FocusToggle {
    fade_ms: u32,
    pending: Option<ViewTransition>,
}

impl FocusToggle {
    pub fn new(fade_ms: u32) -> Self {
        FocusToggle {
            fade_ms,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<ViewTransition> {
        self.pending
    }

    /// Start a toggle. `None` while another toggle is still fading or when
    /// there is nothing to focus.
    pub fn begin(&mut self, engine: &PaginationEngine) -> Option<ViewTransition> {
        if self.pending.is_some() || engine.current_sculpture().is_none() {
            return None;
        }
        let from = View::of(engine);
        let to = match from {
            View::List => View::Detail,
            View::Detail => View::List,
        };
        let transition = ViewTransition {
            from,
            to,
            fade_ms: self.fade_ms,
        };
        self.pending = Some(transition);
        Some(transition)
    }

    /// Flip focus, pause or release autoplay accordingly and publish the new path.
    /// Without a begun toggle (never started, or cancelled) nothing changes.
    pub fn commit<H: HistoryBackend>(
        &mut self,
        engine: &mut PaginationEngine,
        autoplay: &mut Autoplay,
        history: &mut HistorySync<H>,
        now_ms: u64,
    ) -> Result<View> {
        if self.pending.take().is_none() {
            return Ok(View::of(engine));
        }
        let focused = engine.toggle_focus()?;
        autoplay.set_detail(focused, now_ms);
        if let Some(category) = engine.selected_category() {
            history.publish(category, engine.focused());
        }
        Ok(View::of(engine))
    }

    /// Drop a begun toggle without applying it, e.g. when the component is
    /// torn down mid-fade.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
