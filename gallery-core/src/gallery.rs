//! The gallery component: pagination, autoplay, focus and history wired
//! together behind user-level operations.

use crate::autoplay::{Autoplay, AutoplayState, TickOutcome};
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::focus::{FocusToggle, View, ViewTransition};
use crate::history::{HistoryBackend, HistorySync};
use crate::models::Category;
use crate::pagination::{NavEvent, PaginationEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Content could not be loaded; the host shows a retry affordance.
    Failed(String),
}

/// Keyboard shortcuts understood by the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    PreviousCategory,
    NextCategory,
    Retreat,
    Advance,
    TogglePause,
    LeaveDetail,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(KeyCommand::PreviousCategory),
            "ArrowDown" => Some(KeyCommand::NextCategory),
            "ArrowLeft" => Some(KeyCommand::Retreat),
            "ArrowRight" => Some(KeyCommand::Advance),
            " " | "Spacebar" => Some(KeyCommand::TogglePause),
            "Escape" | "Esc" => Some(KeyCommand::LeaveDetail),
            _ => None,
        }
    }
}

pub struct Gallery<H> {
    config: GalleryConfig,
    engine: PaginationEngine,
    autoplay: Autoplay,
    focus: FocusToggle,
    history: HistorySync<H>,
    load_state: LoadState,
}

impl<H: HistoryBackend> Gallery<H> {
    pub fn new(config: GalleryConfig, history: H) -> Self {
        let history = HistorySync::new(history, config.route(), config.slug_separator);
        Gallery {
            engine: PaginationEngine::new(),
            autoplay: Autoplay::new(config.autoplay_interval_ms),
            focus: FocusToggle::new(config.fade_ms),
            history,
            load_state: LoadState::Loading,
            config,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn engine(&self) -> &PaginationEngine {
        &self.engine
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn history(&self) -> &HistorySync<H> {
        &self.history
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn view(&self) -> View {
        View::of(&self.engine)
    }

    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        self.engine.drain_events()
    }

    /// A (re)fetch is starting.
    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Apply the outcome of a fetch.
    ///
    /// On success the deep link in the current location is restored, the walk
    /// starts and the resulting path is published. On failure the gallery is
    /// left empty and the walk faulted, so nothing moves until a retry succeeds.
    pub fn load(&mut self, result: Result<Vec<Category>>, now_ms: u64) {
        let categories = match result {
            Ok(categories) => categories,
            Err(err) => {
                log::warn!("gallery content unavailable: {err}");
                self.engine.load(Vec::new());
                self.focus.cancel();
                self.autoplay.fault();
                self.load_state = LoadState::Failed(err.to_string());
                return;
            }
        };
        self.engine.load(categories);
        self.load_state = LoadState::Ready;
        self.focus.cancel();

        let path = self.history.current_path();
        let restored = self.history.restore(&path, self.engine.categories());
        if let Some(miss) = &restored.miss {
            log::debug!("deep link {path:?} not fully restored: {miss}");
        }
        if self.engine.is_loaded()
            && let Err(err) = self.engine.restore_position(
                restored.category_index,
                restored.sculpture_index,
                restored.focused,
            )
        {
            // Category 0 without sculptures; stay where load() put us.
            log::warn!("could not restore {path:?}: {err}");
        }

        self.autoplay.set_detail(self.engine.is_focused(), now_ms);
        if self.autoplay.is_faulted() {
            self.autoplay.clear_fault(now_ms);
        }
        if self.config.autoplay && self.engine.is_loaded() {
            self.autoplay.start(now_ms);
        }
        self.publish();
    }

    /// User asked for the next sculpture.
    pub fn next(&mut self, now_ms: u64) -> Result<()> {
        self.user_navigation(now_ms, PaginationEngine::advance)
    }

    /// User asked for the previous sculpture.
    pub fn prev(&mut self, now_ms: u64) -> Result<()> {
        self.user_navigation(now_ms, PaginationEngine::retreat)
    }

    /// User picked a category from the list. Picking the current one does nothing.
    pub fn select_category(&mut self, index: usize, now_ms: u64) -> Result<()> {
        if !self.engine.is_loaded() || self.engine.position().category == index {
            return Ok(());
        }
        self.user_navigation(now_ms, |engine| engine.select_category(index, false))
    }

    /// Next category from its start, wrapping. Ignored in detail view.
    pub fn next_category(&mut self, now_ms: u64) -> Result<()> {
        if !self.engine.is_loaded() || self.engine.is_focused() {
            return Ok(());
        }
        let next = (self.engine.position().category + 1) % self.engine.categories().len();
        self.user_navigation(now_ms, |engine| engine.select_category(next, false))
    }

    /// Previous category from its start, wrapping. Ignored in detail view.
    pub fn prev_category(&mut self, now_ms: u64) -> Result<()> {
        if !self.engine.is_loaded() || self.engine.is_focused() {
            return Ok(());
        }
        let len = self.engine.categories().len();
        let prev = (self.engine.position().category + len - 1) % len;
        self.user_navigation(now_ms, |engine| engine.select_category(prev, false))
    }

    /// First half of a list/detail toggle; animate the returned transition
    /// then call [`Self::commit_toggle_focus`]. Nothing after a disconnect.
    pub fn begin_toggle_focus(&mut self) -> Option<ViewTransition> {
        if self.autoplay.state() == AutoplayState::Stopped {
            return None;
        }
        self.focus.begin(&self.engine)
    }

    pub fn commit_toggle_focus(&mut self, now_ms: u64) -> Result<View> {
        let result = self
            .focus
            .commit(&mut self.engine, &mut self.autoplay, &mut self.history, now_ms);
        if result.is_err() {
            self.autoplay.fault();
        }
        result
    }

    /// Toggle without waiting for an animation.
    pub fn toggle_focus(&mut self, now_ms: u64) -> Result<View> {
        if self.begin_toggle_focus().is_none() {
            return Ok(self.view());
        }
        self.commit_toggle_focus(now_ms)
    }

    pub fn pointer_enter(&mut self) -> AutoplayState {
        self.autoplay.pointer_enter()
    }

    pub fn pointer_leave(&mut self, now_ms: u64) -> AutoplayState {
        self.autoplay.pointer_leave(now_ms)
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> AutoplayState {
        self.autoplay.toggle_pause(now_ms)
    }

    /// Timer callback. Publishes the new path when the walk advanced.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickOutcome> {
        let outcome = self.autoplay.tick(now_ms, &mut self.engine)?;
        if let TickOutcome::Advanced(_) = outcome {
            self.publish();
        }
        Ok(outcome)
    }

    /// The preview image for `generation` is done loading.
    pub fn preview_settled(&mut self, generation: u64) {
        self.autoplay.settle(generation);
    }

    pub fn handle_key(&mut self, command: KeyCommand, now_ms: u64) -> Result<()> {
        match command {
            KeyCommand::PreviousCategory => self.prev_category(now_ms),
            KeyCommand::NextCategory => self.next_category(now_ms),
            KeyCommand::Retreat => self.prev(now_ms),
            KeyCommand::Advance => self.next(now_ms),
            KeyCommand::TogglePause => {
                self.toggle_pause(now_ms);
                Ok(())
            }
            KeyCommand::LeaveDetail => {
                if self.engine.is_focused() {
                    self.toggle_focus(now_ms)?;
                }
                Ok(())
            }
        }
    }

    /// Component teardown: the walk stops for good and pending toggles are dropped.
    pub fn disconnect(&mut self) {
        self.focus.cancel();
        self.autoplay.stop();
    }

    fn user_navigation(
        &mut self,
        now_ms: u64,
        op: impl FnOnce(&mut PaginationEngine) -> Result<()>,
    ) -> Result<()> {
        if self.autoplay.state() == AutoplayState::Stopped {
            return Ok(());
        }
        if let Err(err) = op(&mut self.engine) {
            if matches!(err, GalleryError::InvariantViolation(_)) {
                self.autoplay.fault();
            }
            return Err(err);
        }
        self.autoplay.supersede(now_ms);
        self.publish();
        Ok(())
    }

    fn publish(&mut self) {
        if let Some(category) = self.engine.selected_category() {
            self.history.publish(category, self.engine.focused());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::models::Sculpture;
    use crate::pagination::Position;

    fn categories() -> Vec<Category> {
        ["wood", "metal", "stone"]
            .iter()
            .map(|slug| Category {
                name: slug.to_string(),
                slug: slug.to_string(),
                sculptures: (1..=2)
                    .map(|i| Sculpture {
                        title: format!("{slug} {i}"),
                        featured_image_url: format!("https://img.test/{slug}{i}.jpg"),
                        ..Default::default()
                    })
                    .collect(),
            })
            .collect()
    }

    fn gallery(path: &str) -> Gallery<MemoryHistory> {
        let config = GalleryConfig {
            autoplay_interval_ms: 1_000,
            ..GalleryConfig::default()
        };
        let mut g = Gallery::new(config, MemoryHistory::new(path));
        g.load(Ok(categories()), 0);
        g
    }

    #[test]
    fn load_publishes_first_category() {
        let g = gallery("/");
        assert_eq!(g.load_state(), &LoadState::Ready);
        assert_eq!(g.history().current_path(), "/home/wood");
        assert_eq!(g.autoplay().state(), AutoplayState::Running);
    }

    #[test]
    fn load_restores_focused_deep_link() {
        let g = gallery("/home/metal/metal-2");
        assert_eq!(g.engine().position(), Position { category: 1, sculpture: 2 });
        assert_eq!(g.view(), View::Detail);
        assert_eq!(g.autoplay().state(), AutoplayState::Paused);
        assert_eq!(g.history().backend().entries().len(), 0);
    }

    #[test]
    fn failed_load_leaves_navigation_inert() {
        let mut g = Gallery::new(GalleryConfig::default(), MemoryHistory::new("/"));
        g.load(Err(GalleryError::Network("offline".into())), 0);
        assert_eq!(
            g.load_state(),
            &LoadState::Failed("network error: offline".into())
        );
        g.next(1).unwrap();
        g.next_category(1).unwrap();
        g.select_category(1, 1).unwrap();
        assert_eq!(g.tick(10_000), Ok(TickOutcome::Inactive));
        assert!(g.history().backend().entries().is_empty());

        g.begin_load();
        g.load(Ok(categories()), 20_000);
        assert_eq!(g.load_state(), &LoadState::Ready);
        assert_eq!(g.history().current_path(), "/home/wood");
    }

    #[test]
    fn failed_reload_halts_a_running_walk() {
        let mut g = gallery("/home/metal/metal-2");
        g.toggle_focus(0).unwrap();
        assert_eq!(g.autoplay().state(), AutoplayState::Running);

        g.begin_load();
        g.load(Err(GalleryError::Network("offline".into())), 500);
        assert_eq!(g.autoplay().state(), AutoplayState::Paused);
        assert!(!g.engine().is_loaded());
        assert_eq!(g.tick(5_000), Ok(TickOutcome::Inactive));

        g.load(Ok(categories()), 6_000);
        assert_eq!(g.autoplay().state(), AutoplayState::Running);
    }

    #[test]
    fn space_restarts_a_halted_walk() {
        let mut cats = categories();
        cats[1].sculptures.clear();
        let config = GalleryConfig {
            autoplay_interval_ms: 1_000,
            ..GalleryConfig::default()
        };
        let mut g = Gallery::new(config, MemoryHistory::new("/"));
        g.load(Ok(cats), 0);
        g.tick(1_000).unwrap();
        g.preview_settled(g.engine().preview_generation());
        g.tick(2_000).unwrap();
        assert_eq!(g.engine().position(), Position { category: 1, sculpture: 1 });
        assert!(g.tick(3_000).is_err());
        assert!(g.autoplay().is_faulted());

        g.select_category(2, 3_100).unwrap();
        g.handle_key(KeyCommand::TogglePause, 3_200).unwrap();
        assert_eq!(g.autoplay().state(), AutoplayState::Running);
        assert!(matches!(g.tick(4_100), Ok(TickOutcome::Advanced(_))));
        assert_eq!(g.engine().position(), Position { category: 2, sculpture: 2 });
    }

    #[test]
    fn user_navigation_supersedes_the_walk() {
        let mut g = gallery("/");
        g.tick(1_000).unwrap();
        assert!(g.autoplay().is_in_flight());
        g.next(1_200).unwrap();
        assert!(!g.autoplay().is_in_flight());
        assert_eq!(g.engine().position(), Position { category: 1, sculpture: 1 });
        assert_eq!(g.tick(2_000), Ok(TickOutcome::NotDue));
        assert_eq!(g.history().current_path(), "/home/metal");
    }

    #[test]
    fn category_keys_wrap_and_respect_detail_view() {
        let mut g = gallery("/");
        g.handle_key(KeyCommand::PreviousCategory, 0).unwrap();
        assert_eq!(g.engine().position(), Position { category: 2, sculpture: 1 });
        g.handle_key(KeyCommand::NextCategory, 0).unwrap();
        assert_eq!(g.engine().position().category, 0);

        g.toggle_focus(0).unwrap();
        g.handle_key(KeyCommand::NextCategory, 0).unwrap();
        assert_eq!(g.engine().position().category, 0);
        g.handle_key(KeyCommand::Advance, 0).unwrap();
        assert_eq!(g.history().current_path(), "/home/wood/wood-2");
        g.handle_key(KeyCommand::LeaveDetail, 0).unwrap();
        assert_eq!(g.view(), View::List);
    }

    #[test]
    fn selecting_current_category_is_a_noop() {
        let mut g = gallery("/");
        g.next(0).unwrap();
        g.select_category(0, 0).unwrap();
        assert_eq!(g.engine().position(), Position { category: 0, sculpture: 2 });
        assert_eq!(
            g.select_category(7, 0),
            Err(GalleryError::Range { index: 7, len: 3 })
        );
    }

    #[test]
    fn space_toggles_pause() {
        let mut g = gallery("/");
        g.handle_key(KeyCommand::TogglePause, 0).unwrap();
        assert_eq!(g.autoplay().state(), AutoplayState::Paused);
        g.handle_key(KeyCommand::TogglePause, 0).unwrap();
        assert_eq!(g.autoplay().state(), AutoplayState::Running);
    }

    #[test]
    fn disconnect_freezes_state() {
        let mut g = gallery("/");
        g.disconnect();
        g.next(10).unwrap();
        assert_eq!(g.tick(50_000), Ok(TickOutcome::Inactive));
        assert_eq!(g.engine().position(), Position { category: 0, sculpture: 1 });
    }

    #[test]
    fn focus_toggle_is_ignored_after_disconnect() {
        let mut g = gallery("/");
        let pushed = g.history().backend().entries().len();
        g.disconnect();
        assert_eq!(g.begin_toggle_focus(), None);
        assert_eq!(g.toggle_focus(10), Ok(View::List));
        g.handle_key(KeyCommand::LeaveDetail, 20).unwrap();
        assert!(!g.engine().is_focused());
        assert_eq!(g.history().backend().entries().len(), pushed);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowRight"), Some(KeyCommand::Advance));
        assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::TogglePause));
        assert_eq!(KeyCommand::from_key("a"), None);
    }
}
