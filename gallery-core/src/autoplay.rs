//! Autoplay ("walk") scheduling.
//!
//! The scheduler owns no timer. The host calls [`Autoplay::tick`] with the
//! current time; ticks only act on boundaries `anchor + k * interval`. Pause
//! requests from different sources are tracked separately so that, for
//! example, leaving the detail view does not undo an explicit pause.

use crate::error::Result;
use crate::pagination::{PaginationEngine, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    Idle,
    Running,
    Paused,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Inactive,
    /// Running, but the next boundary is still ahead.
    NotDue,
    /// A boundary passed while the previous advance's preview was still loading.
    Dropped,
    /// The engine advanced to this position.
    Advanced(Position),
}

#[derive(Debug)]
pub struct Autoplay {
    interval_ms: u64,
    started: bool,
    stopped: bool,
    requested_pause: bool,
    hovered: bool,
    detail: bool,
    faulted: bool,
    anchor_ms: u64,
    next_due_ms: u64,
    in_flight: Option<u64>,
}

impl Autoplay {
    pub fn new(interval_ms: u64) -> Self {
        Autoplay {
            interval_ms: interval_ms.max(1),
            started: false,
            stopped: false,
            requested_pause: false,
            hovered: false,
            detail: false,
            faulted: false,
            anchor_ms: 0,
            next_due_ms: 0,
            in_flight: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn state(&self) -> AutoplayState {
        if self.stopped {
            AutoplayState::Stopped
        } else if !self.started {
            AutoplayState::Idle
        } else if self.requested_pause || self.hovered || self.detail || self.faulted {
            AutoplayState::Paused
        } else {
            AutoplayState::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == AutoplayState::Running
    }

    /// Whether the user asked for the walk to stay paused.
    pub fn is_pause_requested(&self) -> bool {
        self.requested_pause
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Time of the next boundary, if any tick could act on it.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.is_running().then_some(self.next_due_ms)
    }

    /// Idle -> Running. Later calls only restart the countdown.
    pub fn start(&mut self, now_ms: u64) -> AutoplayState {
        if self.stopped {
            return self.state();
        }
        self.started = true;
        self.restart_countdown(now_ms);
        self.state()
    }

    /// Teardown. Terminal: nothing advances afterwards.
    pub fn stop(&mut self) -> AutoplayState {
        self.stopped = true;
        self.in_flight = None;
        log::debug!("autoplay stopped");
        self.state()
    }

    pub fn pause(&mut self) -> AutoplayState {
        self.requested_pause = true;
        self.state()
    }

    /// Explicit resume. Also clears a fault so the user can restart a halted walk.
    pub fn resume(&mut self, now_ms: u64) -> AutoplayState {
        self.requested_pause = false;
        self.faulted = false;
        self.realign(now_ms);
        self.state()
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> AutoplayState {
        if self.requested_pause || self.faulted {
            self.resume(now_ms)
        } else {
            self.pause()
        }
    }

    pub fn pointer_enter(&mut self) -> AutoplayState {
        self.hovered = true;
        self.state()
    }

    pub fn pointer_leave(&mut self, now_ms: u64) -> AutoplayState {
        self.hovered = false;
        self.realign(now_ms);
        self.state()
    }

    /// Detail view forces a pause; leaving it restores whatever was requested.
    pub fn set_detail(&mut self, detail: bool, now_ms: u64) -> AutoplayState {
        self.detail = detail;
        if !detail {
            self.realign(now_ms);
        }
        self.state()
    }

    /// Record a failed advance; the walk stays paused until [`Self::clear_fault`].
    pub fn fault(&mut self) -> AutoplayState {
        self.faulted = true;
        self.in_flight = None;
        self.state()
    }

    pub fn clear_fault(&mut self, now_ms: u64) -> AutoplayState {
        self.faulted = false;
        self.realign(now_ms);
        self.state()
    }

    /// A user navigation happened: drop any in-flight tick and count a full
    /// interval from now.
    pub fn supersede(&mut self, now_ms: u64) {
        if self.in_flight.take().is_some() {
            log::debug!("in-flight autoplay tick superseded by user navigation");
        }
        self.restart_countdown(now_ms);
    }

    /// The preview for `generation` finished loading (or failed to).
    pub fn settle(&mut self, generation: u64) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Advance the engine if a boundary has been reached.
    ///
    /// Several skipped boundaries count as one. An engine error faults the
    /// scheduler and is returned to the caller.
    pub fn tick(&mut self, now_ms: u64, engine: &mut PaginationEngine) -> Result<TickOutcome> {
        if !self.is_running() || !engine.is_loaded() {
            return Ok(TickOutcome::Inactive);
        }
        if now_ms < self.next_due_ms {
            return Ok(TickOutcome::NotDue);
        }
        let skipped = (now_ms - self.next_due_ms) / self.interval_ms;
        self.next_due_ms += (skipped + 1) * self.interval_ms;

        if self.in_flight.is_some() {
            log::debug!("autoplay tick dropped, previous preview still loading");
            return Ok(TickOutcome::Dropped);
        }
        let before = engine.preview_generation();
        if let Err(err) = engine.advance() {
            log::error!("autoplay halted: {err}");
            self.fault();
            return Err(err);
        }
        let after = engine.preview_generation();
        if after != before {
            self.in_flight = Some(after);
        }
        Ok(TickOutcome::Advanced(engine.position()))
    }

    fn restart_countdown(&mut self, now_ms: u64) {
        self.anchor_ms = now_ms;
        self.next_due_ms = now_ms + self.interval_ms;
    }

    /// Move the next boundary forward past `now_ms` if pausing let it slip by,
    /// keeping it on the anchor's grid.
    fn realign(&mut self, now_ms: u64) {
        if !self.started || self.next_due_ms > now_ms {
            return;
        }
        let elapsed = now_ms - self.anchor_ms;
        let k = elapsed / self.interval_ms + 1;
        self.next_due_ms = self.anchor_ms + k * self.interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Sculpture};

    const T: u64 = 1_000;

    fn engine() -> PaginationEngine {
        let mut e = PaginationEngine::new();
        e.load(vec![Category {
            name: "a".into(),
            slug: "a".into(),
            sculptures: (0..5)
                .map(|i| Sculpture {
                    title: format!("s{i}"),
                    featured_image_url: format!("u{i}"),
                    ..Default::default()
                })
                .collect(),
        }]);
        e
    }

    fn settle_latest(a: &mut Autoplay, e: &PaginationEngine) {
        a.settle(e.preview_generation());
    }

    #[test]
    fn idle_until_started() {
        let mut a = Autoplay::new(T);
        let mut e = engine();
        assert_eq!(a.state(), AutoplayState::Idle);
        assert_eq!(a.tick(5 * T, &mut e), Ok(TickOutcome::Inactive));
        assert_eq!(a.start(0), AutoplayState::Running);
        assert_eq!(a.tick(T - 1, &mut e), Ok(TickOutcome::NotDue));
        assert!(matches!(a.tick(T, &mut e), Ok(TickOutcome::Advanced(_))));
    }

    #[test]
    fn ticks_while_in_flight_are_dropped() {
        let mut a = Autoplay::new(T);
        let mut e = engine();
        a.start(0);
        a.tick(T, &mut e).unwrap();
        assert!(a.is_in_flight());
        assert_eq!(a.tick(2 * T, &mut e), Ok(TickOutcome::Dropped));
        assert_eq!(e.position().sculpture, 2);
        settle_latest(&mut a, &e);
        assert!(matches!(a.tick(3 * T, &mut e), Ok(TickOutcome::Advanced(_))));
        assert_eq!(e.position().sculpture, 3);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut a = Autoplay::new(T);
        let mut e = engine();
        a.start(0);
        a.tick(T, &mut e).unwrap();
        a.settle(e.preview_generation() - 1);
        assert!(a.is_in_flight());
    }

    #[test]
    fn skipped_boundaries_advance_once() {
        let mut a = Autoplay::new(T);
        let mut e = engine();
        a.start(0);
        a.tick(3 * T + 10, &mut e).unwrap();
        assert_eq!(e.position().sculpture, 2);
        assert_eq!(a.next_due_ms(), Some(4 * T));
    }

    #[test]
    fn pause_sources_are_independent() {
        let mut a = Autoplay::new(T);
        a.start(0);
        a.pause();
        a.set_detail(true, 0);
        a.set_detail(false, 0);
        assert_eq!(a.state(), AutoplayState::Paused);
        a.pointer_enter();
        a.resume(0);
        assert_eq!(a.state(), AutoplayState::Paused);
        a.pointer_leave(0);
        assert_eq!(a.state(), AutoplayState::Running);
    }

    #[test]
    fn resume_keeps_the_boundary_grid() {
        let mut a = Autoplay::new(T);
        a.start(0);
        a.pause();
        a.resume(T / 2);
        assert_eq!(a.next_due_ms(), Some(T));
        a.pause();
        a.resume(2 * T + 300);
        assert_eq!(a.next_due_ms(), Some(3 * T));
    }

    #[test]
    fn supersede_restarts_countdown_and_cancels_flight() {
        let mut a = Autoplay::new(T);
        let mut e = engine();
        a.start(0);
        a.tick(T, &mut e).unwrap();
        a.supersede(T + 400);
        assert!(!a.is_in_flight());
        assert_eq!(a.next_due_ms(), Some(2 * T + 400));
        assert_eq!(a.tick(2 * T, &mut e), Ok(TickOutcome::NotDue));
    }

    #[test]
    fn engine_failure_faults_the_walk() {
        let mut a = Autoplay::new(T);
        let mut e = PaginationEngine::new();
        e.load(vec![Category::default()]);
        a.start(0);
        assert!(a.tick(T, &mut e).is_err());
        assert!(a.is_faulted());
        assert_eq!(a.state(), AutoplayState::Paused);
        assert_eq!(a.tick(2 * T, &mut e), Ok(TickOutcome::Inactive));
        a.clear_fault(2 * T + 1);
        assert_eq!(a.state(), AutoplayState::Running);
    }

    #[test]
    fn explicit_resume_clears_a_fault() {
        let mut a = Autoplay::new(T);
        let mut e = PaginationEngine::new();
        e.load(vec![Category::default()]);
        a.start(0);
        assert!(a.tick(T, &mut e).is_err());
        assert_eq!(a.toggle_pause(T + 10), AutoplayState::Running);
        assert!(!a.is_faulted());
        assert_eq!(a.next_due_ms(), Some(2 * T));
    }

    #[test]
    fn nothing_loaded_means_no_tick() {
        let mut a = Autoplay::new(T);
        let mut e = PaginationEngine::new();
        a.start(0);
        assert_eq!(a.tick(5 * T, &mut e), Ok(TickOutcome::Inactive));
    }

    #[test]
    fn stop_is_terminal() {
        let mut a = Autoplay::new(T);
        a.start(0);
        a.stop();
        assert_eq!(a.start(0), AutoplayState::Stopped);
        assert_eq!(a.resume(0), AutoplayState::Stopped);
        assert_eq!(a.next_due_ms(), None);
    }
}
