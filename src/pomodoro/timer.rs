//! Pomodoro phase cycle and countdown.
//!
//! `PhaseTimer` owns the countdown and the current phase. It never sleeps
//! itself: `start` arms exactly one deferred tick through a [`Scheduler`],
//! and the host calls [`PhaseTimer::tick`] with the handle it receives.
//! Pausing, resetting and skipping cancel the pending tick first, so at most
//! one tick is ever in flight.

use serde::Serialize;
use std::time::Duration;

use super::phase::{Durations, LONG_BREAK_EVERY, Phase, TICK_INTERVAL_MS, minutes_to_seconds};
use super::scheduler::{Scheduler, TickHandle};

/// Result of a phase advance, reported to the host for notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub completed_work_phases: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick was cancelled or superseded; nothing changed.
    Stale,
    /// One second counted down; the next tick is armed.
    Counted(u32),
    /// The phase ran out. The timer is stopped on the next phase.
    Completed(PhaseChange),
}

/// What the presentation layer needs to render the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub completed_work_phases: u32,
}

pub struct PhaseTimer<S: Scheduler> {
    phase: Phase,
    remaining_seconds: u32,
    completed_work_phases: u32,
    durations: Durations,
    pending: Option<TickHandle>,
    scheduler: S,
}

impl<S: Scheduler> PhaseTimer<S> {
    pub fn new(durations: Durations, scheduler: S) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: durations.get(Phase::Work),
            completed_work_phases: 0,
            durations,
            pending: None,
            scheduler,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Running means a tick is pending.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn completed_work_phases(&self) -> u32 {
        self.completed_work_phases
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            running: self.is_running(),
            completed_work_phases: self.completed_work_phases,
        }
    }

    /// Arms the next tick. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.arm();
        tracing::debug!(phase = %self.phase, remaining = self.remaining_seconds, "timer started");
        true
    }

    /// Cancels the pending tick. Returns `false` if not running.
    pub fn pause(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                tracing::debug!(phase = %self.phase, remaining = self.remaining_seconds, "timer paused");
                true
            }
            None => false,
        }
    }

    /// Stops and refills the current phase. Phase and counter are kept.
    pub fn reset(&mut self) {
        self.pause();
        self.remaining_seconds = self.durations.get(self.phase);
    }

    /// Stops and moves to the next phase without waiting for expiry.
    pub fn skip(&mut self) -> PhaseChange {
        self.pause();
        self.advance()
    }

    pub fn tick(&mut self, handle: TickHandle) -> TickOutcome {
        if self.pending != Some(handle) {
            tracing::debug!(?handle, "ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.pending = None;

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            self.arm();
            return TickOutcome::Counted(self.remaining_seconds);
        }

        // Expired: the next phase waits for an explicit start.
        TickOutcome::Completed(self.advance())
    }

    /// Updates the length of `phase`. The active phase picks up the new
    /// value immediately when stopped; while running it is only clamped.
    pub fn set_duration(&mut self, phase: Phase, minutes: u32) {
        let seconds = minutes_to_seconds(minutes);
        self.durations.set(phase, seconds);

        if phase == self.phase {
            if self.is_running() {
                self.remaining_seconds = self.remaining_seconds.min(seconds);
            } else {
                self.remaining_seconds = seconds;
            }
        }
    }

    fn arm(&mut self) {
        let handle = self.scheduler.after(Duration::from_millis(TICK_INTERVAL_MS));
        self.pending = Some(handle);
    }

    fn advance(&mut self) -> PhaseChange {
        let from = self.phase;
        let to = match from {
            Phase::Work => {
                self.completed_work_phases += 1;
                if self.completed_work_phases % LONG_BREAK_EVERY == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.phase = to;
        self.remaining_seconds = self.durations.get(to);
        tracing::debug!(%from, %to, completed = self.completed_work_phases, "phase advanced");

        PhaseChange {
            from,
            to,
            completed_work_phases: self.completed_work_phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::scheduler::ManualScheduler;

    fn timer() -> PhaseTimer<ManualScheduler> {
        PhaseTimer::new(Durations::default(), ManualScheduler::new())
    }

    fn fire(timer: &mut PhaseTimer<ManualScheduler>) -> TickOutcome {
        let handle = timer.scheduler().last_armed().expect("no tick armed");
        timer.tick(handle)
    }

    #[test]
    fn test_initial_state() {
        let t = timer();
        assert_eq!(t.phase(), Phase::Work);
        assert_eq!(t.remaining_seconds(), 1500);
        assert!(!t.is_running());
        assert_eq!(t.completed_work_phases(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut t = timer();
        assert!(t.start());
        assert!(!t.start());
        assert_eq!(t.scheduler().armed.len(), 1);
    }

    #[test]
    fn test_pause_cancels_pending_tick() {
        let mut t = timer();
        assert!(!t.pause());
        t.start();
        let handle = t.scheduler().last_armed().unwrap();
        assert!(t.pause());
        assert!(!t.is_running());
        assert_eq!(t.scheduler().cancelled, vec![handle]);
    }

    #[test]
    fn test_ticks_count_down_within_phase() {
        let mut t = timer();
        t.start();
        for n in 1..=10 {
            assert_eq!(fire(&mut t), TickOutcome::Counted(1500 - n));
        }
        assert_eq!(t.phase(), Phase::Work);
        assert!(t.is_running());
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut t = timer();
        t.start();
        let old = t.scheduler().last_armed().unwrap();
        t.pause();
        t.start();

        assert_eq!(t.tick(old), TickOutcome::Stale);
        assert_eq!(t.remaining_seconds(), 1500);
        assert!(t.is_running());
    }

    #[test]
    fn test_pause_then_start_loses_no_time() {
        let mut t = timer();
        t.start();
        fire(&mut t);
        fire(&mut t);
        t.pause();
        assert_eq!(t.remaining_seconds(), 1498);
        t.start();
        assert_eq!(fire(&mut t), TickOutcome::Counted(1497));
    }

    #[test]
    fn test_reset_keeps_phase_and_counter() {
        let mut t = timer();
        t.skip();
        t.start();
        fire(&mut t);
        t.reset();
        assert_eq!(t.phase(), Phase::ShortBreak);
        assert_eq!(t.remaining_seconds(), 300);
        assert_eq!(t.completed_work_phases(), 1);
        assert!(!t.is_running());
    }

    #[test]
    fn test_skip_advances_and_stops() {
        let mut t = timer();
        t.start();
        let change = t.skip();
        assert_eq!(
            change,
            PhaseChange {
                from: Phase::Work,
                to: Phase::ShortBreak,
                completed_work_phases: 1
            }
        );
        assert!(!t.is_running());
        assert_eq!(t.remaining_seconds(), 300);

        let change = t.skip();
        assert_eq!(change.to, Phase::Work);
        assert_eq!(change.completed_work_phases, 1);
    }

    #[test]
    fn test_every_fourth_work_phase_gets_long_break() {
        let mut t = timer();
        let mut breaks = Vec::new();
        for _ in 0..8 {
            breaks.push(t.skip().to);
            t.skip();
        }
        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn test_expiry_does_not_rearm() {
        let mut t = PhaseTimer::new(Durations::from_minutes(1, 1, 1), ManualScheduler::new());
        t.start();
        for _ in 0..59 {
            fire(&mut t);
        }
        let armed = t.scheduler().armed.len();
        match fire(&mut t) {
            TickOutcome::Completed(change) => assert_eq!(change.to, Phase::ShortBreak),
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(!t.is_running());
        assert_eq!(t.scheduler().armed.len(), armed);
        assert_eq!(t.remaining_seconds(), 60);
    }

    #[test]
    fn test_zero_length_phase_completes_on_first_tick() {
        let mut t = timer();
        t.set_duration(Phase::Work, 0);
        assert_eq!(t.remaining_seconds(), 0);
        t.start();
        assert!(matches!(fire(&mut t), TickOutcome::Completed(_)));
        assert_eq!(t.phase(), Phase::ShortBreak);
    }

    #[test]
    fn test_set_duration_on_idle_active_phase_applies_now() {
        let mut t = timer();
        t.set_duration(Phase::Work, 30);
        assert_eq!(t.remaining_seconds(), 1800);
        assert_eq!(t.durations().work, 1800);
    }

    #[test]
    fn test_set_duration_on_other_phase_waits_for_entry() {
        let mut t = timer();
        t.set_duration(Phase::LongBreak, 20);
        assert_eq!(t.remaining_seconds(), 1500);
        for _ in 0..3 {
            t.skip();
            t.skip();
        }
        t.skip();
        assert_eq!(t.phase(), Phase::LongBreak);
        assert_eq!(t.remaining_seconds(), 1200);
    }

    #[test]
    fn test_set_duration_while_running_clamps() {
        let mut t = timer();
        t.start();
        fire(&mut t);
        t.set_duration(Phase::Work, 30);
        assert_eq!(t.remaining_seconds(), 1499);
        t.set_duration(Phase::Work, 1);
        assert_eq!(t.remaining_seconds(), 60);
        assert!(t.is_running());
    }

    #[test]
    fn test_snapshot_serializes() {
        let t = timer();
        let json = serde_json::to_string(&t.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"work\""));
        assert!(json.contains("\"remaining_seconds\":1500"));
        assert!(json.contains("\"running\":false"));
    }
}
