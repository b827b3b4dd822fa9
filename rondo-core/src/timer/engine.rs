//! Session timer engine
//!
//! Owns all session runtime state in a single structure: the armed
//! countdown, the pause snapshot, the completion latch, and the lifetime
//! pomodoro count. Mutated only by the four control operations and by
//! `tick`, which the control loop calls once per iteration.

use crate::config::{BreakKind, SessionConfig};
use crate::session::{SessionEvent, SessionState};
use crate::timer::alert::AlertSequencer;
use crate::traits::{Notifier, SessionControl};

/// Session timer runtime state
///
/// Created once at startup with everything zeroed; `reset` returns it to
/// that shape apart from `completed_count`, which only a power cycle
/// clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionTimer {
    state: SessionState,
    state_before_pause: SessionState,
    /// Timestamp the countdown was armed from its full duration; 0 = not armed
    started_at_ms: u64,
    remaining_s: u32,
    duration_s: u32,
    /// Duration of the most recently started work session, reproduced
    /// after a short break
    last_work_duration_s: u32,
    completed_count: u32,
    /// Timestamp the countdown first reached zero; 0 = no pending completion
    completed_at_ms: u64,
    completed: bool,
    alert: AlertSequencer,
    needs_redraw: bool,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
            state_before_pause: SessionState::Idle,
            started_at_ms: 0,
            remaining_s: 0,
            duration_s: 0,
            last_work_duration_s: 0,
            completed_count: 0,
            completed_at_ms: 0,
            completed: false,
            alert: AlertSequencer::new(),
            needs_redraw: true,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// State that was active when `pause` was called; meaningful only
    /// while Paused
    pub fn state_before_pause(&self) -> SessionState {
        self.state_before_pause
    }

    /// Seconds left on the countdown
    pub fn remaining_s(&self) -> u32 {
        self.remaining_s
    }

    /// Full duration of the current countdown
    pub fn duration_s(&self) -> u32 {
        self.duration_s
    }

    /// Check if the countdown is sitting at zero
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Work sessions completed since power-on
    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    /// Consume the pending redraw request, if any
    pub fn take_redraw(&mut self) -> bool {
        let pending = self.needs_redraw;
        self.needs_redraw = false;
        pending
    }

    /// Stage a new duration while Idle (dial adjustment); no-op otherwise
    pub fn set_idle_duration(&mut self, seconds: u32) {
        if self.state == SessionState::Idle {
            self.remaining_s = seconds;
            self.duration_s = seconds;
            self.needs_redraw = true;
        }
    }

    /// Arm a countdown of `duration_s` starting now
    ///
    /// From Idle or Paused this enters Running and records the duration for
    /// short-break restarts; from any other state the session state is left
    /// alone so a break's countdown can be armed without leaving the break.
    pub fn start(&mut self, duration_s: u32, now_ms: u64) {
        self.duration_s = duration_s;
        self.remaining_s = duration_s;
        // 0 is reserved for "not armed"
        self.started_at_ms = now_ms.max(1);
        self.completed = false;
        self.completed_at_ms = 0;
        self.alert.reset();

        if matches!(self.state, SessionState::Idle | SessionState::Paused) {
            self.state = SessionState::Running;
            self.last_work_duration_s = duration_s;
        }
        self.needs_redraw = true;
    }

    /// Freeze the countdown
    ///
    /// Effective only from an active state, and not once the completion
    /// alert has begun firing tones - the alert runs to the transition.
    /// `started_at_ms` is left untouched; `resume` rebuilds it from the
    /// frozen remaining time.
    pub fn pause(&mut self) {
        if !self.alert.is_idle() {
            return;
        }
        if self.state.is_active() {
            self.state_before_pause = self.state;
            self.state = SessionState::Paused;
            self.needs_redraw = true;
        }
    }

    /// Continue a frozen countdown
    ///
    /// Rebuilds the start timestamp so the next tick reports the same
    /// remaining time that was showing at pause, regardless of how much
    /// wall time has passed.
    pub fn resume(&mut self, now_ms: u64) {
        if self.state == SessionState::Paused {
            let elapsed_ms = (self.duration_s - self.remaining_s) as u64 * 1000;
            self.started_at_ms = now_ms.saturating_sub(elapsed_ms).max(1);
            self.state = self.state_before_pause;
            self.needs_redraw = true;
        }
    }

    /// Return to Idle with a fresh work-length countdown staged
    ///
    /// Always effective. The lifetime pomodoro count is not touched.
    pub fn reset(&mut self, work_duration_s: u32) {
        self.remaining_s = work_duration_s;
        self.duration_s = work_duration_s;
        self.started_at_ms = 0;
        self.completed = false;
        self.completed_at_ms = 0;
        self.alert.reset();
        self.state = SessionState::Idle;
        self.needs_redraw = true;
    }

    /// Per-iteration update: countdown bookkeeping, then completion
    /// sequencing
    ///
    /// Does nothing unless the session state is active.
    pub fn tick<N: Notifier>(
        &mut self,
        now_ms: u64,
        config: &SessionConfig,
        notifier: &mut N,
    ) -> Option<SessionEvent> {
        if !self.state.is_active() {
            return None;
        }

        let finished = self.update_countdown(now_ms);
        let advanced = self.run_completion(now_ms, config, notifier);
        advanced.or(finished)
    }

    /// Recompute remaining time from the monotonic clock; latch at zero
    fn update_countdown(&mut self, now_ms: u64) -> Option<SessionEvent> {
        if self.started_at_ms == 0 {
            return None;
        }

        let elapsed_s = now_ms.saturating_sub(self.started_at_ms) / 1000;
        if elapsed_s >= self.duration_s as u64 {
            self.remaining_s = 0;
            // Stamp the completion exactly once
            if self.completed_at_ms == 0 {
                self.completed = true;
                self.completed_at_ms = now_ms;
                self.needs_redraw = true;
                return Some(SessionEvent::CountdownFinished);
            }
        } else {
            let remaining = self.duration_s - elapsed_s as u32;
            if remaining != self.remaining_s {
                self.remaining_s = remaining;
                self.needs_redraw = true;
            }
            self.completed = false;
        }
        None
    }

    /// Walk the alert sequence for a pending completion, then chain
    fn run_completion<N: Notifier>(
        &mut self,
        now_ms: u64,
        config: &SessionConfig,
        notifier: &mut N,
    ) -> Option<SessionEvent> {
        if self.completed_at_ms == 0 {
            return None;
        }

        let was_idle = self.alert.is_idle();
        if self.alert.advance(now_ms, self.completed_at_ms, notifier) {
            self.completed_at_ms = 0;
            return Some(self.advance_session(now_ms, config));
        }
        if was_idle && !self.alert.is_idle() {
            return Some(SessionEvent::AlertStarted);
        }
        None
    }

    /// Chain into the next session given the state that just completed
    fn advance_session(&mut self, now_ms: u64, config: &SessionConfig) -> SessionEvent {
        let from = self.state;
        match from {
            SessionState::Running => {
                self.completed_count += 1;
                let chain = config.pomodoros_until_long_break() as u32;
                if self.completed_count % chain == 0 {
                    self.state = SessionState::LongBreak;
                    self.start(config.break_duration_s(BreakKind::Long), now_ms);
                } else {
                    self.state = SessionState::ShortBreak;
                    self.start(config.break_duration_s(BreakKind::Short), now_ms);
                }
            }
            SessionState::ShortBreak => {
                // Reproduce the previous work session rather than re-reading
                // config, so an in-flight edit does not change a running chain
                let duration = if self.last_work_duration_s > 0 {
                    self.last_work_duration_s
                } else {
                    config.work_s()
                };
                self.state = SessionState::Running;
                self.last_work_duration_s = duration;
                self.start(duration, now_ms);
            }
            _ => {
                // Long break ends the chain
                self.reset(config.work_s());
            }
        }
        self.needs_redraw = true;
        SessionEvent::Advanced {
            from,
            to: self.state,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionControl for SessionTimer {
    fn start(&mut self, duration_s: u32, now_ms: u64) {
        SessionTimer::start(self, duration_s, now_ms);
    }

    fn pause(&mut self) {
        SessionTimer::pause(self);
    }

    fn resume(&mut self, now_ms: u64) {
        SessionTimer::resume(self, now_ms);
    }

    fn reset(&mut self, work_duration_s: u32) {
        SessionTimer::reset(self, work_duration_s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        tones: heapless::Vec<(u16, u32), 32>,
        silences: usize,
    }

    impl Notifier for RecordingNotifier {
        fn tone(&mut self, freq_hz: u16, duration_ms: u32) {
            let _ = self.tones.push((freq_hz, duration_ms));
        }

        fn silence(&mut self) {
            self.silences += 1;
        }
    }

    fn started_timer(config: &SessionConfig, now_ms: u64) -> SessionTimer {
        let mut timer = SessionTimer::new();
        timer.reset(config.work_s());
        timer.start(config.work_s(), now_ms);
        timer
    }

    /// Run the countdown to zero and walk the alert through to the chain
    /// transition; returns the advanced-to event and the time it happened.
    fn advance_through_completion(
        timer: &mut SessionTimer,
        config: &SessionConfig,
        mut now: u64,
    ) -> (u64, SessionEvent) {
        let mut notifier = RecordingNotifier::default();
        now += timer.remaining_s() as u64 * 1000;
        let mut last = timer.tick(now, config, &mut notifier);
        for _ in 0..400 {
            if let Some(event @ SessionEvent::Advanced { .. }) = last {
                return (now, event);
            }
            now += 50;
            last = timer.tick(now, config, &mut notifier);
        }
        panic!("completion never advanced the session");
    }

    #[test]
    fn test_countdown_tracks_elapsed() {
        let config = SessionConfig::default();
        let mut notifier = RecordingNotifier::default();

        for (duration, elapsed) in [(60, 0), (60, 59), (300, 125), (1500, 1), (3600, 3599)] {
            let mut timer = SessionTimer::new();
            timer.start(duration, 1000);
            timer.tick(1000 + elapsed as u64 * 1000, &config, &mut notifier);
            assert_eq!(timer.remaining_s(), duration - elapsed);
            assert!(!timer.is_completed());
        }
    }

    #[test]
    fn test_completion_latches_once() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.start(10, 1000);
        let event = timer.tick(11_000, &config, &mut notifier);
        assert_eq!(event, Some(SessionEvent::CountdownFinished));
        assert_eq!(timer.remaining_s(), 0);
        assert!(timer.is_completed());

        // Repeated ticks past zero do not re-stamp the completion
        assert_eq!(timer.tick(11_200, &config, &mut notifier), None);
        assert_eq!(timer.tick(11_400, &config, &mut notifier), None);
        assert_eq!(timer.remaining_s(), 0);
    }

    #[test]
    fn test_unarmed_timer_does_not_count() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.reset(config.work_s());
        assert_eq!(timer.tick(60_000, &config, &mut notifier), None);
        assert_eq!(timer.remaining_s(), config.work_s());
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let config = SessionConfig::default();
        let mut notifier = RecordingNotifier::default();
        let mut timer = started_timer(&config, 1000);

        timer.tick(61_000, &config, &mut notifier);
        assert_eq!(timer.remaining_s(), config.work_s() - 60);

        timer.pause();
        assert_eq!(timer.state(), SessionState::Paused);

        // Hours may pass; a paused timer does not tick
        assert_eq!(timer.tick(7_200_000, &config, &mut notifier), None);
        assert_eq!(timer.remaining_s(), config.work_s() - 60);

        timer.resume(7_200_000);
        assert_eq!(timer.state(), SessionState::Running);
        timer.tick(7_200_000, &config, &mut notifier);
        assert_eq!(timer.remaining_s(), config.work_s() - 60);
    }

    #[test]
    fn test_pause_only_from_active_states() {
        let mut timer = SessionTimer::new();
        timer.pause();
        assert_eq!(timer.state(), SessionState::Idle);
    }

    #[test]
    fn test_resume_only_from_paused() {
        let config = SessionConfig::default();
        let mut timer = started_timer(&config, 1000);
        timer.resume(5000);
        assert_eq!(timer.state(), SessionState::Running);
        // A resume that did nothing must not have rebuilt the start time
        let mut notifier = RecordingNotifier::default();
        timer.tick(61_000, &config, &mut notifier);
        assert_eq!(timer.remaining_s(), config.work_s() - 60);
    }

    #[test]
    fn test_alert_gated_behind_one_second_hold() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.start(10, 1000);
        timer.tick(11_000, &config, &mut notifier);

        assert_eq!(timer.tick(11_999, &config, &mut notifier), None);
        assert!(notifier.tones.is_empty());

        let event = timer.tick(12_000, &config, &mut notifier);
        assert_eq!(event, Some(SessionEvent::AlertStarted));
        assert_eq!(notifier.tones.len(), 1);
    }

    #[test]
    fn test_alert_plays_full_pattern_then_chains() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.start(10, 1000);
        timer.tick(11_000, &config, &mut notifier);

        let mut now = 11_000u64;
        let mut advanced = None;
        for _ in 0..400 {
            now += 50;
            if let Some(event @ SessionEvent::Advanced { .. }) =
                timer.tick(now, &config, &mut notifier)
            {
                advanced = Some(event);
                break;
            }
        }

        assert_eq!(
            advanced,
            Some(SessionEvent::Advanced {
                from: SessionState::Running,
                to: SessionState::ShortBreak,
            })
        );
        assert_eq!(
            notifier.tones.as_slice(),
            &[
                (3000, 250),
                (3000, 250),
                (3000, 250),
                (3000, 250),
                (3000, 400)
            ]
        );
    }

    #[test]
    fn test_pause_ignored_once_alert_is_sounding() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.start(10, 1000);
        timer.tick(11_000, &config, &mut notifier);
        timer.tick(12_050, &config, &mut notifier);
        assert!(!notifier.tones.is_empty());

        timer.pause();
        assert_eq!(timer.state(), SessionState::Running);
    }

    #[test]
    fn test_pause_during_hold_defers_alert() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        let mut notifier = RecordingNotifier::default();

        timer.start(10, 1000);
        timer.tick(11_000, &config, &mut notifier);

        // Before the first tone, pausing still works
        timer.tick(11_500, &config, &mut notifier);
        timer.pause();
        assert_eq!(timer.state(), SessionState::Paused);
        assert!(notifier.tones.is_empty());

        // On resume the hold has long expired, so the alert starts
        timer.resume(60_000);
        let event = timer.tick(60_000, &config, &mut notifier);
        assert_eq!(event, Some(SessionEvent::AlertStarted));
    }

    #[test]
    fn test_chain_runs_short_breaks_until_long_boundary() {
        let config = SessionConfig::default();
        let mut timer = started_timer(&config, 1000);
        let mut now = 1000u64;

        for completed in 1..config.pomodoros_until_long_break() as u32 {
            let (next, event) = advance_through_completion(&mut timer, &config, now);
            assert_eq!(
                event,
                SessionEvent::Advanced {
                    from: SessionState::Running,
                    to: SessionState::ShortBreak,
                }
            );
            assert_eq!(timer.completed_count(), completed);
            assert_eq!(timer.duration_s(), config.short_break_s());

            let (next, event) = advance_through_completion(&mut timer, &config, next);
            assert_eq!(
                event,
                SessionEvent::Advanced {
                    from: SessionState::ShortBreak,
                    to: SessionState::Running,
                }
            );
            now = next;
        }

        let (_, event) = advance_through_completion(&mut timer, &config, now);
        assert_eq!(
            event,
            SessionEvent::Advanced {
                from: SessionState::Running,
                to: SessionState::LongBreak,
            }
        );
        assert_eq!(
            timer.completed_count(),
            config.pomodoros_until_long_break() as u32
        );
        assert_eq!(timer.duration_s(), config.long_break_s());
    }

    #[test]
    fn test_short_break_restart_reproduces_work_duration() {
        let mut config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        timer.reset(config.work_s());
        timer.start(1200, 1000);

        let (now, _) = advance_through_completion(&mut timer, &config, 1000);
        assert_eq!(timer.state(), SessionState::ShortBreak);

        // An edit mid-break must not change the already-started chain
        config.set_work_s(900);

        let (_, event) = advance_through_completion(&mut timer, &config, now);
        assert_eq!(
            event,
            SessionEvent::Advanced {
                from: SessionState::ShortBreak,
                to: SessionState::Running,
            }
        );
        assert_eq!(timer.duration_s(), 1200);
    }

    #[test]
    fn test_long_break_ends_in_idle() {
        let mut config = SessionConfig::default();
        config.set_pomodoros_until_long_break(1);
        let mut timer = started_timer(&config, 1000);

        let (now, _) = advance_through_completion(&mut timer, &config, 1000);
        assert_eq!(timer.state(), SessionState::LongBreak);

        let (_, event) = advance_through_completion(&mut timer, &config, now);
        assert_eq!(
            event,
            SessionEvent::Advanced {
                from: SessionState::LongBreak,
                to: SessionState::Idle,
            }
        );
        assert_eq!(timer.remaining_s(), config.work_s());
        assert_eq!(timer.duration_s(), config.work_s());
        assert_eq!(timer.completed_count(), 1);
    }

    #[test]
    fn test_reset_is_total() {
        let config = SessionConfig::default();
        let mut notifier = RecordingNotifier::default();
        let mut timer = SessionTimer::new();

        // Reset with a completion pending mid-alert
        timer.start(10, 1000);
        timer.tick(11_000, &config, &mut notifier);
        timer.tick(12_100, &config, &mut notifier);

        timer.reset(config.work_s());
        assert_eq!(timer.state(), SessionState::Idle);
        assert_eq!(timer.remaining_s(), config.work_s());
        assert_eq!(timer.duration_s(), config.work_s());
        assert!(!timer.is_completed());

        // Nothing left pending: ticking stays inert
        assert_eq!(timer.tick(20_000, &config, &mut notifier), None);
    }

    #[test]
    fn test_completed_count_survives_reset() {
        let config = SessionConfig::default();
        let mut timer = started_timer(&config, 1000);

        let (_, _) = advance_through_completion(&mut timer, &config, 1000);
        assert_eq!(timer.completed_count(), 1);

        timer.reset(config.work_s());
        assert_eq!(timer.completed_count(), 1);
    }

    #[test]
    fn test_start_from_break_keeps_break_state() {
        let config = SessionConfig::default();
        let mut timer = started_timer(&config, 1000);

        let (now, _) = advance_through_completion(&mut timer, &config, 1000);
        assert_eq!(timer.state(), SessionState::ShortBreak);

        timer.start(120, now + 1000);
        assert_eq!(timer.state(), SessionState::ShortBreak);
        assert_eq!(timer.duration_s(), 120);
    }

    #[test]
    fn test_set_idle_duration_only_in_idle() {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        timer.reset(config.work_s());

        timer.set_idle_duration(600);
        assert_eq!(timer.remaining_s(), 600);
        assert_eq!(timer.duration_s(), 600);

        timer.start(600, 1000);
        timer.set_idle_duration(120);
        assert_eq!(timer.duration_s(), 600);
    }
}
