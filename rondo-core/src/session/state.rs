//! Session state definition
//!
//! The five timer-relevant states. The settings editor is deliberately not
//! one of them: it is a UI mode owned by the surrounding application, which
//! simply stops ticking the engine while it is open.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Ready state, no countdown armed
    Idle,
    /// Work session counting down
    Running,
    /// Countdown frozen by the user
    Paused,
    /// Short break counting down
    ShortBreak,
    /// Long break counting down
    LongBreak,
}

impl SessionState {
    /// Check if this state has a live countdown (tick does work)
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionState::Running | SessionState::ShortBreak | SessionState::LongBreak
        )
    }

    /// Check if this is one of the break states
    pub fn is_break(&self) -> bool {
        matches!(self, SessionState::ShortBreak | SessionState::LongBreak)
    }

    /// Display label for this state
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready",
            SessionState::Running => "Focusing",
            SessionState::Paused => "Paused",
            SessionState::ShortBreak => "Short Break",
            SessionState::LongBreak => "Long Break",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(SessionState::Running.is_active());
        assert!(SessionState::ShortBreak.is_active());
        assert!(SessionState::LongBreak.is_active());
        assert!(!SessionState::Idle.is_active());
        assert!(!SessionState::Paused.is_active());
    }

    #[test]
    fn test_break_states() {
        assert!(SessionState::ShortBreak.is_break());
        assert!(SessionState::LongBreak.is_break());
        assert!(!SessionState::Running.is_break());
        assert!(!SessionState::Paused.is_break());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SessionState::Idle.label(), "Ready");
        assert_eq!(SessionState::Running.label(), "Focusing");
        assert_eq!(SessionState::ShortBreak.label(), "Short Break");
    }
}
