//! Events reported by the timer engine
//!
//! Returned from `tick` so the control loop can log transitions and
//! refresh hardware commands without polling every field.

use super::state::SessionState;

/// Events a tick can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// The countdown reached zero for the first time
    CountdownFinished,
    /// The completion alert sequence started playing
    AlertStarted,
    /// The chain advanced to the next session
    Advanced {
        from: SessionState,
        to: SessionState,
    },
}

impl SessionEvent {
    /// Check if this event changed the session state
    pub fn is_transition(&self) -> bool {
        matches!(self, SessionEvent::Advanced { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_events() {
        assert!(SessionEvent::Advanced {
            from: SessionState::Running,
            to: SessionState::ShortBreak,
        }
        .is_transition());
        assert!(!SessionEvent::CountdownFinished.is_transition());
        assert!(!SessionEvent::AlertStarted.is_transition());
    }
}
