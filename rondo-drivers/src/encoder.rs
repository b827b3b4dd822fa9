//! Rotary encoder decoder
//!
//! Decodes quadrature encoder signals into rotation events.
//! Uses a state machine for reliable decoding with noise rejection;
//! feed it `(a, b)` level samples every 1-5 ms.

use crate::events::InputEvent;

/// Encoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature encoder decoder
pub struct Encoder {
    state: State,
    last_a: bool,
    last_b: bool,
}

impl Encoder {
    /// Create a new decoder; `a`/`b` are the current line levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last_a: a,
            last_b: b,
        }
    }

    /// Feed one sample of the encoder lines
    ///
    /// Returns an input event when a full detent has been decoded.
    pub fn update(&mut self, a: bool, b: bool) -> Option<InputEvent> {
        // No change
        if a == self.last_a && b == self.last_b {
            return None;
        }

        let event = self.decode(a, b);

        self.last_a = a;
        self.last_b = b;

        event
    }

    /// Decode encoder state using state machine
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    ///
    /// State transitions for CW rotation:
    /// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> emit CW -> Idle
    ///
    /// State transitions for CCW rotation:
    /// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> emit CCW -> Idle
    fn decode(&mut self, a: bool, b: bool) -> Option<InputEvent> {
        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = State::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 => {
                if !a && !b {
                    // Both low -> continue CW
                    self.state = State::CwStep2;
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a || b {
                    // Either went high -> complete CW step
                    self.state = State::Idle;
                    return Some(InputEvent::EncoderCw);
                }
                None
            }
            State::CcwStep1 => {
                if !a && !b {
                    // Both low -> continue CCW
                    self.state = State::CcwStep2;
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = State::Idle;
                }
                None
            }
            State::CcwStep2 => {
                if a || b {
                    // Either went high -> complete CCW step
                    self.state = State::Idle;
                    return Some(InputEvent::EncoderCcw);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(encoder: &mut Encoder, samples: &[(bool, bool)]) -> Option<InputEvent> {
        let mut last = None;
        for &(a, b) in samples {
            if let Some(event) = encoder.update(a, b) {
                last = Some(event);
            }
        }
        last
    }

    #[test]
    fn test_clockwise_detent() {
        let mut encoder = Encoder::new(true, true);
        let event = feed(
            &mut encoder,
            &[(false, true), (false, false), (true, false), (true, true)],
        );
        assert_eq!(event, Some(InputEvent::EncoderCw));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut encoder = Encoder::new(true, true);
        let event = feed(
            &mut encoder,
            &[(true, false), (false, false), (false, true), (true, true)],
        );
        assert_eq!(event, Some(InputEvent::EncoderCcw));
    }

    #[test]
    fn test_bounce_back_to_idle_is_rejected() {
        let mut encoder = Encoder::new(true, true);
        // A dips and returns without completing the gray-code walk
        let event = feed(&mut encoder, &[(false, true), (true, true)]);
        assert_eq!(event, None);
    }

    #[test]
    fn test_repeated_samples_are_ignored() {
        let mut encoder = Encoder::new(true, true);
        assert_eq!(encoder.update(true, true), None);
        assert_eq!(encoder.update(true, true), None);
    }

    #[test]
    fn test_consecutive_detents() {
        let mut encoder = Encoder::new(true, true);
        let cycle = [(false, true), (false, false), (true, false), (true, true)];
        assert_eq!(feed(&mut encoder, &cycle), Some(InputEvent::EncoderCw));
        assert_eq!(feed(&mut encoder, &cycle), Some(InputEvent::EncoderCw));
    }
}
