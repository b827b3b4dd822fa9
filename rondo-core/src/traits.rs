//! Hardware abstraction traits
//!
//! Seams between the core and the board: the core drives a tone source
//! through `Notifier`, and the input-decoding layer drives the core
//! through `SessionControl`.

/// Trait for the completion tone source
///
/// Both calls are fire-and-forget: `tone` must not block beyond starting
/// the output, and the caller is responsible for pacing. Implementations
/// may auto-stop after `duration_ms` but are not required to; the alert
/// sequencer silences explicitly between tones.
pub trait Notifier {
    /// Start a tone at the given frequency
    fn tone(&mut self, freq_hz: u16, duration_ms: u32);

    /// Stop any tone immediately
    fn silence(&mut self);
}

/// Control surface exposed to the input-decoding layer
///
/// Exactly the four session operations. Timestamps come from the caller's
/// monotonic millisecond clock; all operations are no-ops when the current
/// state does not permit them.
pub trait SessionControl {
    /// Arm a countdown of `duration_s`; from Idle/Paused this also enters
    /// Running
    fn start(&mut self, duration_s: u32, now_ms: u64);

    /// Freeze the countdown; effective only from an active state
    fn pause(&mut self);

    /// Continue a frozen countdown; effective only from Paused
    fn resume(&mut self, now_ms: u64);

    /// Return to Idle with a fresh work-length countdown staged
    fn reset(&mut self, work_duration_s: u32);
}
