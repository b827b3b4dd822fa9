//! Board-agnostic core logic for the Rondo pomodoro dial
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Session state machine (work / break / pause)
//! - Countdown engine with completion latching
//! - Completion alert sequencing
//! - Session configuration with centralized range clamping
//! - Hardware abstraction traits (notifier, session control)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod session;
pub mod timer;
pub mod traits;
