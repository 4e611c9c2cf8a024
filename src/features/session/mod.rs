//! Pomodoro session state machine.
//!
//! Sequences work intervals, breaks and the optional stretch flow:
//! - One phase at a time, one live countdown at a time
//! - Skip, stop and natural expiry share one transition table
//! - Simulated clocks for headless runs and tests

pub mod clock;
pub mod controller;
pub mod countdown;
pub mod phase;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    Action, ActionOutcome, ExhaustedBreakPolicy, Rejection, SessionController, SessionEvent,
    SessionObserver, SessionSettings, SessionSnapshot, MAX_SESSION_COUNT, MIN_SESSION_COUNT,
};
pub use countdown::{
    format_duration, format_duration_mmss, parse_duration, parse_duration_secs, Countdown,
    TimerHandle,
};
pub use phase::{Cause, Interval, Phase, Transition};
