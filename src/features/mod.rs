//! Feature implementations for stretch925.
//!
//! - Session state machine and countdowns
//! - Stretch catalog and pose-tracker scores

pub mod session;
pub mod stretch;
