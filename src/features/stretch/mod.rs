//! Guided stretches offered during breaks.
//!
//! The pose tracker itself runs elsewhere; this module only knows which
//! stretches exist and how to read the scores the tracker leaves behind.

pub mod exercise;
pub mod score;

pub use exercise::Exercise;
pub use score::{ScoreTally, SCORE_PER_POINT};
