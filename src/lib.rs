//! Virtual Tutor - Staged essay-tutoring dialogue
//!
//! Each student utterance is classified against the intent catalog of the
//! current stage, folded into a two-timescale affective model (fast
//! appraisal, slow feeling), and answered by a language model that is told
//! which intents need correction. A stage controller moves the dialogue
//! through four stages when the model judges the student ready.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
