//! Tutoring handlers
//!
//! - `StageController` - staged turn protocol with affective tracking
//! - `StatelessTutor` - reply-only variant without stages

mod stage_controller;
mod stateless_tutor;

pub use stage_controller::StageController;
pub use stateless_tutor::StatelessTutor;
