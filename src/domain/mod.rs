//! Domain layer containing the tutoring logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session identifiers)
//! - `affect` - Two-timescale appraisal/feeling model of one stage
//! - `tutoring` - Stages, intent catalogs, scripts and dialogue sessions

pub mod affect;
pub mod foundation;
pub mod tutoring;
