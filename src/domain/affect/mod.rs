//! Affective state domain module.
//!
//! Models how a participant's stated cognitive appraisal of the dialogue
//! diverges from a slower-moving affective response. Appraisal follows the
//! classified evidence at rate `r`; feeling pursues appraisal at the much
//! slower rate `p`, so a single noisy classification barely moves it.

mod errors;
mod model;

pub use errors::AffectError;
pub use model::{
    AffectSnapshot, AffectiveStateModel, AFFECTIVE_INERTIA_RATE, APPRAISAL_CATCH_UP_RATE,
    INDIFFERENCE_PRIOR,
};
