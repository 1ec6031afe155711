//! Property tests for the two-timescale affective model.

use proptest::prelude::*;

use virtual_tutor::domain::affect::{
    AffectError, AffectiveStateModel, AFFECTIVE_INERTIA_RATE, APPRAISAL_CATCH_UP_RATE,
};

fn vectors(len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (
        prop::collection::vec(-10.0f64..10.0, len),
        prop::collection::vec(-10.0f64..10.0, len),
    )
}

fn model_with_actions() -> impl Strategy<Value = (usize, Vec<Vec<f64>>)> {
    (1usize..5).prop_flat_map(|axes| {
        (
            Just(axes),
            prop::collection::vec(prop::collection::vec(0.0f64..1.0, axes * 2), 0..20),
        )
    })
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_non_negative((a, b) in (1usize..8).prop_flat_map(vectors)) {
        let ab = AffectiveStateModel::distance(&a, &b).unwrap();
        let ba = AffectiveStateModel::distance(&b, &a).unwrap();

        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert_eq!(AffectiveStateModel::distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn distance_rejects_unequal_lengths(
        a in prop::collection::vec(-1.0f64..1.0, 1..6),
        extra in 1usize..4,
    ) {
        let b = vec![0.0; a.len() + extra];
        prop_assert_eq!(
            AffectiveStateModel::distance(&a, &b),
            Err(AffectError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            })
        );
    }

    #[test]
    fn derived_states_are_half_differences((axes, actions) in model_with_actions()) {
        let mut model = AffectiveStateModel::new(axes);
        for action in &actions {
            model.update(action).unwrap();
        }

        prop_assert_eq!(model.appraisal().len(), axes * 2);
        prop_assert_eq!(model.appraisal_state().len(), axes);
        for i in 0..axes {
            let appraisal = model.appraisal()[i] - model.appraisal()[i + axes];
            let feeling = model.feeling()[i] - model.feeling()[i + axes];
            prop_assert!((model.appraisal_state()[i] - appraisal).abs() < 1e-12);
            prop_assert!((model.feeling_state()[i] - feeling).abs() < 1e-12);
        }
    }

    #[test]
    fn update_follows_the_law(
        (axes, actions) in model_with_actions(),
        next in prop::collection::vec(0.0f64..1.0, 8),
    ) {
        let mut model = AffectiveStateModel::new(axes);
        for action in &actions {
            model.update(action).unwrap();
        }
        let action = &next[..axes * 2];
        let appraisal = model.appraisal().to_vec();
        let feeling = model.feeling().to_vec();

        model.update(action).unwrap();

        for i in 0..axes * 2 {
            let a = (1.0 - APPRAISAL_CATCH_UP_RATE) * appraisal[i]
                + APPRAISAL_CATCH_UP_RATE * action[i];
            let f = (1.0 - AFFECTIVE_INERTIA_RATE) * feeling[i]
                + AFFECTIVE_INERTIA_RATE * (a - feeling[i]);
            prop_assert!((model.appraisal()[i] - a).abs() < 1e-12);
            prop_assert!((model.feeling()[i] - f).abs() < 1e-12);
        }
    }

    #[test]
    fn failed_update_changes_nothing(
        (axes, actions) in model_with_actions(),
        wrong in 0usize..12,
    ) {
        prop_assume!(wrong != axes * 2);
        let mut model = AffectiveStateModel::new(axes);
        for action in &actions {
            model.update(action).unwrap();
        }
        let before = model.snapshot();

        let result = model.update(&vec![1.0; wrong]);

        prop_assert!(result.is_err());
        prop_assert_eq!(model.snapshot(), before);
    }
}
