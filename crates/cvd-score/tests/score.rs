//! Integration tests for risk score evaluation.

use cvd_model::{
    CholesterolUnit, ClinicalInput, CreatinineUnit, Field, HeightUnit, Measurement, Sex,
    SubjectRecord, ValidationError,
};
use cvd_score::{TermContribution, compute_risk_score, explain, score_record};

fn mmol(value: f64) -> Measurement<CholesterolUnit> {
    Measurement::new(value, CholesterolUnit::MmolPerL)
}

fn mg_dl(value: f64) -> Measurement<CholesterolUnit> {
    Measurement::new(value, CholesterolUnit::MgPerDl)
}

#[test]
fn golden_female_smoker_with_prior_stroke() {
    let input = ClinicalInput::new(70, Sex::Female, 120.0, mg_dl(200.0))
        .with_smoker(true)
        .with_diabetic(true)
        .with_prior_stroke(true)
        .with_height(160.0, HeightUnit::Cm);
    assert_eq!(compute_risk_score(&input).unwrap(), 61.4);

    // 160 cm is also the female default height.
    let mut defaulted = input.clone();
    defaulted.height = None;
    defaulted.height_unit = None;
    assert_eq!(compute_risk_score(&defaulted).unwrap(), 61.4);
}

#[test]
fn golden_male_with_explicit_markers() {
    let input = ClinicalInput::new(39, Sex::Male, 160.0, mmol(8.0))
        .with_creatinine(100.0, CreatinineUnit::UmolPerL)
        .with_height(170.0, HeightUnit::Cm);
    assert_eq!(compute_risk_score(&input).unwrap(), 30.75);
}

#[test]
fn golden_converted_units() {
    let input = ClinicalInput::new(50, Sex::Female, 130.0, mmol(5.0))
        .with_creatinine(1.0, CreatinineUnit::MgPerDl)
        .with_height(65.0, HeightUnit::Inches);
    assert_eq!(compute_risk_score(&input).unwrap(), 18.33);
}

#[test]
fn golden_lower_bounds_score_negative() {
    let input = ClinicalInput::new(35, Sex::Female, 90.0, mmol(3.0));
    assert_eq!(compute_risk_score(&input).unwrap(), -0.15);
}

#[test]
fn golden_upper_bounds() {
    let input = ClinicalInput::new(74, Sex::Female, 250.0, mmol(14.0))
        .with_smoker(true)
        .with_diabetic(true)
        .with_left_ventricular_hypertrophy(true)
        .with_prior_mi(true)
        .with_prior_stroke(true)
        .with_creatinine(200.0, CreatinineUnit::UmolPerL)
        .with_height(120.0, HeightUnit::Cm);
    assert_eq!(compute_risk_score(&input).unwrap(), 107.17);
}

#[test]
fn golden_male_defaults() {
    let input = ClinicalInput::new(60, Sex::Male, 140.0, mmol(6.0))
        .with_smoker(true)
        .with_diabetic(true)
        .with_left_ventricular_hypertrophy(true);
    assert_eq!(compute_risk_score(&input).unwrap(), 49.79);

    let input = ClinicalInput::new(39, Sex::Male, 160.0, mmol(8.0));
    assert_eq!(compute_risk_score(&input).unwrap(), 30.37);
}

#[test]
fn male_default_height_is_173_cm() {
    let defaulted = ClinicalInput::new(55, Sex::Male, 120.0, mmol(5.0));
    let explicit = defaulted.clone().with_height(173.0, HeightUnit::Cm);
    assert_eq!(
        compute_risk_score(&defaulted).unwrap(),
        compute_risk_score(&explicit).unwrap()
    );
    assert_eq!(explain(&defaulted).unwrap().normalized.height, 173.0);
}

#[test]
fn systolic_bp_boundaries() {
    for sbp in [90.0, 250.0] {
        let input = ClinicalInput::new(50, Sex::Male, sbp, mmol(5.0));
        assert!(compute_risk_score(&input).is_ok(), "sbp {sbp}");
    }
    for sbp in [89.999, 250.001] {
        let input = ClinicalInput::new(50, Sex::Male, sbp, mmol(5.0));
        let err = compute_risk_score(&input).unwrap_err();
        assert_eq!(err.field(), Field::SystolicBp, "sbp {sbp}");
    }
}

#[test]
fn cholesterol_mg_dl_boundaries() {
    for value in [100.0, 550.0] {
        let input = ClinicalInput::new(50, Sex::Male, 120.0, mg_dl(value));
        assert!(compute_risk_score(&input).is_ok(), "cholesterol {value}");
    }
    for value in [99.99, 550.01] {
        let input = ClinicalInput::new(50, Sex::Male, 120.0, mg_dl(value));
        let err = compute_risk_score(&input).unwrap_err();
        assert_eq!(err.field(), Field::Cholesterol, "cholesterol {value}");
    }
}

#[test]
fn creatinine_mg_dl_boundaries() {
    let base = ClinicalInput::new(50, Sex::Female, 120.0, mmol(5.0));
    for value in [0.3, 2.3] {
        let input = base.clone().with_creatinine(value, CreatinineUnit::MgPerDl);
        assert!(compute_risk_score(&input).is_ok(), "creatinine {value}");
    }
    for value in [0.29, 2.31] {
        let input = base.clone().with_creatinine(value, CreatinineUnit::MgPerDl);
        let err = compute_risk_score(&input).unwrap_err();
        assert_eq!(err.field(), Field::Creatinine, "creatinine {value}");
    }
}

#[test]
fn height_inches_boundaries() {
    let base = ClinicalInput::new(50, Sex::Female, 120.0, mmol(5.0));
    for value in [45.0, 85.0] {
        let input = base.clone().with_height(value, HeightUnit::Inches);
        assert!(compute_risk_score(&input).is_ok(), "height {value}");
    }
    for value in [44.99, 85.01] {
        let input = base.clone().with_height(value, HeightUnit::Inches);
        let err = compute_risk_score(&input).unwrap_err();
        assert_eq!(err.field(), Field::Height, "height {value}");
    }
}

#[test]
fn creatinine_without_unit_is_rejected() {
    let mut input = ClinicalInput::new(50, Sex::Male, 120.0, mmol(5.0));
    input.creatinine = Some(1.2);
    assert_eq!(
        compute_risk_score(&input).unwrap_err(),
        ValidationError::MissingUnit {
            field: Field::Creatinine
        }
    );
}

#[test]
fn score_record_resolves_tokens_first() {
    let record = SubjectRecord {
        age: 70,
        sex: "F".to_string(),
        smoker: true,
        systolic_bp: 120.0,
        cholesterol: 200.0,
        cholesterol_unit: "MG/DL".to_string(),
        diabetic: true,
        prior_stroke: true,
        height: Some(160.0),
        height_unit: Some("cms".to_string()),
        ..SubjectRecord::default()
    };
    assert_eq!(score_record(&record).unwrap(), 61.4);

    let record = SubjectRecord {
        age: 20,
        sex: "unknown".to_string(),
        ..record
    };
    assert!(matches!(
        score_record(&record).unwrap_err(),
        ValidationError::InvalidEnum { .. }
    ));
}

#[test]
fn explanation_adds_up() {
    let input = ClinicalInput::new(62, Sex::Male, 150.0, mg_dl(240.0))
        .with_smoker(true)
        .with_prior_mi(true);
    let breakdown = explain(&input).unwrap();
    let points: f64 = breakdown.terms.iter().map(TermContribution::points).sum();
    assert!((points - breakdown.unrounded).abs() < 1e-9);
    assert_eq!(breakdown.score, compute_risk_score(&input).unwrap());
}

#[test]
fn scoring_is_thread_safe() {
    let input = ClinicalInput::new(70, Sex::Female, 120.0, mg_dl(200.0))
        .with_smoker(true)
        .with_diabetic(true)
        .with_prior_stroke(true);
    let scores: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compute_risk_score(&input).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert!(scores.iter().all(|&score| score == 61.4));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn sex() -> impl Strategy<Value = Sex> {
        prop_oneof![Just(Sex::Male), Just(Sex::Female)]
    }

    proptest! {
        #[test]
        fn valid_inputs_always_score(
            age in 35u32..=74,
            sex in sex(),
            sbp in 90.0f64..=250.0,
            chol in 3.0f64..=14.0,
            flags in any::<[bool; 5]>(),
        ) {
            let input = ClinicalInput::new(age, sex, sbp, mmol(chol))
                .with_smoker(flags[0])
                .with_diabetic(flags[1])
                .with_left_ventricular_hypertrophy(flags[2])
                .with_prior_mi(flags[3])
                .with_prior_stroke(flags[4]);
            let score = compute_risk_score(&input).unwrap();
            prop_assert!(score.is_finite());
        }

        #[test]
        fn valid_mg_dl_cholesterol_always_scores(chol in 100.0f64..=550.0, sex in sex()) {
            let input = ClinicalInput::new(50, sex, 120.0, mg_dl(chol));
            prop_assert!(compute_risk_score(&input).unwrap().is_finite());
        }

        #[test]
        fn age_outside_range_is_rejected(
            age in prop_oneof![0u32..35, 75u32..150],
            sex in sex(),
        ) {
            let input = ClinicalInput::new(age, sex, 120.0, mmol(5.0));
            match compute_risk_score(&input) {
                Err(ValidationError::Range(range)) => prop_assert_eq!(range.field, Field::Age),
                other => prop_assert!(false, "unexpected result {:?}", other),
            }
        }

        #[test]
        fn scoring_is_idempotent(age in 35u32..=74, sbp in 90.0f64..=250.0, sex in sex()) {
            let input = ClinicalInput::new(age, sex, sbp, mmol(6.5)).with_smoker(true);
            prop_assert_eq!(
                compute_risk_score(&input).unwrap(),
                compute_risk_score(&input).unwrap()
            );
        }

        #[test]
        fn cholesterol_units_agree(chol in 3.0f64..=14.0, sex in sex()) {
            let in_mmol = ClinicalInput::new(58, sex, 135.0, mmol(chol));
            let in_mg_dl = ClinicalInput::new(58, sex, 135.0, mg_dl(chol * 38.7));
            let a = explain(&in_mmol).unwrap().unrounded;
            let b = explain(&in_mg_dl).unwrap().unrounded;
            prop_assert!((a - b).abs() < 1e-9);
        }

        #[test]
        fn omitted_creatinine_matches_male_default(age in 35u32..=74, sbp in 90.0f64..=250.0) {
            let omitted = ClinicalInput::new(age, Sex::Male, sbp, mmol(5.0));
            let explicit = omitted.clone().with_creatinine(101.0, CreatinineUnit::UmolPerL);
            prop_assert_eq!(
                compute_risk_score(&omitted).unwrap(),
                compute_risk_score(&explicit).unwrap()
            );
        }
    }
}
