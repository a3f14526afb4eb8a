use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info_span};

use cvd_ingest::BatchOptions;
use cvd_model::{ClinicalInput, Sex, SubjectRecord, VALID_RANGES};
use cvd_score::{compute_risk_score, default_creatinine, default_height, explain};

use cvd_cli::logging::redact_value;
use cvd_cli::pipeline::run_batch as run_batch_file;
use cvd_cli::types::{BatchRun, ScoreReport};

use crate::cli::{BatchArgs, ScoreArgs};
use crate::summary::{apply_table_style, print_breakdown};

pub fn run_ranges() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Unit", "Minimum", "Maximum"]);
    apply_table_style(&mut table);
    for range in VALID_RANGES {
        table.add_row(vec![
            range.field.to_string(),
            range.unit.to_string(),
            range.min.to_string(),
            range.max.to_string(),
        ]);
    }
    println!("{table}");

    let mut defaults = Table::new();
    defaults.set_header(vec!["Sex", "Creatinine (µmol/l)", "Height (cm)"]);
    apply_table_style(&mut defaults);
    for sex in [Sex::Female, Sex::Male] {
        defaults.add_row(vec![
            sex.to_string(),
            default_creatinine(sex).to_string(),
            default_height(sex).to_string(),
        ]);
    }
    println!("Defaults used when a measurement is omitted:");
    println!("{defaults}");
    Ok(())
}

pub fn run_score(args: &ScoreArgs) -> Result<()> {
    let span = info_span!("score");
    let _guard = span.enter();
    let record = subject_from_args(args);
    let input = ClinicalInput::try_from(&record)?;

    if args.explain || args.json {
        let breakdown = explain(&input)?;
        if args.json {
            let report = ScoreReport::new(&input, &breakdown);
            let body = serde_json::to_string_pretty(&report).context("serialize score")?;
            println!("{body}");
        } else {
            print_breakdown(&breakdown);
        }
        return Ok(());
    }

    let score = compute_risk_score(&input)?;
    let score_text = score.to_string();
    debug!(score = %redact_value(&score_text), "subject scored");
    println!("{score}");
    Ok(())
}

pub fn run_batch(args: &BatchArgs) -> Result<BatchRun> {
    let options = BatchOptions::new()
        .with_fail_fast(args.fail_fast)
        .with_skip_invalid(args.skip_invalid);
    run_batch_file(&args.input, args.output.as_deref(), &options)
}

fn subject_from_args(args: &ScoreArgs) -> SubjectRecord {
    SubjectRecord {
        id: None,
        age: args.age,
        sex: args.sex.clone(),
        smoker: args.smoker,
        systolic_bp: args.systolic_bp,
        cholesterol: args.cholesterol,
        cholesterol_unit: args.cholesterol_unit.clone(),
        diabetic: args.diabetic,
        left_ventricular_hypertrophy: args.lvh,
        prior_mi: args.prior_mi,
        prior_stroke: args.prior_stroke,
        creatinine: args.creatinine,
        creatinine_unit: args.creatinine_unit.clone(),
        height: args.height,
        height_unit: args.height_unit.clone(),
    }
}
