//! CLI argument definitions for the risk score calculator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cvd-risk",
    version,
    about = "Cardiovascular risk score calculator",
    long_about = "Compute a cardiovascular risk score from clinical measurements.\n\n\
                  Scores a single subject from flags or a CSV file of subjects.\n\
                  Cholesterol, creatinine and height are accepted in either unit."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow clinical values in log output.
    ///
    /// Values are redacted by default.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one subject given on the command line.
    Score(ScoreArgs),

    /// Score every subject in a CSV file.
    Batch(BatchArgs),

    /// List the accepted input ranges and defaults.
    Ranges,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Age in whole years.
    #[arg(long)]
    pub age: u32,

    /// Sex (male, female, m, f).
    #[arg(long)]
    pub sex: String,

    #[arg(long)]
    pub smoker: bool,

    /// Systolic blood pressure in mm Hg.
    #[arg(long = "sbp", visible_alias = "systolic-bp", value_name = "MMHG")]
    pub systolic_bp: f64,

    /// Total cholesterol.
    #[arg(long)]
    pub cholesterol: f64,

    /// Cholesterol unit (mmol/l or mg/dl).
    #[arg(long = "cholesterol-unit", value_name = "UNIT")]
    pub cholesterol_unit: String,

    #[arg(long)]
    pub diabetic: bool,

    /// Left ventricular hypertrophy.
    #[arg(long)]
    pub lvh: bool,

    /// Prior myocardial infarction.
    #[arg(long = "prior-mi")]
    pub prior_mi: bool,

    #[arg(long = "prior-stroke")]
    pub prior_stroke: bool,

    /// Serum creatinine (default by sex when omitted).
    #[arg(long)]
    pub creatinine: Option<f64>,

    /// Creatinine unit (µmol/l or mg/dl).
    #[arg(long = "creatinine-unit", value_name = "UNIT")]
    pub creatinine_unit: Option<String>,

    /// Height (default by sex when omitted).
    #[arg(long)]
    pub height: Option<f64>,

    /// Height unit (cm or inches).
    #[arg(long = "height-unit", value_name = "UNIT")]
    pub height_unit: Option<String>,

    /// Print a table of the weighted terms behind the score.
    #[arg(long)]
    pub explain: bool,

    /// Print the score as JSON.
    #[arg(long, conflicts_with = "explain")]
    pub json: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// CSV file with one subject per row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (default: <INPUT stem>_scored.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Stop at the first subject that fails validation.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Leave subjects that fail validation out of the output file.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
