//! Subject records from CSV files.
//!
//! The first row is the header. Header names are matched after
//! normalization (trimmed, BOM stripped, lowercased, runs of whitespace and
//! dashes collapsed to `_`), and each field accepts a few common aliases.
//! Columns that match no field, such as an exported row index, are ignored.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use cvd_model::SubjectRecord;

use crate::error::{IngestError, Result};

struct ColumnSpec {
    name: &'static str,
    aliases: &'static [&'static str],
    required: bool,
    /// Cell text assumed when the column is absent or the cell is blank.
    default: Option<&'static str>,
}

const fn required(name: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required: false,
        default: None,
    }
}

const fn defaulted(
    name: &'static str,
    aliases: &'static [&'static str],
    default: &'static str,
) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required: false,
        default: Some(default),
    }
}

/// Exported cohort datasets often carry only age, sex, cholesterol, blood
/// pressure and smoking; cholesterol is then in mmol/l and history flags
/// are unset.
const COLUMNS: &[ColumnSpec] = &[
    optional("id", &["subject_id", "usubjid"]),
    required("age", &[]),
    required("sex", &["gender"]),
    required("smoker", &["smokes", "smoking"]),
    required("systolic_bp", &["sbp", "max_press"]),
    required("cholesterol", &["chol"]),
    defaulted("cholesterol_unit", &["chol_unit", "cholunits"], "mmol/l"),
    defaulted("diabetic", &["diabetes", "diab"], "false"),
    defaulted("left_ventricular_hypertrophy", &["lvh"], "false"),
    defaulted("prior_mi", &["mi"], "false"),
    defaulted("prior_stroke", &["stroke", "st"], "false"),
    optional("creatinine", &["creat"]),
    optional("creatinine_unit", &["creat_unit", "creatunits"]),
    optional("height", &["hght"]),
    optional("height_unit", &["hght_unit", "hghtunits"]),
];

fn column_default(column: &str) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|spec| spec.name == column)
        .and_then(|spec| spec.default)
}

/// Normalize a header cell for matching against known column names.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Parse a boolean cell: true/false, yes/no, y/n or 1/0, any case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Whole years, also accepting integral floats such as `70.0`.
fn parse_age(value: &str) -> Option<u32> {
    if let Ok(age) = value.parse::<u32>() {
        return Some(age);
    }
    let age = value.parse::<f64>().ok()?;
    if age.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&age) {
        Some(age as u32)
    } else {
        None
    }
}

/// Header positions of the known columns.
struct ColumnIndex {
    positions: BTreeMap<&'static str, usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let mut positions = BTreeMap::new();
        for spec in COLUMNS {
            let position = normalized
                .iter()
                .position(|header| header == spec.name || spec.aliases.contains(&header.as_str()));
            match position {
                Some(index) => {
                    positions.insert(spec.name, index);
                }
                None if spec.required => {
                    return Err(IngestError::MissingColumn {
                        column: spec.name.to_string(),
                        path: path.to_path_buf(),
                    });
                }
                None => {
                    if let Some(default) = spec.default {
                        debug!(column = spec.name, default, "column absent, using default");
                    }
                }
            }
        }
        Ok(Self { positions })
    }
}

/// One data row with its source location, for error reporting.
struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a ColumnIndex,
    line: u64,
    path: &'a Path,
}

impl Row<'_> {
    /// Trimmed, non-empty cell for `column`, if present.
    fn cell(&self, column: &'static str) -> Option<&str> {
        let index = *self.columns.positions.get(column)?;
        let value = normalize_cell(self.record.get(index)?);
        (!value.is_empty()).then_some(value)
    }

    /// Like [`Row::cell`], falling back to the column default.
    fn value(&self, column: &'static str) -> Option<&str> {
        self.cell(column).or_else(|| column_default(column))
    }

    fn invalid(&self, column: &str, value: &str) -> IngestError {
        IngestError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
            line: self.line,
            path: self.path.to_path_buf(),
        }
    }

    fn text(&self, column: &'static str) -> Result<String> {
        self.value(column)
            .map(str::to_string)
            .ok_or_else(|| self.invalid(column, ""))
    }

    fn number<T: FromStr>(&self, column: &'static str) -> Result<T> {
        let value = self.cell(column).unwrap_or_default();
        value.parse().map_err(|_| self.invalid(column, value))
    }

    fn optional_number(&self, column: &'static str) -> Result<Option<f64>> {
        match self.cell(column) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(column, value)),
            None => Ok(None),
        }
    }

    fn flag(&self, column: &'static str) -> Result<bool> {
        let value = self.value(column).unwrap_or_default();
        parse_flag(value).ok_or_else(|| self.invalid(column, value))
    }

    fn age(&self) -> Result<u32> {
        let value = self.cell("age").unwrap_or_default();
        parse_age(value).ok_or_else(|| self.invalid("age", value))
    }

    fn to_subject(&self) -> Result<SubjectRecord> {
        Ok(SubjectRecord {
            id: self.cell("id").map(str::to_string),
            age: self.age()?,
            sex: self.text("sex")?,
            smoker: self.flag("smoker")?,
            systolic_bp: self.number("systolic_bp")?,
            cholesterol: self.number("cholesterol")?,
            cholesterol_unit: self.text("cholesterol_unit")?,
            diabetic: self.flag("diabetic")?,
            left_ventricular_hypertrophy: self.flag("left_ventricular_hypertrophy")?,
            prior_mi: self.flag("prior_mi")?,
            prior_stroke: self.flag("prior_stroke")?,
            creatinine: self.optional_number("creatinine")?,
            creatinine_unit: self.cell("creatinine_unit").map(str::to_string),
            height: self.optional_number("height")?,
            height_unit: self.cell("height_unit").map(str::to_string),
        })
    }
}

/// One data row of a subject file.
#[derive(Debug)]
pub struct SubjectRow {
    /// Line of the row in the source file.
    pub line: u64,
    /// Value of the id column, read even when other cells are bad.
    pub id: Option<String>,
    /// The parsed record, or the first cell that could not be parsed.
    pub record: Result<SubjectRecord>,
}

/// Read every data row of a CSV file. Blank rows are skipped.
///
/// A cell that cannot be parsed only fails its own row.
///
/// # Errors
///
/// Fails on a missing file, a missing required column or a malformed
/// record.
pub fn read_subject_rows(path: &Path) -> Result<Vec<SubjectRow>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader
        .headers()
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = ColumnIndex::resolve(&headers, path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            line: error.position().map_or(0, csv::Position::line),
            message: error.to_string(),
        })?;
        if record.iter().all(|cell| normalize_cell(cell).is_empty()) {
            continue;
        }
        let row = Row {
            record: &record,
            columns: &columns,
            line: record.position().map_or(0, csv::Position::line),
            path,
        };
        let parsed = row.to_subject();
        if let Err(error) = &parsed {
            debug!(line = row.line, %error, "row not parsed");
        }
        rows.push(SubjectRow {
            line: row.line,
            id: row.cell("id").map(str::to_string),
            record: parsed,
        });
    }
    debug!(
        path = %path.display(),
        row_count = rows.len(),
        "subject rows loaded"
    );
    Ok(rows)
}

/// Read every subject record from a CSV file, failing on the first row
/// that cannot be parsed.
///
/// # Errors
///
/// Fails on anything [`read_subject_rows`] fails on, and on the first cell
/// that cannot be parsed for its column. Clinical validation is not
/// performed here.
pub fn read_subject_records(path: &Path) -> Result<Vec<SubjectRecord>> {
    read_subject_rows(path)?
        .into_iter()
        .map(|row| row.record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff} Systolic BP "), "systolic_bp");
        assert_eq!(normalize_header("prior-MI"), "prior_mi");
        assert_eq!(normalize_header("Cholesterol  Unit"), "cholesterol_unit");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("y"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_column_defaults() {
        assert_eq!(column_default("cholesterol_unit"), Some("mmol/l"));
        assert_eq!(column_default("prior_stroke"), Some("false"));
        assert_eq!(column_default("sex"), None);
        assert_eq!(column_default("height_unit"), None);
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("70"), Some(70));
        assert_eq!(parse_age("70.0"), Some(70));
        assert_eq!(parse_age("70.5"), None);
        assert_eq!(parse_age("-3"), None);
        assert_eq!(parse_age("abc"), None);
    }
}
