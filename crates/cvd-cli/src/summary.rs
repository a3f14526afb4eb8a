use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cvd_score::ScoreBreakdown;

use cvd_cli::types::BatchRun;

pub fn print_breakdown(breakdown: &ScoreBreakdown) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Term"),
        header_cell("Coefficient"),
        header_cell("Predictor"),
        header_cell("Points"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for term in &breakdown.terms {
        table.add_row(vec![
            Cell::new(term.label),
            Cell::new(term.coefficient),
            Cell::new(format!("{:.4}", term.predictor)),
            points_cell(term.points()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(""),
        dim_cell(""),
        Cell::new(breakdown.score).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Score: {}", breakdown.score);
}

pub fn print_batch_summary(run: &BatchRun) {
    let outcome = &run.outcome;
    println!("Input: {}", run.input.display());
    println!("Output: {}", run.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Scored"),
        header_cell("Failed"),
        header_cell("Stopped early"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(outcome.scored + outcome.failed),
        count_cell(outcome.scored, Color::Green),
        count_cell(outcome.failed, Color::Red),
        if outcome.stopped_early {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            dim_cell("no")
        },
    ]);
    println!("{table}");
    print_error_table(run);
}

fn print_error_table(run: &BatchRun) {
    let mut failures = run.outcome.failures().peekable();
    if failures.peek().is_none() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Record"), header_cell("Error")]);
    apply_error_table_style(&mut table);
    for failure in failures {
        table.add_row(vec![
            Cell::new(&failure.id),
            Cell::new(failure.error.as_deref().unwrap_or("-")).fg(Color::Red),
        ]);
    }
    println!();
    println!("Errors:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_error_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(16)),
        ColumnConstraint::UpperBoundary(Width::Percentage(85)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn points_cell(points: f64) -> Cell {
    let cell = Cell::new(format!("{points:.2}"));
    if points > 0.0 {
        cell.fg(Color::Red)
    } else if points < 0.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::DarkGrey)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
