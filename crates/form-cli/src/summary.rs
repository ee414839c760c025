use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use form_cli::lint::{LintFinding, Severity};
use form_cli::report::{FormReport, ReplayStep, StatusRow};
use form_validate::{EventOutcome, FieldStatus, SubmitOutcome};

pub fn print_report(report: &FormReport) {
    if let Some(title) = &report.title {
        println!("Form: {title}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entry"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Touched"),
        header_cell("Value"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in &report.entries {
        table.add_row(status_row(row));
    }
    println!("{table}");
    print_outcome(report);
}

pub fn print_replay(steps: &[ReplayStep]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Event"),
        header_cell("Target"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for step in steps {
        let target = step.target.clone().unwrap_or_else(|| "-".to_string());
        let (status, message) = match &step.outcome {
            EventOutcome::Entry { status, .. } => {
                (status_cell(status), message_cell(status.message()))
            }
            EventOutcome::Submit { outcome } => outcome_cells(outcome),
        };
        table.add_row(vec![
            Cell::new(step.index),
            Cell::new(step.event),
            Cell::new(target),
            status,
            message,
        ]);
    }
    println!("{table}");
}

pub fn print_findings(findings: &[LintFinding]) {
    if findings.is_empty() {
        println!("No problems found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entry"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for finding in findings {
        table.add_row(vec![
            Cell::new(&finding.entry),
            severity_cell(finding.severity),
            Cell::new(&finding.message),
        ]);
    }
    println!("{table}");
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    println!(
        "{errors} error(s), {} warning(s)",
        findings.len() - errors
    );
}

fn print_outcome(report: &FormReport) {
    for line in outcome_lines(report) {
        println!("{line}");
    }
}

/// The last submit attempt and the current state are reported separately:
/// events after a rejected attempt may have made the form submittable.
fn outcome_lines(report: &FormReport) -> [String; 2] {
    let attempts = report.submit_attempts;
    let last = match &report.outcome {
        Some(SubmitOutcome::Accepted(_)) => {
            format!("Last submit attempt: accepted (attempt {attempts})")
        }
        Some(SubmitOutcome::Rejected(errors)) => format!(
            "Last submit attempt: rejected (attempt {attempts}, {} invalid)",
            errors.len()
        ),
        None => "Last submit attempt: none".to_string(),
    };
    let current = if report.submittable {
        "Current state: submittable"
    } else {
        "Current state: has invalid entries"
    };
    [last, current.to_string()]
}

fn status_row(row: &StatusRow) -> Vec<Cell> {
    vec![
        Cell::new(&row.name).add_attribute(Attribute::Bold),
        dim_cell(row.kind),
        flag_cell(row.required),
        flag_cell(row.touched),
        Cell::new(if row.value.is_empty() { "-" } else { row.value.as_str() }),
        status_cell(&row.display),
        message_cell(row.display.message()),
    ]
}

fn outcome_cells(outcome: &SubmitOutcome) -> (Cell, Cell) {
    match outcome {
        SubmitOutcome::Accepted(_) => (
            Cell::new("Accepted")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
        ),
        SubmitOutcome::Rejected(errors) => (
            Cell::new("Rejected")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{} invalid", errors.len())),
        ),
    }
}

fn status_cell(status: &FieldStatus) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        FieldStatus::Pristine => cell.fg(Color::DarkGrey),
        FieldStatus::Invalid(_) => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        FieldStatus::ValidSilent | FieldStatus::ValidWithSuccessMessage(_) => {
            cell.fg(Color::Green)
        }
    }
}

fn message_cell(message: Option<&str>) -> Cell {
    match message {
        Some(message) => Cell::new(message),
        None => dim_cell("-"),
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn report(outcome: Option<SubmitOutcome>, submittable: bool) -> FormReport {
        FormReport {
            title: None,
            entries: Vec::new(),
            submittable,
            submit_attempts: usize::from(outcome.is_some()),
            outcome,
        }
    }

    #[test]
    fn test_rejected_attempt_then_fixed_form() {
        let errors = BTreeMap::from([("email".to_string(), "Required".to_string())]);
        let lines = outcome_lines(&report(Some(SubmitOutcome::Rejected(errors)), true));
        assert_eq!(
            lines,
            [
                "Last submit attempt: rejected (attempt 1, 1 invalid)".to_string(),
                "Current state: submittable".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_attempt() {
        let lines = outcome_lines(&report(None, false));
        assert_eq!(lines[0], "Last submit attempt: none");
        assert_eq!(lines[1], "Current state: has invalid entries");
    }
}
