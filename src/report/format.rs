//! Formatted terminal output.
//!
//! Conventions: values to 5 decimals, finite slopes to 2 decimals, and the
//! literal labels `0` / `inf` for the flat and pure-helium bounds.

use crate::app::pipeline::BatchOutcome;
use crate::calc::{Output, Row};
use crate::domain::{Bound, Direction};
use crate::io::batch::RowError;
use crate::validate::Warning;

fn row_label(direction: Direction, bound: Bound) -> &'static str {
    match (direction, bound) {
        (Direction::Luminosity, Bound::Min) => "log(L_min/Lsun):",
        (Direction::Luminosity, Bound::Max) => "log(L_max/Lsun):",
        (Direction::Luminosity, Bound::Helium) => "log(L_He/Lsun): ",
        (Direction::Mass, Bound::Min) => "M_min/Msun:",
        (Direction::Mass, Bound::Max) => "M_max/Msun:",
        (Direction::Mass, Bound::Helium) => "M_He/Msun: ",
    }
}

fn format_row(direction: Direction, row: &Row) -> String {
    format!(
        "  {} {:.5}, slope: {}",
        row_label(direction, row.bound),
        row.value,
        row.slope
    )
}

/// Format a single-star result: inputs, outputs, then warnings (if any).
pub fn format_output(output: &Output) -> String {
    let mut out = String::new();
    let direction = output.direction();

    out.push_str("Inputs:\n");
    match output {
        Output::Luminosity(o) => {
            out.push_str(&format!("  Mass (Msun): {}\n", o.mass));
            out.push_str(&format!("  X (mass fraction): {}\n", o.composition.x()));
            out.push_str(&format!("  Z (mass fraction): {}\n", o.composition.z()));
        }
        Output::Mass(o) => {
            out.push_str(&format!("  Luminosity (logL): {}\n", o.luminosity));
            out.push_str(&format!("  X (mass fraction): {}\n", o.composition.x()));
            out.push_str(&format!("  Z (mass fraction): {}\n", o.composition.z()));
        }
    }

    out.push_str("\nOutputs:\n");
    for row in output.rows() {
        out.push_str(&format_row(direction, &row));
        out.push('\n');
    }

    out.push_str(&format_warnings(output.warnings()));
    out
}

/// Format a warning block, or nothing when there are no warnings.
pub fn format_warnings(warnings: &[Warning]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let mut out = String::from("\nWarning(s):\n");
    for w in warnings {
        out.push_str(&format!("  {w}\n"));
    }
    out
}

/// Format a batch run as a table, followed by skipped input rows.
pub fn format_batch(
    outcomes: &[BatchOutcome],
    direction: Direction,
    row_errors: &[RowError],
) -> String {
    let mut out = String::new();

    let header = format!(
        "{:<16} {:>10} {:>6} {:>7} {:>10} {:>10} {:>10} {:>6} {:>4} {}",
        "id", "value", "X", "Z", "min", "max", "he", "slope", "warn", "status"
    );
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&format!(
        "{:-<16} {:-<10} {:-<6} {:-<7} {:-<10} {:-<10} {:-<10} {:-<6} {:-<4} {:-<6}\n",
        "", "", "", "", "", "", "", "", "", ""
    ));

    for outcome in outcomes {
        let row = &outcome.row;
        let mut cells = [String::new(), String::new(), String::new(), String::new()];
        let (warn, status) = match &outcome.result {
            Ok(output) => {
                for r in output.rows() {
                    let idx = match r.bound {
                        Bound::Min => 0,
                        Bound::Max => 1,
                        Bound::Helium => 2,
                    };
                    cells[idx] = format!("{:.5}", r.value);
                    if r.bound == Bound::Min {
                        cells[3] = r.slope.to_string();
                    }
                }
                if cells[3].is_empty() {
                    cells[3] = "inf".to_string();
                }
                let status = if output.is_reliable() { "ok" } else { "unreliable" };
                (output.warnings().len().to_string(), status.to_string())
            }
            Err(err) => (String::new(), format!("error: {err}")),
        };

        let line = format!(
            "{:<16} {:>10} {:>6} {:>7} {:>10} {:>10} {:>10} {:>6} {:>4} {}",
            truncate(&row.id, 16),
            row.value,
            row.x,
            row.z,
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            warn,
            status
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let summary = match direction {
        Direction::Luminosity => "mass -> luminosity",
        Direction::Mass => "luminosity -> mass",
    };
    out.push_str(&format!("\n{} stars ({summary}), {failed} failed\n", outcomes.len()));

    if !row_errors.is_empty() {
        out.push_str("\nSkipped input rows:\n");
        for e in row_errors {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{forward, inverse};
    use crate::domain::{Composition, SolverConfig};
    use crate::error::ModelError;
    use crate::io::batch::StarRow;
    use crate::models::MlRelation;

    #[test]
    fn luminosity_report_uses_display_conventions() {
        let rel = MlRelation::standard();
        let out = forward(&rel, 5.0, Composition::new(0.3, 0.008).unwrap()).unwrap();
        let text = format_output(&Output::Luminosity(out));
        assert!(text.contains("  log(L_min/Lsun): 3.64805, slope: 1.93\n"), "{text}");
        assert!(text.contains("  log(L_max/Lsun): 4.96705, slope: 0\n"), "{text}");
        assert!(text.contains("  log(L_He/Lsun):  4.47556, slope: inf\n"), "{text}");
        assert!(!text.contains("Warning(s)"));
    }

    #[test]
    fn hydrogen_free_report_shows_helium_only() {
        let rel = MlRelation::standard();
        let composition = Composition::new(0.0, 0.008).unwrap();
        let out = inverse(&rel, 3.0, composition, &SolverConfig::default()).unwrap();
        let text = format_output(&Output::Mass(out));
        assert!(text.contains("  M_He/Msun:  1.49432, slope: inf\n"), "{text}");
        assert!(!text.contains("M_min"));
    }

    #[test]
    fn warnings_are_listed_in_order() {
        let rel = MlRelation::standard();
        let out = forward(&rel, 0.5, Composition::new(0.75, 0.006).unwrap()).unwrap();
        let text = format_output(&Output::Luminosity(out));
        let block = text.split("Warning(s):\n").nth(1).unwrap();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("for L_max"));
        assert!(lines[1].contains("for L_min and L_He"));
        assert!(lines[2].contains("Input X"));
        assert!(lines[3].contains("interpolated"));
    }

    #[test]
    fn batch_table_reports_failures_inline() {
        let outcomes = vec![BatchOutcome {
            row: StarRow {
                id: "a-very-long-star-identifier".to_string(),
                value: 9.0,
                x: 0.3,
                z: 0.008,
            },
            result: Err(ModelError::Bracketing {
                branch: crate::domain::Branch::LMin,
                z: 0.008,
            }),
        }];
        let errors = vec![RowError {
            line: 4,
            message: "bad float".to_string(),
        }];
        let text = format_batch(&outcomes, Direction::Mass, &errors);
        assert!(text.contains("a-very-long-sta…"));
        assert!(text.contains("error: One or more inputs"));
        assert!(text.contains("1 stars (luminosity -> mass), 1 failed"));
        assert!(text.contains("line 4: bad float"));
    }
}
