//! Text rendering of summary tables
//!
//! Fixed-width column layout with the significance attributes repeated on
//! every row. Rates render as two-decimal percentages, dwell time in
//! seconds, p-values in scientific notation. An undefined significance
//! renders as `n/a (reason)` so it can never be misread as a number.

use std::fmt;

use splitstat_core::{Significance, SummaryTable};

/// Borrowing adapter that renders a summary as a fixed-width text table
pub struct TextReport<'a> {
    table: &'a SummaryTable,
}

impl<'a> TextReport<'a> {
    pub fn new(table: &'a SummaryTable) -> Self {
        Self { table }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!(
            "{:<10}  {:>11}  {:>10}  {:>14}  {:>22}  {:>18}  {:>18}  {:>22}",
            "variant",
            "sample_size",
            "click_rate",
            "avg_dwell_time",
            "feedback_positive_rate",
            "click_rate_p_value",
            "dwell_time_p_value",
            "feedback_score_p_value",
        );

        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", "=".repeat(header.len()))?;
        writeln!(f, "{}", header)?;

        if self.table.is_empty() {
            return writeln!(f, "(no variants observed)");
        }

        let sig = self.table.significance();
        for row in self.table.rows() {
            writeln!(
                f,
                "{:<10}  {:>11}  {:>10}  {:>14}  {:>22}  {:>18}  {:>18}  {:>22}",
                row.variant,
                row.sample_size,
                format!("{:.2}%", row.click_rate * 100.0),
                format!("{:.1} sec", row.avg_dwell_time),
                format!("{:.2}%", row.feedback_positive_rate * 100.0),
                significance_cell(&sig.click_rate),
                significance_cell(&sig.dwell_time),
                significance_cell(&sig.feedback_score),
            )?;
        }
        Ok(())
    }
}

/// Render a summary table as fixed-width text.
pub fn render_text(table: &SummaryTable) -> String {
    TextReport::new(table).to_string()
}

fn significance_cell(sig: &Significance) -> String {
    match sig {
        Significance::PValue(p) => format!("{:.2e}", p),
        Significance::Undefined(reason) => format!("n/a ({})", reason),
    }
}
