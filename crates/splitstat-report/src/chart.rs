//! Chart-series preparation
//!
//! One bar chart per summary metric, shaped for an external charting
//! front-end. Bars carry the per-variant values; each chart carries the
//! significance attribute of its own metric as hover context.

use serde::{Deserialize, Serialize};
use splitstat_core::{Significance, SignificanceSet, SummaryTable, VariantSummary};

/// The three summary metrics a report panel plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartMetric {
    ClickRate,
    AvgDwellTime,
    FeedbackPositiveRate,
}

impl ChartMetric {
    /// Panel title
    pub fn title(&self) -> &'static str {
        match self {
            Self::ClickRate => "Click Rate",
            Self::AvgDwellTime => "Average Dwell Time",
            Self::FeedbackPositiveRate => "Positive Feedback Rate",
        }
    }

    /// Value-axis label
    pub fn axis_label(&self) -> &'static str {
        match self {
            Self::ClickRate | Self::FeedbackPositiveRate => "Proportion",
            Self::AvgDwellTime => "Seconds",
        }
    }

    fn value(&self, row: &VariantSummary) -> f64 {
        match self {
            Self::ClickRate => row.click_rate,
            Self::AvgDwellTime => row.avg_dwell_time,
            Self::FeedbackPositiveRate => row.feedback_positive_rate,
        }
    }

    fn significance(&self, set: &SignificanceSet) -> Significance {
        match self {
            Self::ClickRate => set.click_rate,
            Self::AvgDwellTime => set.dwell_time,
            Self::FeedbackPositiveRate => set.feedback_score,
        }
    }
}

/// One bar of a per-variant chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub variant: String,
    pub value: f64,
    pub sample_size: usize,
}

/// One metric's bar chart across all observed variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub metric: ChartMetric,
    pub title: String,
    pub axis_label: String,
    pub bars: Vec<Bar>,
    pub significance: Significance,
}

/// Prepare one metric's bar chart. Bars inherit the table's row order.
pub fn bar_chart(table: &SummaryTable, metric: ChartMetric) -> BarChart {
    let bars = table
        .rows()
        .iter()
        .map(|row| Bar {
            variant: row.variant.clone(),
            value: metric.value(row),
            sample_size: row.sample_size,
        })
        .collect();

    BarChart {
        metric,
        title: metric.title().to_string(),
        axis_label: metric.axis_label().to_string(),
        bars,
        significance: metric.significance(table.significance()),
    }
}

/// Prepare the three per-metric bar charts of a summary.
///
/// Chart order matches the report layout: click rate, average dwell time,
/// positive feedback rate.
pub fn bar_charts(table: &SummaryTable) -> Vec<BarChart> {
    [
        ChartMetric::ClickRate,
        ChartMetric::AvgDwellTime,
        ChartMetric::FeedbackPositiveRate,
    ]
    .into_iter()
    .map(|metric| bar_chart(table, metric))
    .collect()
}

/// Serialize the three charts as JSON for an external charting front-end.
pub fn charts_json(table: &SummaryTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&bar_charts(table))
}
