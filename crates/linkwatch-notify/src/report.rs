//! Failure report formatting.

use std::fmt;

use linkwatch_core::{BatchResult, Failure};

/// First line of every report.
pub const REPORT_HEADER: &str = ":warning:Errors found in the following domains :";

/// Chat-ready text listing every failed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReport {
    text: String,
    failures: usize,
}

impl NotificationReport {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of failure lines in the report.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl fmt::Display for NotificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the report for a batch, or `None` when nothing failed.
///
/// Failures are listed sorted by target, then by error text, so the same
/// batch always renders the same report whatever order probes finished in.
/// Each line is wrapped in backticks so chat clients render one code span
/// per failure.
pub fn build_report(result: &BatchResult) -> Option<NotificationReport> {
    if result.failed.is_empty() {
        return None;
    }

    let mut failed: Vec<&Failure> = result.failed.iter().collect();
    failed.sort_by(|a, b| a.target.cmp(&b.target).then_with(|| a.error.cmp(&b.error)));

    let mut text = String::from(REPORT_HEADER);
    text.push('\n');
    for failure in &failed {
        text.push('`');
        text.push_str(&failure.to_string());
        text.push_str("`\n");
    }

    Some(NotificationReport {
        text,
        failures: failed.len(),
    })
}
