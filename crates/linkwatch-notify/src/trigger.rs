//! Decide whether to alert, and alert.

use tracing::{error, info};

use linkwatch_core::BatchResult;

use crate::report::build_report;
use crate::slack::{Destination, Notifier};

/// What happened to the alert for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Every probe succeeded; nothing was sent.
    NotNeeded,
    /// The report was accepted by the notifier.
    Sent { failures: usize },
    /// The notifier rejected or never received the report.
    Failed { failures: usize, error: String },
}

/// Build the report for `result` and deliver it if there is one.
///
/// Delivery errors are logged and returned as [`Delivery::Failed`]; they
/// never change the outcome of the run.
pub async fn trigger<N: Notifier>(
    result: &BatchResult,
    destination: &Destination,
    notifier: &N,
) -> Delivery {
    let Some(report) = build_report(result) else {
        return Delivery::NotNeeded;
    };
    let failures = report.failures();

    match notifier.notify(destination, &report).await {
        Ok(()) => {
            info!(failures, channel = %destination.channel, "failure report delivered");
            Delivery::Sent { failures }
        }
        Err(e) => {
            error!(failures, error = %e, "failure report could not be delivered");
            Delivery::Failed {
                failures,
                error: e.to_string(),
            }
        }
    }
}
