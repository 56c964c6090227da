//! Batch coordinator. Fans a target list out to concurrent probes.
//!
//! Every row that looks like a URL gets its own tokio task. The coordinator
//! then waits on all of them before handing back the aggregated result;
//! there is no early exit and no batch-level timeout.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, info};

use linkwatch_core::{BatchResult, ProbeOutcome, Target};

use crate::checker::{HttpProber, Probe, ProbeOptions};
use crate::collector::OutcomeCollector;

/// Whether a source row should be probed.
///
/// A plain substring test: header rows and blank lines are dropped, and a
/// row with "http" anywhere in it is kept even if it is not a valid URL.
pub fn is_target_row(row: &str) -> bool {
    row.contains("http")
}

/// Runs batches of probes with a shared prober.
pub struct BatchCoordinator<P> {
    prober: Arc<P>,
    /// Cap on concurrently running probes. `None` spawns everything at once.
    max_in_flight: Option<usize>,
}

impl<P: Probe> BatchCoordinator<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober: Arc::new(prober),
            max_in_flight: None,
        }
    }

    /// Limit the number of probes in flight. A limit of zero is treated as one.
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit.map(|n| n.max(1));
        self
    }

    /// Probe every target row and return once all probes have finished.
    ///
    /// Rows failing [`is_target_row`] are counted in `skipped` and never
    /// dispatched. Each dispatched row yields exactly one outcome.
    pub async fn run<I, S>(&self, rows: I) -> BatchResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collector = OutcomeCollector::new();
        let limiter = self.max_in_flight.map(|n| Arc::new(Semaphore::new(n)));

        let mut tasks = JoinSet::new();
        let mut in_flight: HashMap<task::Id, Target> = HashMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let row: String = row.into();
            if !is_target_row(&row) {
                debug!(%row, "skipping non-target row");
                skipped += 1;
                continue;
            }

            let target = Target::new(row);
            let prober = Arc::clone(&self.prober);
            let sink = collector.sink();
            let limiter = limiter.clone();
            let task_target = target.clone();

            let handle = tasks.spawn(async move {
                // Held for the duration of the probe.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = prober.probe(task_target).await;
                sink.submit(outcome);
            });
            in_flight.insert(handle.id(), target);
        }

        info!(
            dispatched = in_flight.len(),
            skipped,
            max_in_flight = ?self.max_in_flight,
            "batch dispatched"
        );

        // Barrier: every task must report back before the result is read.
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, ())) => {
                    in_flight.remove(&id);
                }
                Err(e) => {
                    if let Some(target) = in_flight.remove(&e.id()) {
                        error!(%target, error = %e, "probe task did not complete");
                        collector
                            .sink()
                            .submit(ProbeOutcome::failure(target, format!("probe task failed: {e}")));
                    }
                }
            }
        }

        let result = collector.finish(skipped);
        info!(
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            skipped = result.skipped,
            "batch complete"
        );
        result
    }
}

impl BatchCoordinator<HttpProber> {
    /// HTTP coordinator built from one set of options: the client gets the
    /// timeout and user agent, the coordinator gets the in-flight cap.
    pub fn from_options(options: &ProbeOptions) -> Result<Self, reqwest::Error> {
        Ok(Self::new(HttpProber::new(options)?).with_max_in_flight(options.max_in_flight))
    }
}
