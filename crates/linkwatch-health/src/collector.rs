//! Outcome collection for one batch.
//!
//! Probe tasks push their outcome through an [`OutcomeSink`]; the
//! coordinator keeps the [`OutcomeCollector`] and drains it once every
//! task has finished. The channel is unbounded so a producer never waits
//! on the consumer.

use tokio::sync::mpsc;
use tracing::warn;

use linkwatch_core::{BatchResult, ProbeOutcome};

/// Producer handle handed to each probe task.
#[derive(Debug, Clone)]
pub struct OutcomeSink {
    tx: mpsc::UnboundedSender<ProbeOutcome>,
}

impl OutcomeSink {
    /// Submit one outcome. Never blocks.
    pub fn submit(&self, outcome: ProbeOutcome) {
        if let Err(e) = self.tx.send(outcome) {
            // Only possible if the collector was dropped before the batch ended.
            warn!(url = %e.0.target(), "outcome submitted after collector closed");
        }
    }
}

/// Consumer side. Owned by the coordinator for the lifetime of one batch.
#[derive(Debug)]
pub struct OutcomeCollector {
    tx: mpsc::UnboundedSender<ProbeOutcome>,
    rx: mpsc::UnboundedReceiver<ProbeOutcome>,
}

impl Default for OutcomeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeCollector {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// A new producer handle.
    pub fn sink(&self) -> OutcomeSink {
        OutcomeSink {
            tx: self.tx.clone(),
        }
    }

    /// Close the channel and fold every buffered outcome into a result.
    ///
    /// Must only be called after all producers have finished; outcomes
    /// submitted later are lost.
    pub fn finish(self, skipped: usize) -> BatchResult {
        let Self { tx, mut rx } = self;
        drop(tx);

        let mut result = BatchResult {
            skipped,
            ..Default::default()
        };
        while let Ok(outcome) = rx.try_recv() {
            result.record(outcome);
        }
        result
    }
}
