//! The probe-and-aggregate engine.
//!
//! Probes every target of a batch concurrently and folds the outcomes into
//! a single [`BatchResult`](linkwatch_core::BatchResult).
//!
//! # Architecture
//!
//! ```text
//! BatchCoordinator::run(rows)
//!   ├── skip rows without "http"
//!   ├── one tokio task per target (JoinSet, optional in-flight cap)
//!   │   └── Probe::probe(target) → ProbeOutcome → OutcomeSink
//!   ├── barrier: wait for every task
//!   └── OutcomeCollector::finish() → BatchResult
//! ```
//!
//! # Classification
//!
//! Any HTTP response, 4xx and 5xx included, means the target is reachable.
//! Only transport errors (DNS, refused connection, malformed URL, timeout)
//! are failures. A probe is attempted exactly once.

pub mod batch;
pub mod checker;
pub mod collector;

pub use batch::{BatchCoordinator, is_target_row};
pub use checker::{HttpProber, Probe, ProbeOptions, parse_duration};
pub use collector::{OutcomeCollector, OutcomeSink};
