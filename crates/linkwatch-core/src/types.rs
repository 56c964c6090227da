//! Shared types used across linkwatch crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single URL to be probed.
///
/// Identity is the raw string value. Two equal rows in a source list are two
/// independent targets; nothing here deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// The target answered. `status` is the response status line, e.g. `404 Not Found`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub target: Target,
    pub status: String,
}

/// The target could not be reached. `error` is the transport error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub target: Target,
    pub error: String,
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.status)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.error)
    }
}

/// Classified result of one probe. Exactly one exists per dispatched target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Success(Success),
    Failure(Failure),
}

impl ProbeOutcome {
    pub fn success(target: Target, status: impl Into<String>) -> Self {
        ProbeOutcome::Success(Success {
            target,
            status: status.into(),
        })
    }

    pub fn failure(target: Target, error: impl Into<String>) -> Self {
        ProbeOutcome::Failure(Failure {
            target,
            error: error.into(),
        })
    }

    pub fn target(&self) -> &Target {
        match self {
            ProbeOutcome::Success(s) => &s.target,
            ProbeOutcome::Failure(f) => &f.target,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

/// Aggregated outcomes of one run.
///
/// `succeeded` and `failed` are in completion order. `skipped` counts source
/// rows that were never dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<Success>,
    pub failed: Vec<Failure>,
    pub skipped: usize,
}

impl BatchResult {
    /// Number of targets that were probed.
    pub fn dispatched(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// File one outcome into the matching set.
    pub fn record(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Success(s) => self.succeeded.push(s),
            ProbeOutcome::Failure(f) => self.failed.push(f),
        }
    }

    /// Terminal line printed at the end of every completed run.
    pub fn summary(&self) -> String {
        format!("Successfully checked {}", self.succeeded.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_outcomes() {
        let mut result = BatchResult::default();
        result.record(ProbeOutcome::success("http://b.test".into(), "200 OK"));
        result.record(ProbeOutcome::failure("http://a.test".into(), "dns error"));
        result.record(ProbeOutcome::success("http://c.test".into(), "404 Not Found"));

        assert_eq!(result.succeeded.len(), 2);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.dispatched(), 3);
        assert!(result.has_failures());
        assert_eq!(result.failed[0].target.as_str(), "http://a.test");
    }

    #[test]
    fn summary_counts_successes_only() {
        let mut result = BatchResult::default();
        result.record(ProbeOutcome::success("http://b.test".into(), "200 OK"));
        result.record(ProbeOutcome::failure("http://a.test".into(), "refused"));
        assert_eq!(result.summary(), "Successfully checked 1");
    }

    #[test]
    fn failure_display_joins_target_and_error() {
        let failure = Failure {
            target: Target::new("http://a.test"),
            error: "connection refused".to_string(),
        };
        assert_eq!(failure.to_string(), "http://a.test connection refused");
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = ProbeOutcome::success("http://b.test".into(), "200 OK");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["target"], "http://b.test");
        assert_eq!(json["status"], "200 OK");
    }
}
