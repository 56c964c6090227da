//! Reachability probe logic.
//!
//! A probe issues one GET against a target and classifies the outcome.
//! Reaching the server is all that counts: a 404 or a 503 is still a
//! [`ProbeOutcome::Success`] carrying the status line.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use linkwatch_core::{ProbeOutcome, Target};

/// Something that can check one target.
///
/// Implementations must be safe to call from many tasks at once and must
/// never fail: every error becomes a [`ProbeOutcome::Failure`].
pub trait Probe: Send + Sync + 'static {
    fn probe(&self, target: Target) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Tunables for a batch of probes.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Per-request timeout. `None` keeps the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
    /// Maximum number of probes in flight at once. `None` is unbounded.
    pub max_in_flight: Option<usize>,
    /// `User-Agent` header sent with every probe.
    pub user_agent: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            max_in_flight: None,
            user_agent: concat!("linkwatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP prober backed by a shared, connection-pooled client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober from options. Fails only if the TLS backend cannot
    /// be initialised. `max_in_flight` is applied by the coordinator, see
    /// [`BatchCoordinator::from_options`](crate::BatchCoordinator::from_options).
    pub fn new(options: &ProbeOptions) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

}

impl Probe for HttpProber {
    async fn probe(&self, target: Target) -> ProbeOutcome {
        match self.client.get(target.as_str()).send().await {
            Ok(resp) => {
                let status = resp.status();
                debug!(%target, %status, "probe answered");
                ProbeOutcome::success(target, status.to_string())
            }
            Err(e) => {
                let error = error_chain(&e);
                debug!(%target, %error, "probe failed");
                ProbeOutcome::failure(target, error)
            }
        }
    }
}

/// Render an error and all of its sources as one line.
///
/// reqwest's top-level message ("error sending request") hides the cause
/// (DNS, refused, TLS) in the source chain.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Parse a timeout such as "750ms", "10s" or "2m". A bare number is
/// seconds. Unknown units and values too large to represent yield `None`.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let value: u64 = digits.parse().ok()?;
    match unit {
        "ms" => Some(Duration::from_millis(value)),
        "" | "s" => Some(Duration::from_secs(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        _ => None,
    }
}
