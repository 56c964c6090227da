//! Slack incoming-webhook delivery.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use linkwatch_core::RunConfig;

use crate::report::NotificationReport;

/// Result type alias for notification delivery.
pub type NotifyResult<T> = Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Where a report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Webhook URL.
    pub endpoint: String,
    /// Channel name without the leading `#`.
    pub channel: String,
}

impl Destination {
    pub fn new(endpoint: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            channel: channel.into(),
        }
    }
}

impl From<&RunConfig> for Destination {
    fn from(config: &RunConfig) -> Self {
        Self::new(config.webhook_url.clone(), config.channel.clone())
    }
}

/// Delivers a report to a destination.
pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        destination: &Destination,
        report: &NotificationReport,
    ) -> impl Future<Output = NotifyResult<()>> + Send;
}

/// JSON body accepted by Slack incoming webhooks.
#[derive(Debug, Serialize)]
pub struct SlackPayload<'a> {
    pub text: &'a str,
    pub username: &'a str,
    pub channel: String,
    pub icon_emoji: &'a str,
}

/// Name the report is posted under.
pub const USERNAME: &str = "robot";
pub const ICON_EMOJI: &str = ":warning:";

/// Posts reports to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Payload for a report; the channel is always posted as `#<channel>`.
    pub fn payload<'a>(
        &'a self,
        destination: &Destination,
        report: &'a NotificationReport,
    ) -> SlackPayload<'a> {
        SlackPayload {
            text: report.text(),
            username: USERNAME,
            channel: format!("#{}", destination.channel),
            icon_emoji: ICON_EMOJI,
        }
    }
}

impl Notifier for SlackNotifier {
    async fn notify(
        &self,
        destination: &Destination,
        report: &NotificationReport,
    ) -> NotifyResult<()> {
        let payload = self.payload(destination, report);
        let resp = self
            .client
            .post(&destination.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }

        debug!(channel = %payload.channel, failures = report.failures(), "report posted");
        Ok(())
    }
}
