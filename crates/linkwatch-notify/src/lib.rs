//! Turns a batch result into an operator alert.
//!
//! [`build_report`] decides whether an alert is warranted and formats it.
//! [`trigger`] hands the report to a [`Notifier`] and absorbs delivery
//! errors: a failed webhook call is logged, never escalated.

pub mod report;
pub mod slack;
pub mod trigger;

pub use report::{NotificationReport, REPORT_HEADER, build_report};
pub use slack::{Destination, Notifier, NotifyError, NotifyResult, SlackNotifier, SlackPayload};
pub use trigger::{Delivery, trigger};
