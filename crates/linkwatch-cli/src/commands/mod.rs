pub mod check;
pub mod probe;

use linkwatch_notify::{Destination, NotificationReport, Notifier, NotifyResult};

/// Prints reports to stdout instead of delivering them (`--dry-run`).
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    async fn notify(
        &self,
        destination: &Destination,
        report: &NotificationReport,
    ) -> NotifyResult<()> {
        println!("--- report for #{} ---", destination.channel);
        print!("{report}");
        Ok(())
    }
}
