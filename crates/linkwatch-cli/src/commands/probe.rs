//! `linkwatch probe`: check URLs given on the command line.
//!
//! Runs the same batch engine as `check` but skips the target list and
//! the webhook. Useful for trying a single URL by hand.

use anyhow::Result;

use linkwatch_core::BatchResult;
use linkwatch_health::BatchCoordinator;

use super::check::probe_options;

pub async fn probe(
    urls: Vec<String>,
    timeout: Option<&str>,
    max_in_flight: Option<usize>,
    format: &str,
) -> Result<()> {
    let options = probe_options(timeout, max_in_flight)?;
    let coordinator = BatchCoordinator::from_options(&options)?;
    let result = coordinator.run(urls).await;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print!("{}", format_text(&result)),
    }

    Ok(())
}

fn format_text(result: &BatchResult) -> String {
    let mut out = String::new();
    for success in &result.succeeded {
        out.push_str(&format!("UP    {success}\n"));
    }
    for failure in &result.failed {
        out.push_str(&format!("DOWN  {failure}\n"));
    }
    if result.skipped > 0 {
        out.push_str(&format!("skipped {} non-URL argument(s)\n", result.skipped));
    }
    out.push_str(&result.summary());
    out.push('\n');
    out
}
