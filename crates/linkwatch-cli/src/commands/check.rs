//! `linkwatch check`: one full health-check run.
//!
//! Resolves the run configuration, loads the target list, probes every
//! target, alerts on failures, and prints the success count. Configuration
//! and list-loading errors abort the run before any probe is sent; probe
//! and delivery errors never do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use linkwatch_core::{BatchResult, ConfigInput, EnvSource, ProcessEnv, RunConfig, source};
use linkwatch_health::{BatchCoordinator, ProbeOptions, parse_duration};
use linkwatch_notify::{Delivery, Destination, Notifier, SlackNotifier, trigger};

use super::StdoutNotifier;

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Input payload (.json or .toml) with CSV_URL, WEBHOOK_URL and CHANNEL keys
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Location of the semicolon-delimited target list (overrides CSV_URL)
    #[arg(long)]
    pub csv_url: Option<String>,
    /// Slack incoming-webhook URL (overrides WEBHOOK_URL)
    #[arg(long)]
    pub webhook_url: Option<String>,
    /// Channel to post the report to, without '#' (overrides CHANNEL)
    #[arg(long)]
    pub channel: Option<String>,
    /// Per-probe timeout, e.g. 500ms, 10s, 1m. Default: no timeout
    #[arg(long)]
    pub timeout: Option<String>,
    /// Maximum probes in flight. Default: unbounded
    #[arg(long)]
    pub max_in_flight: Option<usize>,
    /// Print the failure report instead of posting it. WEBHOOK_URL must
    /// still be resolvable: every setting is checked before the run starts
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckArgs {
    /// Payload file overlaid with command-line values.
    fn config_input(&self) -> Result<ConfigInput> {
        let file_input = match &self.input {
            Some(path) => ConfigInput::from_file(path)?,
            None => ConfigInput::default(),
        };
        Ok(file_input.merge(ConfigInput {
            csv_url: self.csv_url.clone(),
            webhook_url: self.webhook_url.clone(),
            channel: self.channel.clone(),
        }))
    }
}

/// Build probe options from the timeout and concurrency flags.
pub fn probe_options(timeout: Option<&str>, max_in_flight: Option<usize>) -> Result<ProbeOptions> {
    let timeout = match timeout {
        Some(raw) => Some(
            parse_duration(raw)
                .with_context(|| format!("invalid timeout '{raw}' (expected e.g. 500ms, 10s, 2m)"))?,
        ),
        None => None,
    };
    Ok(ProbeOptions {
        timeout,
        max_in_flight,
        ..Default::default()
    })
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub result: BatchResult,
    pub delivery: Delivery,
}

/// Run the `linkwatch check` command. A failed delivery has already been
/// logged by [`trigger`] and does not change the exit status.
pub async fn check(args: CheckArgs) -> Result<()> {
    let outcome = resolve_and_run(&args, &ProcessEnv).await?;
    println!("{}", outcome.result.summary());
    Ok(())
}

/// Resolve configuration against `env`, then run the batch.
async fn resolve_and_run(args: &CheckArgs, env: &impl EnvSource) -> Result<RunOutcome> {
    let input = args.config_input()?;
    let config = RunConfig::resolve(&input, env).context("resolving run configuration")?;
    let options = probe_options(args.timeout.as_deref(), args.max_in_flight)?;

    if args.dry_run {
        run(&config, &options, &StdoutNotifier).await
    } else {
        let notifier = SlackNotifier::new(reqwest::Client::new());
        run(&config, &options, &notifier).await
    }
}

/// One run against already-resolved configuration.
pub async fn run<N: Notifier>(
    config: &RunConfig,
    options: &ProbeOptions,
    notifier: &N,
) -> Result<RunOutcome> {
    let coordinator = BatchCoordinator::from_options(options).context("building HTTP client")?;

    let list_client = reqwest::Client::new();
    let rows = source::fetch_rows(&list_client, &config.csv_url)
        .await
        .context("loading target list")?;

    let result = coordinator.run(rows).await;

    for failure in &result.failed {
        warn!(url = %failure.target, error = %failure.error, "target unreachable");
    }

    let delivery = trigger(&result, &Destination::from(config), notifier).await;
    info!(
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        ?delivery,
        "run complete"
    );

    Ok(RunOutcome { result, delivery })
}
