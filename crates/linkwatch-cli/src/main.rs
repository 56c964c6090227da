use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "linkwatch",
    about = "Batch URL health checks with Slack alerts",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every URL in the target list and alert on failures.
    ///
    /// Settings are taken from flags, then the --input payload, then the
    /// CSV_URL, WEBHOOK_URL and CHANNEL environment variables. A setting
    /// missing from all three aborts the run before anything is probed.
    Check(commands::check::CheckArgs),
    /// Probe URLs given on the command line. Sends no alerts.
    Probe {
        /// URLs to check
        #[arg(required = true)]
        urls: Vec<String>,
        /// Per-probe timeout, e.g. 500ms, 10s, 1m
        #[arg(long)]
        timeout: Option<String>,
        /// Maximum probes in flight
        #[arg(long)]
        max_in_flight: Option<usize>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,linkwatch=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Check(args) => commands::check::check(args).await,
        Commands::Probe {
            urls,
            timeout,
            max_in_flight,
            format,
        } => commands::probe::probe(urls, timeout.as_deref(), max_in_flight, &format).await,
    }
}
