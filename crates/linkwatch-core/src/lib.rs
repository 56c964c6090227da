//! Shared types and run inputs for linkwatch.
//!
//! Holds the data model passed between the prober, the batch coordinator,
//! and the notifier, plus the two inputs every run starts from: the
//! resolved [`RunConfig`] and the list of candidate rows fetched by
//! [`source::fetch_rows`].

pub mod config;
pub mod source;
pub mod types;

pub use config::{ConfigError, ConfigInput, EnvSource, ProcessEnv, RunConfig};
pub use source::{SourceError, SourceRow};
pub use types::*;
