//! Target list acquisition.
//!
//! The list is a semicolon-delimited text file served over HTTP. Only the
//! first field of each record matters: it is the candidate URL. Header rows
//! and other junk are passed through untouched; the batch coordinator
//! decides what to skip.

use thiserror::Error;
use tracing::{debug, info};

/// First field of one record in the source list.
pub type SourceRow = String;

/// Field delimiter used by target lists.
pub const DELIMITER: u8 = b';';

/// Result type alias for source list operations.
pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch target list from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("target list request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed target list: {0}")]
    Parse(#[from] csv::Error),
}

/// Download the list at `url` and return the first field of every record.
pub async fn fetch_rows(client: &reqwest::Client, url: &str) -> SourceResult<Vec<SourceRow>> {
    let fetch_err = |source| SourceError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(fetch_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().await.map_err(fetch_err)?;
    let rows = parse_rows(body.as_bytes())?;
    info!(%url, rows = rows.len(), "target list loaded");
    Ok(rows)
}

/// Parse semicolon-delimited records. Records may have differing field
/// counts; records with no fields are dropped.
pub fn parse_rows(data: &[u8]) -> SourceResult<Vec<SourceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            rows.push(first.to_string());
        }
    }

    debug!(rows = rows.len(), "parsed target list");
    Ok(rows)
}
