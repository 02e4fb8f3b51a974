pub mod basescan;
pub mod coingecko;

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{api} reported an error: {message}")]
    Upstream { api: &'static str, message: String },
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Build the shared HTTP client. One client is reused for every request so
/// connections are pooled.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("burnwatch/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// GET `url` with `query` and decode the JSON body.
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
    what: &'static str,
) -> Result<T, SourceError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;

    tracing::trace!(url, bytes = body.len(), "Fetched {}", what);

    serde_json::from_slice(&body).map_err(|source| SourceError::Decode { what, source })
}
