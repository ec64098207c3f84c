//! HTTP client wrapper for the job feed.
//!
//! Requests are issued once. Failures are returned to the caller and end up
//! on the query cache entry; nothing in this layer retries.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::USER_AGENT;
use crate::error::{JobBoardError, Result};

/// Create a configured HTTP client.
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a URL and decode its JSON body.
///
/// Non-success statuses become [`JobBoardError::ApiStatus`]; bodies that do
/// not match `T` become [`JobBoardError::Decode`].
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    tracing::debug!(url, "GET");

    let response = client.get(url).send().await.map_err(|e| {
        tracing::warn!(url, error = %e, "Request failed");
        JobBoardError::Network(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = %status, "Job feed returned an error status");
        return Err(JobBoardError::ApiStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response.json::<T>().await.map_err(|source| {
        if source.is_decode() {
            JobBoardError::Decode {
                url: url.to_string(),
                source,
            }
        } else {
            JobBoardError::Network(source)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(5);
        assert!(client.is_ok());
    }
}
