use reqwest::Client;
use std::time::Instant;

use crate::domain::models::FetchResult;
use crate::error::{AppError, Result};

/// Issues the primary page request.
///
/// Any status code is a successful fetch. Only transport failures (DNS,
/// refused connection, timeout, unreadable body) become
/// [`AppError::FetchFailed`]. No retries happen here.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchResult> {
        tracing::debug!("[FETCH] GET {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch_failed(url, describe(&e)))?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch_failed(url, describe(&e)))?;
        let latency_secs = start.elapsed().as_secs_f64();

        tracing::info!(
            "[FETCH] {} -> {} ({} bytes in {:.3}s)",
            url,
            status_code,
            body.len(),
            latency_secs
        );

        Ok(FetchResult {
            body,
            latency_secs,
            status_code,
            final_url,
        })
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
