//! Bounded, concurrent reachability checks for a page's internal links.
//!
//! Only the first `limit` internal links are checked. That cap is a resource
//! policy: the sample bounds both the number of requests and how many run at
//! once. All checks are joined before the pipeline moves on, and a cancelled
//! token drops every check still in flight.

use anyhow::Context;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Head,
    Get,
}

/// Issues a single request and reports the final status code.
#[async_trait]
pub trait LinkProbe: Send + Sync {
    async fn probe(&self, method: ProbeMethod, url: &str) -> anyhow::Result<u16>;
}

/// [`LinkProbe`] over a shared reqwest client.
pub struct HttpLinkProbe {
    client: Client,
}

impl HttpLinkProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkProbe for HttpLinkProbe {
    async fn probe(&self, method: ProbeMethod, url: &str) -> anyhow::Result<u16> {
        let request = match method {
            ProbeMethod::Head => self.client.head(url),
            ProbeMethod::Get => self.client.get(url),
        };
        let response = request
            .send()
            .await
            .with_context(|| format!("{:?} {} failed", method, url))?;
        Ok(response.status().as_u16())
    }
}

pub struct LinkValidator<P: LinkProbe> {
    probe: P,
    limit: usize,
}

impl<P: LinkProbe> LinkValidator<P> {
    pub fn new(probe: P, limit: usize) -> Self {
        Self {
            probe,
            limit: limit.max(1),
        }
    }

    /// Check the leading `limit` links concurrently.
    ///
    /// The returned vector is aligned with the sampled links: `true` means
    /// reachable. Its length is `min(limit, links.len())`.
    pub async fn validate(&self, links: &[String], cancel: &CancellationToken) -> Result<Vec<bool>> {
        let sample = &links[..links.len().min(self.limit)];
        if sample.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!(
            "[LINKS] Checking {} of {} internal links",
            sample.len(),
            links.len()
        );

        let checks = stream::iter(sample)
            .map(|link| self.check(link))
            .buffered(self.limit)
            .collect::<Vec<bool>>();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("[LINKS] Cancelled with checks in flight");
                Err(AppError::Cancelled)
            }
            results = checks => {
                let broken = broken_count(&results);
                tracing::info!("[LINKS] {} of {} sampled links broken", broken, results.len());
                Ok(results)
            }
        }
    }

    /// HEAD first; on a transport error or a status of 400 or more, one GET.
    pub async fn check(&self, url: &str) -> bool {
        match self.probe.probe(ProbeMethod::Head, url).await {
            Ok(status) if status < 400 => return true,
            Ok(status) => tracing::debug!("[LINKS] HEAD {} -> {}, retrying with GET", url, status),
            Err(e) => tracing::debug!("[LINKS] HEAD {} failed ({:#}), retrying with GET", url, e),
        }

        match self.probe.probe(ProbeMethod::Get, url).await {
            Ok(status) => {
                tracing::debug!("[LINKS] GET {} -> {}", url, status);
                status < 400
            }
            Err(e) => {
                tracing::debug!("[LINKS] GET {} failed: {:#}", url, e);
                false
            }
        }
    }
}

pub fn broken_count(results: &[bool]) -> usize {
    results.iter().filter(|ok| !**ok).count()
}
