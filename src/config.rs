//! Analyzer configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_USER_AGENT: &str = "RankProBot/1.0 (+https://example.com/bot)";

/// Tunables for a single-page analysis.
///
/// Every field has a default, so a JSON file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Identifying `User-Agent` sent with every request.
    pub user_agent: String,
    /// Timeout applied to each network operation (page GET, link HEAD, link GET).
    pub request_timeout_secs: u64,
    pub max_redirects: usize,
    /// Number of internal links sampled for reachability checks. This is also
    /// the upper bound on concurrent checks.
    pub link_check_limit: usize,
    /// Most-frequent words kept from heading text.
    pub keyword_pool_size: usize,
    /// Synthetic ranking entries emitted from the keyword pool.
    pub max_ranked_keywords: usize,
    /// Latency above which the page counts as slow-loading.
    pub slow_page_threshold_secs: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 15,
            max_redirects: 10,
            link_check_limit: 30,
            keyword_pool_size: 100,
            max_ranked_keywords: 50,
            slow_page_threshold_secs: 2.0,
        }
    }
}

impl AnalyzerConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(AppError::config("user_agent must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::config("request_timeout_secs must be positive"));
        }
        if self.link_check_limit == 0 {
            return Err(AppError::config("link_check_limit must be positive"));
        }
        if self.max_ranked_keywords > self.keyword_pool_size {
            return Err(AppError::config(format!(
                "max_ranked_keywords ({}) exceeds keyword_pool_size ({})",
                self.max_ranked_keywords, self.keyword_pool_size
            )));
        }
        if !self.slow_page_threshold_secs.is_finite() || self.slow_page_threshold_secs < 0.0 {
            return Err(AppError::config(
                "slow_page_threshold_secs must be a non-negative number",
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
