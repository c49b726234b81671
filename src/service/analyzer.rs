//! Single-page analysis pipeline.
//!
//! fetch -> content signals + link classification -> sampled link validation
//! -> keyword summary -> scoring -> [`AnalysisResult`].
//!
//! Only a failed primary fetch (or cancellation) aborts. Malformed markup is
//! reported as a warning, unreachable links as broken-link counts.

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::AnalyzerConfig;
use crate::domain::models::{AnalysisResult, AnalysisWarning, ContentSignals, Kpis, LinkSet};
use crate::error::{AppError, Result};
use crate::extractor::{HtmlDocument, MarkupDocument, PageExtractor};
use crate::service::fetcher::PageFetcher;
use crate::service::http::create_client;
use crate::service::job_tracker::{JobHandle, JobTracker, PROGRESS_DONE};
use crate::service::keywords;
use crate::service::link_classifier::LinkClassifier;
use crate::service::link_validator::{broken_count, HttpLinkProbe, LinkProbe, LinkValidator};
use crate::service::scorer::{self, ScoreInputs};

const PROGRESS_FETCHING: u8 = 10;
const PROGRESS_FETCHED: u8 = 40;
const PROGRESS_LINKS_CHECKED: u8 = 70;

pub struct SeoAnalyzer<P: LinkProbe = HttpLinkProbe> {
    config: AnalyzerConfig,
    fetcher: PageFetcher,
    validator: LinkValidator<P>,
}

impl SeoAnalyzer<HttpLinkProbe> {
    /// Analyzer whose fetch and link checks share one HTTP client.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let client = create_client(&config)?;
        let validator = LinkValidator::new(HttpLinkProbe::new(client.clone()), config.link_check_limit);

        Ok(Self {
            fetcher: PageFetcher::new(client),
            validator,
            config,
        })
    }
}

impl<P: LinkProbe> SeoAnalyzer<P> {
    /// Analyzer with a custom link probe; the page fetch still goes over HTTP.
    pub fn with_probe(config: AnalyzerConfig, probe: P) -> Result<Self> {
        config.validate()?;
        let client = create_client(&config)?;

        Ok(Self {
            fetcher: PageFetcher::new(client),
            validator: LinkValidator::new(probe, config.link_check_limit),
            config,
        })
    }

    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        self.analyze_with_cancel(url, &CancellationToken::new()).await
    }

    /// Run the pipeline, aborting with [`AppError::Cancelled`] as soon as
    /// `cancel` fires. Outstanding link checks are dropped.
    pub async fn analyze_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        self.run(url, cancel, |_| {}).await
    }

    /// Register a new job on `tracker` and run the analysis under it.
    pub async fn analyze_tracked(&self, tracker: &JobTracker, url: &str) -> Result<AnalysisResult> {
        self.analyze_job(tracker.start(), url).await
    }

    /// Run the pipeline as a tracked job: progress is written to the job's
    /// entry, the job's token cancels it, and the entry is cleared afterwards
    /// whatever the outcome.
    pub async fn analyze_job(&self, job: JobHandle, url: &str) -> Result<AnalysisResult> {
        tracing::info!("[JOB] {} analyzing {}", job.id(), url);
        let cancel = job.cancel_token().clone();
        let result = self.run(url, &cancel, |pct| job.set_progress(pct)).await;

        match &result {
            Ok(_) => tracing::info!("[JOB] {} completed", job.id()),
            Err(e) => tracing::warn!("[JOB] {} failed: {}", job.id(), e),
        }
        job.finish();
        result
    }

    async fn run(
        &self,
        url: &str,
        cancel: &CancellationToken,
        on_progress: impl Fn(u8),
    ) -> Result<AnalysisResult> {
        let page_url = parse_input(url)?;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        on_progress(PROGRESS_FETCHING);
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            fetched = self.fetcher.fetch(page_url.as_str()) => fetched?,
        };
        on_progress(PROGRESS_FETCHED);

        // The parsed document is not Send; keep it out of any await.
        let (signals, links) = {
            let document = HtmlDocument::parse(&fetched.body);
            extract(&document, page_url.clone())
        };

        let mut warnings = Vec::new();
        if signals.parse_errors > 0 {
            tracing::warn!(
                "[ANALYZE] {} has malformed markup ({} parse errors), using best-effort extraction",
                page_url,
                signals.parse_errors
            );
            warnings.push(AnalysisWarning::ParseDegraded {
                parse_errors: signals.parse_errors,
            });
        }

        let reachable = self.validator.validate(&links.internal, cancel).await?;
        let broken = broken_count(&reachable);
        on_progress(PROGRESS_LINKS_CHECKED);

        let rankings = keywords::summarize(
            &signals.heading_text,
            self.config.keyword_pool_size,
            self.config.max_ranked_keywords,
        );

        let seo_score = scorer::seo_score(&ScoreInputs {
            has_meta_description: signals.has_meta_description,
            image_alt_ratio: signals.image_alt_ratio,
            broken_internal_links: broken,
            latency_secs: fetched.latency_secs,
        });
        let backlinks = links.backlinks();
        let kpis = Kpis {
            seo_score,
            organic_traffic: scorer::organic_traffic(signals.word_count, backlinks, seo_score),
            keyword_rankings: rankings.detailed.len(),
            backlinks,
        };
        let issues = scorer::issue_counts(
            &signals,
            broken,
            fetched.latency_secs,
            self.config.slow_page_threshold_secs,
        );

        tracing::info!(
            "[ANALYZE] {} score={} internal={} external={} broken={} keywords={}",
            page_url,
            seo_score,
            links.internal.len(),
            links.external.len(),
            broken,
            rankings.keywords_total
        );
        on_progress(PROGRESS_DONE);

        Ok(AnalysisResult {
            url: url.to_string(),
            title: signals.title,
            kpis,
            issues,
            rankings,
            latency: fetched.latency_secs,
            status_code: fetched.status_code,
            warnings,
            analyzed_at: Utc::now(),
        })
    }
}

fn parse_input(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AppError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, other
        ))),
    }
}

/// Content signals and classified links for one parsed page. Links resolve
/// against the requested URL.
pub fn extract<D: MarkupDocument>(document: &D, page_url: Url) -> (ContentSignals, LinkSet) {
    let signals = PageExtractor::content_signals(document);
    let links = LinkClassifier::new(page_url).classify_all(PageExtractor::anchor_hrefs(document));
    (signals, links)
}
