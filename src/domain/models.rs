//! Data carried through one page analysis, from fetch to final record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Fetch ======

/// Raw outcome of the primary page request.
///
/// A non-2xx status is still a `FetchResult`; only network-level failures
/// abort the analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub body: String,
    pub latency_secs: f64,
    pub status_code: u16,
    /// URL after redirects.
    pub final_url: String,
}

// ====== Links ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub url: String,
    pub kind: LinkKind,
}

/// Anchor targets split by registrable domain, in first-seen order.
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

impl LinkSet {
    pub fn push(&mut self, link: ClassifiedLink) {
        match link.kind {
            LinkKind::Internal => self.internal.push(link.url),
            LinkKind::External => self.external.push(link.url),
        }
    }

    /// External links stand in for backlinks; no real backlink data is used.
    pub fn backlinks(&self) -> usize {
        self.external.len()
    }
}

impl FromIterator<ClassifiedLink> for LinkSet {
    fn from_iter<I: IntoIterator<Item = ClassifiedLink>>(iter: I) -> Self {
        let mut set = LinkSet::default();
        for link in iter {
            set.push(link);
        }
        set
    }
}

// ====== Content ======

/// Structural signals pulled from the page markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSignals {
    pub title: String,
    pub has_meta_description: bool,
    pub image_count: usize,
    pub images_with_alt: usize,
    /// `images_with_alt / max(1, image_count)`. A page without images scores 1.0.
    pub image_alt_ratio: f64,
    pub heading_text: String,
    pub word_count: usize,
    /// Recoverable errors reported by the tolerant parser.
    pub parse_errors: usize,
}

impl ContentSignals {
    pub fn missing_alt_tags(&self) -> usize {
        self.image_count.saturating_sub(self.images_with_alt)
    }
}

// ====== Keywords ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Placeholder ranking row. `current_rank` and `change` are synthesized from
/// frequency order alone and carry no search-engine data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub current_rank: i64,
    pub change: i64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    pub detailed: Vec<KeywordEntry>,
    /// Size of the frequency word list the entries were drawn from.
    pub keywords_total: usize,
}

impl Rankings {
    /// Entries whose keyword contains `query`, case-insensitively.
    pub fn filter(&self, query: &str) -> Vec<&KeywordEntry> {
        let query = query.to_lowercase();
        self.detailed
            .iter()
            .filter(|entry| entry.keyword.to_lowercase().contains(&query))
            .collect()
    }
}

// ====== Scores ======

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub missing_meta_descriptions: u32,
    pub slow_loading_pages: u32,
    pub broken_internal_links: usize,
    pub missing_alt_tags: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Heuristic quality score in `[0, 100]`.
    pub seo_score: u32,
    pub organic_traffic: u64,
    /// Number of synthetic ranking entries, not a score.
    pub keyword_rankings: usize,
    pub backlinks: usize,
}

// ====== Result ======

/// Non-fatal conditions met while building a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The markup was malformed; extraction used best-effort recovery.
    ParseDegraded { parse_errors: usize },
}

/// Final record of one page analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub title: String,
    pub kpis: Kpis,
    pub issues: IssueCounts,
    pub rankings: Rankings,
    /// Seconds spent on the primary page request.
    pub latency: f64,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn is_degraded(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::ParseDegraded { .. }))
    }
}
