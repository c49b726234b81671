//! Heuristic SEO score, traffic estimate and issue counts.

use crate::domain::models::{ContentSignals, IssueCounts};

const MAX_SCORE: i64 = 100;
const MISSING_META_PENALTY: i64 = 25;
const ALT_RATIO_TARGET: f64 = 0.7;
const ALT_PENALTY_SCALE: f64 = 40.0;
const BROKEN_LINK_PENALTY: i64 = 3;
const BROKEN_LINK_PENALTY_CAP: i64 = 30;
const LATENCY_BUDGET_SECS: f64 = 0.8;
const LATENCY_PENALTY_SCALE: f64 = 40.0;
const LATENCY_PENALTY_CAP: i64 = 30;

/// Absorbs binary rounding so that e.g. `(0.7 - 0.5) * 40` floors to 8, not 7.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Signals the SEO score is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub has_meta_description: bool,
    pub image_alt_ratio: f64,
    pub broken_internal_links: usize,
    pub latency_secs: f64,
}

fn floor_penalty(value: f64) -> i64 {
    (value + FLOOR_TOLERANCE).floor() as i64
}

/// Start at 100 and subtract:
/// - 25 without a meta description
/// - `floor((0.7 - ratio) * 40)` when the alt ratio is below 0.7
/// - `min(30, 3 * broken)`
/// - `min(30, floor((latency - 0.8) * 40))` when latency exceeds 0.8s
///
/// The result is clamped to `[0, 100]`.
pub fn seo_score(inputs: &ScoreInputs) -> u32 {
    let mut score = MAX_SCORE;

    if !inputs.has_meta_description {
        score -= MISSING_META_PENALTY;
    }

    if inputs.image_alt_ratio < ALT_RATIO_TARGET {
        score -= floor_penalty((ALT_RATIO_TARGET - inputs.image_alt_ratio) * ALT_PENALTY_SCALE);
    }

    let broken = inputs.broken_internal_links.min(BROKEN_LINK_PENALTY_CAP as usize) as i64;
    score -= (broken * BROKEN_LINK_PENALTY).min(BROKEN_LINK_PENALTY_CAP);

    if inputs.latency_secs > LATENCY_BUDGET_SECS {
        let penalty =
            floor_penalty((inputs.latency_secs - LATENCY_BUDGET_SECS) * LATENCY_PENALTY_SCALE);
        score -= penalty.min(LATENCY_PENALTY_CAP);
    }

    score.clamp(0, MAX_SCORE) as u32
}

/// `floor((words / 200 + backlinks / 10 + score / 5) * 1.7)`.
///
/// Each term is floored before the sum is scaled. The scaling is done in
/// integers (`* 17 / 10`) so the floor is exact.
pub fn organic_traffic(word_count: usize, backlinks: usize, seo_score: u32) -> u64 {
    let base = (word_count / 200) as u64 + (backlinks / 10) as u64 + (seo_score / 5) as u64;
    base * 17 / 10
}

pub fn issue_counts(
    signals: &ContentSignals,
    broken_internal_links: usize,
    latency_secs: f64,
    slow_page_threshold_secs: f64,
) -> IssueCounts {
    IssueCounts {
        missing_meta_descriptions: u32::from(!signals.has_meta_description),
        slow_loading_pages: u32::from(latency_secs > slow_page_threshold_secs),
        broken_internal_links,
        missing_alt_tags: signals.missing_alt_tags(),
    }
}
