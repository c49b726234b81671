//! Serialized forms of an [`AnalysisResult`].

use anyhow::Context;
use serde_json::{json, Value};
use std::fmt::Write;

use crate::domain::models::AnalysisResult;
use crate::error::Result;

/// The whole record as pretty-printed JSON.
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result).context("serializing analysis result")?)
}

/// KPI fields at the top level, followed by `issues` and `rankings`.
pub fn to_export_json(result: &AnalysisResult) -> Result<String> {
    let mut export = serde_json::to_value(result.kpis).context("serializing kpis")?;
    if let Value::Object(fields) = &mut export {
        fields.insert("issues".into(), json!(result.issues));
        fields.insert("rankings".into(), json!(result.rankings));
    }
    Ok(serde_json::to_string_pretty(&export).context("serializing export")?)
}

/// `metric,value` rows: the four KPIs, then the four issue counts.
pub fn to_csv(result: &AnalysisResult) -> String {
    let kpis = &result.kpis;
    let issues = &result.issues;
    let rows: [(&str, String); 8] = [
        ("seo_score", kpis.seo_score.to_string()),
        ("organic_traffic", kpis.organic_traffic.to_string()),
        ("keyword_rankings", kpis.keyword_rankings.to_string()),
        ("backlinks", kpis.backlinks.to_string()),
        ("missing_meta_descriptions", issues.missing_meta_descriptions.to_string()),
        ("slow_loading_pages", issues.slow_loading_pages.to_string()),
        ("broken_internal_links", issues.broken_internal_links.to_string()),
        ("missing_alt_tags", issues.missing_alt_tags.to_string()),
    ];

    let mut out = String::from("metric,value\n");
    for (metric, value) in rows {
        // writing into a String cannot fail
        let _ = writeln!(out, "{},{}", metric, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{IssueCounts, KeywordEntry, Kpis, Rankings, Trend};
    use chrono::Utc;

    fn result() -> AnalysisResult {
        AnalysisResult {
            url: "https://example.com/".into(),
            title: "Example".into(),
            kpis: Kpis {
                seo_score: 78,
                organic_traffic: 28,
                keyword_rankings: 1,
                backlinks: 19,
            },
            issues: IssueCounts {
                missing_meta_descriptions: 0,
                slow_loading_pages: 0,
                broken_internal_links: 2,
                missing_alt_tags: 5,
            },
            rankings: Rankings {
                detailed: vec![KeywordEntry {
                    keyword: "rust".into(),
                    current_rank: 99,
                    change: -1,
                    trend: Trend::Up,
                }],
                keywords_total: 1,
            },
            latency: 1.0,
            status_code: 200,
            warnings: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn csv_lists_kpis_then_issues() {
        let csv = to_csv(&result());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert_eq!(lines[1], "seo_score,78");
        assert_eq!(lines[4], "backlinks,19");
        assert_eq!(lines[7], "broken_internal_links,2");
        assert_eq!(lines[8], "missing_alt_tags,5");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn export_flattens_kpis() {
        let export: Value = serde_json::from_str(&to_export_json(&result()).unwrap()).unwrap();
        assert_eq!(export["seo_score"], 78);
        assert_eq!(export["backlinks"], 19);
        assert_eq!(export["issues"]["missing_alt_tags"], 5);
        assert_eq!(export["rankings"]["detailed"][0]["trend"], "up");
        assert!(export.get("url").is_none());
    }

    #[test]
    fn full_json_round_trips() {
        let original = result();
        let parsed: AnalysisResult = serde_json::from_str(&to_json(&original).unwrap()).unwrap();
        assert_eq!(parsed, original);
        assert!(!to_json(&original).unwrap().contains("warnings"));
    }
}
