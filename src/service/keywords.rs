//! Keyword frequency and synthetic rankings.
//!
//! The rankings produced here are placeholders: rank, change and trend are a
//! pure function of a word's position in frequency order. No search-engine data
//! is involved, and the output is fully deterministic for a given input.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::models::{KeywordEntry, Rankings, Trend};

fn keyword_regex() -> &'static Regex {
    static KEYWORD: OnceLock<Regex> = OnceLock::new();
    KEYWORD.get_or_init(|| Regex::new(r"[a-z]{4,}").unwrap())
}

/// Lowercase alphabetic tokens of four or more letters, most frequent first.
///
/// Equal counts keep first-occurrence order. At most `limit` words.
pub fn frequent_words(text: &str, limit: usize) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in keyword_regex().find_iter(&lowered).map(|m| m.as_str()) {
        match position.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                position.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Placeholder ranking rows for the leading `max_entries` words.
///
/// For 1-based position `i`: rank `100 - i`, change `(i mod 5) - 2`, trend
/// down when `i` is a multiple of 3, up otherwise.
pub fn synthetic_rankings(words: &[String], max_entries: usize) -> Vec<KeywordEntry> {
    words
        .iter()
        .take(max_entries)
        .enumerate()
        .map(|(idx, word)| {
            let i = idx as i64 + 1;
            KeywordEntry {
                keyword: word.clone(),
                current_rank: 100 - i,
                change: (i % 5) - 2,
                trend: if i % 3 == 0 { Trend::Down } else { Trend::Up },
            }
        })
        .collect()
}

/// Frequency list plus rankings for one page's heading text.
pub fn summarize(heading_text: &str, pool_size: usize, max_entries: usize) -> Rankings {
    let words = frequent_words(heading_text, pool_size);
    Rankings {
        detailed: synthetic_rankings(&words, max_entries),
        keywords_total: words.len(),
    }
}
