use regex::Regex;
use std::sync::OnceLock;

use super::markup::{MarkupDocument, MarkupElement};
use crate::domain::models::ContentSignals;

/// Tags whose text feeds keyword extraction.
pub const HEADING_TAGS: [&str; 5] = ["h1", "h2", "h3", "strong", "b"];

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[a-zA-Z]{2,}").unwrap())
}

pub struct PageExtractor;

impl PageExtractor {
    pub fn extract_title<D: MarkupDocument>(doc: &D) -> String {
        doc.find_all(&["title"])
            .first()
            .map(|el| el.text_content())
            .unwrap_or_default()
    }

    pub fn has_meta_description<D: MarkupDocument>(doc: &D) -> bool {
        doc.find_all(&["meta"])
            .iter()
            .find(|el| el.attribute("name") == Some("description"))
            .and_then(|el| el.attribute("content"))
            .is_some_and(|content| !content.trim().is_empty())
    }

    /// Returns `(total images, images with a non-empty alt)`.
    pub fn image_alt_counts<D: MarkupDocument>(doc: &D) -> (usize, usize) {
        let images = doc.find_all(&["img"]);
        let with_alt = images
            .iter()
            .filter(|img| img.attribute("alt").is_some_and(|alt| !alt.is_empty()))
            .count();
        (images.len(), with_alt)
    }

    pub fn heading_text<D: MarkupDocument>(doc: &D) -> String {
        doc.find_all(&HEADING_TAGS)
            .iter()
            .map(|el| el.text_content())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Alphabetic runs of two or more letters across all rendered text.
    pub fn word_count<D: MarkupDocument>(doc: &D) -> usize {
        word_regex().find_iter(&doc.visible_text()).count()
    }

    /// Raw `href` values of anchors, trimmed, blank ones dropped.
    pub fn anchor_hrefs<D: MarkupDocument>(doc: &D) -> Vec<String> {
        doc.find_all(&["a"])
            .iter()
            .filter_map(|a| a.attribute("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn content_signals<D: MarkupDocument>(doc: &D) -> ContentSignals {
        let (image_count, images_with_alt) = Self::image_alt_counts(doc);

        ContentSignals {
            title: Self::extract_title(doc),
            has_meta_description: Self::has_meta_description(doc),
            image_count,
            images_with_alt,
            image_alt_ratio: alt_ratio(images_with_alt, image_count),
            heading_text: Self::heading_text(doc),
            word_count: Self::word_count(doc),
            parse_errors: doc.parse_errors(),
        }
    }
}

/// The denominator is floored at one, so zero images yields exactly 1.0.
pub fn alt_ratio(with_alt: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    with_alt as f64 / total as f64
}
