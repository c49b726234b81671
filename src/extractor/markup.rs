//! Tolerant markup access.
//!
//! Extraction code only talks to [`MarkupDocument`] and [`MarkupElement`], so it
//! never depends on a concrete DOM type. [`HtmlDocument`] is the scraper-backed
//! implementation: html5ever recovers from any input, and the errors it recovered
//! from are kept so callers can report a degraded parse.

use scraper::{ElementRef, Html, Node, Selector};

/// Tags whose text is not page content. `noscript` fallback text counts.
const HIDDEN_TEXT_TAGS: [&str; 3] = ["script", "style", "template"];

pub trait MarkupElement {
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text of the element and its descendants. Each text node is trimmed and
    /// non-empty pieces are joined by a single space.
    fn text_content(&self) -> String;
}

pub trait MarkupDocument {
    type Element<'a>: MarkupElement
    where
        Self: 'a;

    /// Every element whose tag is in `tags`, in document order.
    fn find_all<'a>(&'a self, tags: &[&str]) -> Vec<Self::Element<'a>>;

    /// All rendered text of the document, pieces joined by a single space.
    fn visible_text(&self) -> String;

    /// Number of recoverable markup errors met while parsing. A missing
    /// doctype is not one of them.
    fn parse_errors(&self) -> usize;
}

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }
}

impl MarkupElement for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        join_pieces(self.text())
    }
}

impl MarkupDocument for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn find_all<'a>(&'a self, tags: &[&str]) -> Vec<ElementRef<'a>> {
        if tags.is_empty() {
            return Vec::new();
        }
        match Selector::parse(&tags.join(", ")) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                tracing::debug!("[MARKUP] Unusable tag list {:?}: {:?}", tags, e);
                Vec::new()
            }
        }
    }

    fn visible_text(&self) -> String {
        let pieces = self.html.tree.root().descendants().filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                Node::Element(el) => HIDDEN_TEXT_TAGS.contains(&el.name()),
                _ => false,
            });
            if hidden {
                None
            } else {
                Some(&**text)
            }
        });
        join_pieces(pieces)
    }

    fn parse_errors(&self) -> usize {
        // Without a doctype html5ever reports exactly one error for the first
        // token and switches to quirks mode.
        let has_doctype = self
            .html
            .tree
            .root()
            .children()
            .any(|node| node.value().is_doctype());
        if has_doctype {
            self.html.errors.len()
        } else {
            self.html.errors.len().saturating_sub(1)
        }
    }
}

fn join_pieces<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_all_returns_document_order_across_tags() {
        let doc = HtmlDocument::parse(
            "<body><h2>second level</h2><b>bold</b><h1>top</h1><p>skip</p></body>",
        );
        let texts: Vec<String> = doc
            .find_all(&["h1", "h2", "b"])
            .iter()
            .map(|el| el.text_content())
            .collect();
        assert_eq!(texts, vec!["second level", "bold", "top"]);
    }

    #[test]
    fn text_content_joins_nested_pieces_with_single_spaces() {
        let doc = HtmlDocument::parse("<h1>  Hello <em>big</em>\n world  </h1>");
        let h1 = &doc.find_all(&["h1"])[0];
        assert_eq!(h1.text_content(), "Hello big world");
    }

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let doc = HtmlDocument::parse(
            "<html><head><title>Title</title><style>body { color: red }</style></head>\
             <body><p>Shown text</p><script>var hidden = 1;</script></body></html>",
        );
        assert_eq!(doc.visible_text(), "Title Shown text");
    }

    #[test]
    fn attribute_lookup_on_elements() {
        let doc = HtmlDocument::parse(r#"<img src="/a.png" alt="A cat">"#);
        let img = &doc.find_all(&["img"])[0];
        assert_eq!(img.attribute("alt"), Some("A cat"));
        assert_eq!(img.attribute("title"), None);
    }

    #[test]
    fn malformed_markup_is_recovered_and_counted() {
        let doc = HtmlDocument::parse("<div><p>unclosed <b>bold</div></span><h1>after");
        assert!(doc.parse_errors() > 0);
        assert_eq!(doc.find_all(&["h1"]).len(), 1);
    }

    #[test]
    fn missing_doctype_alone_is_not_an_error() {
        let bare = HtmlDocument::parse(
            "<html><head><title>ok</title></head><body><p>fine</p></body></html>",
        );
        assert_eq!(bare.parse_errors(), 0);

        let declared = HtmlDocument::parse(
            "<!DOCTYPE html><html><head><title>ok</title></head><body><p>fine</p></body></html>",
        );
        assert_eq!(declared.parse_errors(), 0);

        let broken = HtmlDocument::parse("<html><body><p>x</p></table></body></html>");
        assert!(broken.parse_errors() > 0);
    }

    #[test]
    fn noscript_fallback_text_is_visible() {
        let doc = HtmlDocument::parse(
            "<!DOCTYPE html><html><body><p>Main</p><noscript>Enable scripts</noscript></body></html>",
        );
        assert!(doc.visible_text().contains("Enable scripts"));
        assert!(doc.visible_text().starts_with("Main"));
    }

    #[test]
    fn empty_tag_list_finds_nothing() {
        let doc = HtmlDocument::parse("<p>text</p>");
        assert!(doc.find_all(&[]).is_empty());
    }
}
