pub mod markup;
pub mod page_extractor;

pub use markup::{HtmlDocument, MarkupDocument, MarkupElement};
pub use page_extractor::PageExtractor;
