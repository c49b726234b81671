//! HTML fixtures shared by unit tests, integration tests and benches.

/// Builds a well-formed HTML page piece by piece.
#[derive(Debug, Clone, Default)]
pub struct PageBuilder {
    title: Option<String>,
    meta_description: Option<String>,
    body: Vec<String>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn meta_description(mut self, content: &str) -> Self {
        self.meta_description = Some(content.to_string());
        self
    }

    pub fn heading(mut self, level: u8, text: &str) -> Self {
        self.body.push(format!("<h{level}>{text}</h{level}>"));
        self
    }

    pub fn strong(mut self, text: &str) -> Self {
        self.body.push(format!("<p><strong>{text}</strong></p>"));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push(format!("<p>{text}</p>"));
        self
    }

    /// `None` omits the alt attribute entirely.
    pub fn image(mut self, alt: Option<&str>) -> Self {
        let idx = self.body.len();
        match alt {
            Some(alt) => self
                .body
                .push(format!(r#"<img src="/img/{idx}.png" alt="{alt}">"#)),
            None => self.body.push(format!(r#"<img src="/img/{idx}.png">"#)),
        }
        self
    }

    pub fn images(mut self, with_alt: usize, without_alt: usize) -> Self {
        for _ in 0..with_alt {
            self = self.image(Some("described"));
        }
        for _ in 0..without_alt {
            self = self.image(None);
        }
        self
    }

    pub fn link(mut self, href: &str) -> Self {
        self.body.push(format!(r#"<a href="{href}">link</a>"#));
        self
    }

    pub fn build(&self) -> String {
        let mut head = String::new();
        if let Some(title) = &self.title {
            head.push_str(&format!("<title>{title}</title>"));
        }
        if let Some(content) = &self.meta_description {
            head.push_str(&format!(r#"<meta name="description" content="{content}">"#));
        }
        format!(
            "<!DOCTYPE html><html><head>{}</head><body>{}</body></html>",
            head,
            self.body.join("")
        )
    }
}

/// A content-heavy page used by benches.
pub fn sample_article(paragraphs: usize) -> String {
    let mut builder = PageBuilder::new()
        .title("Rust async runtimes compared")
        .meta_description("A practical comparison of async runtimes")
        .heading(1, "Async runtimes in practice");
    for i in 0..paragraphs {
        builder = builder
            .heading(2, &format!("Section {i} scheduling and executors"))
            .paragraph("Executors poll futures until they complete, waking tasks on readiness events.")
            .strong("cooperative scheduling matters")
            .image(if i % 2 == 0 { Some("diagram") } else { None })
            .link(&format!("/section/{i}"))
            .link("https://docs.rs/tokio");
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_emits_head_and_body_parts() {
        let html = PageBuilder::new()
            .title("T")
            .meta_description("D")
            .heading(2, "Sub")
            .image(None)
            .link("/x")
            .build();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains(r#"<meta name="description" content="D">"#));
        assert!(html.contains("<h2>Sub</h2>"));
        assert!(html.contains(r#"<a href="/x">link</a>"#));
    }
}
