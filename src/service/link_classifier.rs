//! Internal/external link classification by registrable domain.

use url::{Host, Url};

use crate::domain::models::{ClassifiedLink, LinkKind, LinkSet};

/// Registrable domain of `url`: the public suffix plus one label, so
/// `blog.example.co.uk` and `www.example.co.uk` both give `example.co.uk`.
///
/// Hosts without a registrable part (IP literals, `localhost`) are returned
/// whole. URLs without a host (`mailto:`, `javascript:`) give `None`.
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.');
            if domain.is_empty() {
                return None;
            }
            Some(psl::domain_str(domain).unwrap_or(domain).to_string())
        }
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Classifies hrefs found on one page against that page's site.
pub struct LinkClassifier {
    base: Url,
    site: Option<String>,
}

impl LinkClassifier {
    pub fn new(base: Url) -> Self {
        let site = registrable_domain(&base);
        Self { base, site }
    }

    /// Resolve `href` against the page URL and classify it.
    ///
    /// Anything that cannot be resolved, or whose domain cannot be compared,
    /// is external, which keeps it out of the link-check sample.
    pub fn classify(&self, href: &str) -> ClassifiedLink {
        let Ok(resolved) = self.base.join(href) else {
            return ClassifiedLink {
                url: href.to_string(),
                kind: LinkKind::External,
            };
        };

        let internal = match (&self.site, registrable_domain(&resolved)) {
            (Some(site), Some(domain)) => *site == domain,
            _ => false,
        };

        ClassifiedLink {
            url: resolved.to_string(),
            kind: if internal {
                LinkKind::Internal
            } else {
                LinkKind::External
            },
        }
    }

    pub fn classify_all<I, S>(&self, hrefs: I) -> LinkSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        hrefs
            .into_iter()
            .map(|href| self.classify(href.as_ref()))
            .collect()
    }
}

/// One-shot classification of `href` found on `base`.
pub fn classify(base: &str, href: &str) -> ClassifiedLink {
    match Url::parse(base) {
        Ok(base) => LinkClassifier::new(base).classify(href),
        Err(_) => ClassifiedLink {
            url: href.to_string(),
            kind: LinkKind::External,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomain_and_scheme_do_not_matter() {
        let link = classify("http://www.example.com/", "https://blog.example.com/x");
        assert_eq!(link.kind, LinkKind::Internal);
        assert_eq!(link.url, "https://blog.example.com/x");
    }

    #[test]
    fn relative_hrefs_resolve_against_base() {
        let link = classify("https://example.com/docs/intro", "../about?x=1");
        assert_eq!(link.kind, LinkKind::Internal);
        assert_eq!(link.url, "https://example.com/about?x=1");

        let rooted = classify("https://example.com/docs/intro", "/pricing");
        assert_eq!(rooted.url, "https://example.com/pricing");
    }

    #[test]
    fn other_domains_are_external() {
        let link = classify("https://example.com/", "https://example.org/");
        assert_eq!(link.kind, LinkKind::External);

        let lookalike = classify("https://example.com/", "https://notexample.com/");
        assert_eq!(lookalike.kind, LinkKind::External);
    }

    #[test]
    fn multi_label_public_suffixes_compare_correctly() {
        let same = classify("https://www.shop.co.uk/", "https://img.shop.co.uk/a.png");
        assert_eq!(same.kind, LinkKind::Internal);

        let different = classify("https://www.shop.co.uk/", "https://other.co.uk/");
        assert_eq!(different.kind, LinkKind::External);
    }

    #[test]
    fn hostless_schemes_are_external() {
        let base = "https://example.com/";
        assert_eq!(classify(base, "mailto:hi@example.com").kind, LinkKind::External);
        assert_eq!(classify(base, "javascript:void(0)").kind, LinkKind::External);
    }

    #[test]
    fn unparseable_input_fails_safe_to_external() {
        let bad_base = classify("not a url", "/relative");
        assert_eq!(bad_base.kind, LinkKind::External);
        assert_eq!(bad_base.url, "/relative");

        let bad_href = classify("https://example.com/", "http://exa mple.com:99999/");
        assert_eq!(bad_href.kind, LinkKind::External);
    }

    #[test]
    fn ip_hosts_compare_whole() {
        let same = classify("http://127.0.0.1:8080/", "http://127.0.0.1:9090/x");
        assert_eq!(same.kind, LinkKind::Internal);

        let other = classify("http://127.0.0.1:8080/", "http://10.0.0.1/");
        assert_eq!(other.kind, LinkKind::External);
    }

    #[test]
    fn registrable_domain_strips_subdomains() {
        let url = Url::parse("https://a.b.example.com/path").unwrap();
        assert_eq!(registrable_domain(&url).as_deref(), Some("example.com"));

        let local = Url::parse("http://localhost:3000/").unwrap();
        assert_eq!(registrable_domain(&local).as_deref(), Some("localhost"));
    }

    #[test]
    fn classify_all_splits_in_first_seen_order() {
        let classifier = LinkClassifier::new(Url::parse("https://example.com/").unwrap());
        let set = classifier.classify_all(["/a", "https://other.net/", "/b", "/a"]);

        assert_eq!(
            set.internal,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/a"
            ]
        );
        assert_eq!(set.external, vec!["https://other.net/"]);
    }
}
