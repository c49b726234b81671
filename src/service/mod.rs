pub mod analyzer;
pub mod fetcher;
pub mod http;
pub mod job_tracker;
pub mod keywords;
pub mod link_classifier;
pub mod link_validator;
pub mod scorer;

pub use analyzer::SeoAnalyzer;
pub use fetcher::PageFetcher;
pub use job_tracker::{JobHandle, JobTracker};
pub use link_classifier::LinkClassifier;
pub use link_validator::{HttpLinkProbe, LinkProbe, LinkValidator, ProbeMethod};
