//! rankpro: single-page SEO analysis from the command line.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rankpro::{
    config::AnalyzerConfig,
    lifecycle,
    report,
    service::{JobTracker, SeoAnalyzer},
};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Full analysis record
    Json,
    /// KPIs and issue counts as `metric,value` rows
    Csv,
    /// KPIs flattened with issues and rankings
    Export,
}

#[derive(Parser)]
#[command(name = "rankpro")]
#[command(about = "Analyze a web page and report heuristic SEO scores")]
#[command(version)]
struct Cli {
    /// Page to analyze (absolute http or https URL)
    url: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print only ranking entries whose keyword contains this text
    #[arg(short, long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    lifecycle::init_logging();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = SeoAnalyzer::new(config).context("building analyzer")?;

    let tracker = JobTracker::new();
    let job = tracker.start();
    let watcher = lifecycle::cancel_on_ctrl_c(job.cancel_token().clone());

    let outcome = analyzer.analyze_job(job, &cli.url).await;
    watcher.abort();
    let result = outcome.with_context(|| format!("analysis of {} failed", cli.url))?;

    if let Some(query) = &cli.query {
        let matches = result.rankings.filter(query);
        println!(
            "{}",
            serde_json::to_string_pretty(&matches).context("serializing rankings")?
        );
        return Ok(());
    }

    let output = match cli.format {
        Format::Json => report::to_json(&result)?,
        Format::Csv => report::to_csv(&result),
        Format::Export => report::to_export_json(&result)?,
    };
    println!("{}", output);
    Ok(())
}
