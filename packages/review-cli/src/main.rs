mod config;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use play_client::PlayClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_ingest::{
    AppleFeedConfig, AppleFetcher, BankIngestor, CampaignAggregator, CommandAnalyzer,
    CsvDatasetStore, DatasetLocation, HttpPageSource, PageSource, PlayFetcher,
    RateLimitedPageSource, ReviewAnalyzer,
};

use crate::config::AppConfig;

/// Interactive bank app review harvester.
///
/// Prompts for one bank after another, saves each bank's reviews, then
/// combines them, runs the configured analyzer, and optionally opens the
/// dashboard.
#[derive(Parser)]
#[command(name = "reviews", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,review_ingest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        output_dir = %config.output_dir.display(),
        play_reviews_url = %config.play_reviews_url,
        apple_page_size = config.apple_page_size,
        "Loaded configuration"
    );
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    print_banner(&term)?;

    let aggregator = build_aggregator(&config)?;

    let mut banks = Vec::new();
    loop {
        let request = prompts::prompt_bank(&theme)?;
        let ingested = aggregator
            .ingestor()
            .ingest(&request)
            .await
            .with_context(|| format!("Failed to ingest {}", request.bank_name))?;

        println!(
            "{} {} {}",
            "✓".bright_green(),
            ingested.summary(),
            format!("→ {}", ingested.location).as_str().dimmed()
        );
        banks.push(ingested.dataset);

        if !prompts::confirm(&theme, "Add another bank?", false)? {
            break;
        }
    }

    let (campaign, combined) = aggregator
        .combine(banks)
        .await
        .context("Failed to save combined dataset")?;
    println!();
    println!(
        "{} {} reviews from {} banks → {}",
        "📦".bright_cyan(),
        campaign.len(),
        campaign.banks.len(),
        combined
    );

    let Some(analyzer) = config
        .analyzer_cmd
        .as_deref()
        .and_then(CommandAnalyzer::from_command_line)
    else {
        println!(
            "{}",
            "REVIEWS_ANALYZER_CMD is not set, skipping analysis.".yellow()
        );
        return Ok(());
    };

    let analyzed = analyzer
        .analyze(&combined)
        .await
        .context("Analysis failed")?;
    println!("{} Analysis saved to {}", "🧠".bright_cyan(), analyzed);

    if let Some(dashboard) = config.dashboard_cmd.as_deref() {
        if prompts::confirm(&theme, "Launch the dashboard?", true)? {
            launch_dashboard(dashboard, &analyzed).await?;
        }
    }

    println!("{}", "👋 Done!".bright_blue());
    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║      Bank App Review Harvester         ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}

fn build_aggregator(
    config: &AppConfig,
) -> Result<CampaignAggregator<Box<dyn PageSource>, PlayClient, CsvDatasetStore>> {
    let http = HttpPageSource::with_timeout(config.http_timeout)
        .context("Failed to build HTTP client")?;
    let pages: Box<dyn PageSource> = match config.apple_requests_per_second {
        Some(rps) => Box::new(RateLimitedPageSource::new(http, rps)),
        None => Box::new(http),
    };

    let feed = AppleFeedConfig::new().with_page_size(config.apple_page_size);
    let play = PlayClient::with_timeout(&config.play_reviews_url, config.http_timeout)
        .context("Failed to build Play review client")?;

    Ok(CampaignAggregator::new(BankIngestor::new(
        AppleFetcher::with_config(pages, feed),
        PlayFetcher::new(play),
        CsvDatasetStore::new(&config.output_dir),
    )))
}

async fn launch_dashboard(command_line: &str, analyzed: &DatasetLocation) -> Result<()> {
    let mut parts = command_line.split_whitespace();
    let Some(program) = parts.next() else {
        return Ok(());
    };

    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(analyzed.as_str())
        .status()
        .await
        .with_context(|| format!("Failed to launch dashboard `{}`", program))?;

    if !status.success() {
        anyhow::bail!("Dashboard exited with {}", status);
    }
    Ok(())
}
