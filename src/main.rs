use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use review_analyzer::config::Config;
use review_analyzer::{preview, report};
use review_analyzer::{ChromeReviewSource, LexiconScorer, ReviewAnalyzer, ReviewSource};

#[derive(Parser)]
#[command(name = "review-analyzer")]
#[command(about = "Scrape a product's reviews and summarize what customers say")]
struct Cli {
    /// Product page URL; prompted for when omitted
    url: Option<String>,

    /// Print the analysis as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Skip the product image preview
    #[arg(long)]
    no_image: bool,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Override REVIEW_MAX_SCROLLS
    #[arg(long)]
    max_scrolls: Option<u32>,
}

fn prompt_for_url() -> Result<String> {
    print!("Enter Amazon Product URL: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("review_analyzer=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if cli.headful {
        config.browser.headless = false;
    }
    if let Some(max_scrolls) = cli.max_scrolls {
        config.browser.max_scrolls = max_scrolls;
    }

    let url = match cli.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };
    anyhow::ensure!(!url.is_empty(), "no product URL given");

    let source = ChromeReviewSource::new(config.browser.clone());
    let page = source
        .fetch(&url)
        .await
        .with_context(|| format!("failed to load {}", url))?;

    if !cli.json {
        print!("{}", report::render_page_header(&page));
    }

    if page.reviews.is_empty() && !cli.json {
        println!("No reviews found.");
        return Ok(());
    }

    let analysis = ReviewAnalyzer::new(LexiconScorer::new())
        .analyze_raw(&page.reviews, &page.title)
        .context("could not analyze scraped reviews")?;

    if cli.json {
        println!("{}", report::render_json(&page, &analysis)?);
        if analysis.stats.is_none() {
            return Ok(());
        }
    } else {
        println!();
        print!("{}", report::render_report(&analysis));
    }

    if !cli.no_image {
        preview::display_image(&page.image, config.image_timeout).await;
    }

    Ok(())
}
