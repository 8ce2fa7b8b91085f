use headless_chrome::{Browser, LaunchOptions, Tab};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::error::{AnalyzerError, Result};
use crate::review::RawReview;
use crate::summary::FALLBACK_TITLE;

// ============================================================================
// Page Selectors
// ============================================================================

static REVIEW_CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[data-hook='review']").unwrap());
static REVIEW_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[data-hook='review-body']").unwrap());
static STAR_TEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("span.a-icon-alt").unwrap());
static PRODUCT_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("#productTitle").unwrap());
static LANDING_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("#landingImage").unwrap());

const OVERALL_RATING_CSS: &str = "span.a-icon-alt";
const TOTAL_RATINGS_XPATH: &str =
    "//span[contains(text(), 'global ratings') or contains(text(), 'customer reviews')]";

static RATING_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d[\d,.]*)").unwrap());

// ============================================================================
// Data Structures
// ============================================================================

/// A page value, or a description of why it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum ScrapedField {
    Found(String),
    Failed(String),
}

impl ScrapedField {
    /// Failure in the `"Error finding rating: ..."` style.
    pub fn failed(action: &str, field: &str, reason: impl fmt::Display) -> Self {
        ScrapedField::Failed(format!("Error {} {}: {}", action, field, reason))
    }

    /// The usable value; failures never leak out as data.
    pub fn value(&self) -> Option<&str> {
        match self {
            ScrapedField::Found(value) => Some(value),
            ScrapedField::Failed(_) => None,
        }
    }
}

impl fmt::Display for ScrapedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapedField::Found(value) | ScrapedField::Failed(value) => f.write_str(value),
        }
    }
}

/// Everything read from one product listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub url: String,
    /// Product title, or `"Product"` when missing
    pub title: String,
    pub overall_rating: ScrapedField,
    pub total_ratings: ScrapedField,
    pub image: ScrapedField,
    pub reviews: Vec<RawReview>,
}

impl ProductPage {
    /// Numeric count from a `"1,234 global ratings"` label.
    pub fn total_ratings_count(&self) -> Option<u64> {
        parse_rating_count(self.total_ratings.value()?)
    }
}

/// Source of review pages.
#[allow(async_fn_in_trait)]
pub trait ReviewSource {
    async fn fetch(&self, url: &str) -> Result<ProductPage>;
}

// ============================================================================
// HTML Parsing
// ============================================================================

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Review cards with both a body and a star rating, in page order.
pub fn parse_reviews(html: &str) -> Vec<RawReview> {
    let document = Html::parse_document(html);

    document
        .select(&REVIEW_CARD)
        .filter_map(|card| {
            let text = card.select(&REVIEW_BODY).next().map(element_text)?;
            let rating = card.select(&STAR_TEXT).next().map(element_text)?;
            Some(RawReview { text, rating })
        })
        .collect()
}

/// Product title, falling back to `"Product"`.
pub fn parse_title(document: &Html) -> String {
    document
        .select(&PRODUCT_TITLE)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

pub fn parse_image(document: &Html) -> ScrapedField {
    match document.select(&LANDING_IMAGE).next() {
        Some(img) => match img.value().attr("src").filter(|src| !src.is_empty()) {
            Some(src) => ScrapedField::Found(src.to_string()),
            None => ScrapedField::failed("fetching", "image", "#landingImage has no src"),
        },
        None => ScrapedField::failed("fetching", "image", "no element matches #landingImage"),
    }
}

pub fn parse_rating_count(label: &str) -> Option<u64> {
    let digits: String = RATING_COUNT
        .captures(label)?
        .get(1)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

// ============================================================================
// Headless Chrome Source
// ============================================================================

fn browser_error(context: &str, e: impl fmt::Display) -> AnalyzerError {
    AnalyzerError::Browser(format!("{}: {}", context, e))
}

/// Drives a product page in Headless Chrome.
pub struct ChromeReviewSource {
    config: BrowserConfig,
}

impl ChromeReviewSource {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn launch(&self) -> Result<Browser> {
        let user_agent = crate::stealth::random_user_agent();
        debug!(user_agent, "launching browser");

        let args = crate::stealth::chrome_args(user_agent, self.config.headless);
        Browser::new(LaunchOptions {
            // headless mode is selected through --headless=new
            headless: false,
            window_size: Some((1920, 1080)),
            args: args.iter().map(OsStr::new).collect(),
            ..Default::default()
        })
        .map_err(|e| browser_error("failed to launch Chrome", e))
    }

    fn read_overall_rating(&self, tab: &Tab) -> ScrapedField {
        match tab.wait_for_element_with_custom_timeout(OVERALL_RATING_CSS, self.config.element_timeout) {
            Ok(element) => match element.get_inner_text() {
                Ok(text) => ScrapedField::Found(text.trim().to_string()),
                Err(e) => ScrapedField::failed("finding", "rating", e),
            },
            Err(e) => ScrapedField::failed("finding", "rating", e),
        }
    }

    fn read_total_ratings(&self, tab: &Tab) -> ScrapedField {
        match tab.wait_for_xpath_with_custom_timeout(TOTAL_RATINGS_XPATH, self.config.element_timeout) {
            Ok(element) => match element.get_inner_text() {
                Ok(text) => ScrapedField::Found(text.trim().to_string()),
                Err(e) => ScrapedField::failed("finding", "reviews", e),
            },
            Err(e) => ScrapedField::failed("finding", "reviews", e),
        }
    }

    fn page_height(tab: &Tab) -> Result<f64> {
        let height = tab
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| browser_error("failed to read page height", e))?;
        Ok(height.value.and_then(|v| v.as_f64()).unwrap_or(0.0))
    }

    /// Scroll to the bottom until the page stops growing.
    async fn scroll_to_end(&self, tab: &Tab) -> Result<()> {
        let mut last_height = Self::page_height(tab)?;

        for round in 1..=self.config.max_scrolls {
            tab.evaluate("window.scrollTo(0, document.body.scrollHeight);", false)
                .map_err(|e| browser_error("failed to scroll", e))?;
            sleep(self.config.scroll_pause).await;

            let new_height = Self::page_height(tab)?;
            debug!(round, last_height, new_height, "scrolled");
            if new_height == last_height {
                return Ok(());
            }
            last_height = new_height;
        }

        warn!(max_scrolls = self.config.max_scrolls, "page kept growing, stopped scrolling");
        Ok(())
    }
}

impl ReviewSource for ChromeReviewSource {
    async fn fetch(&self, url: &str) -> Result<ProductPage> {
        info!(url, "loading product page");
        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| browser_error("failed to open tab", e))?;

        crate::stealth::install(&tab)?;

        tab.navigate_to(url)
            .map_err(|e| browser_error("failed to navigate", e))?;
        tab.wait_until_navigated()
            .map_err(|e| browser_error("navigation did not finish", e))?;

        let overall_rating = self.read_overall_rating(&tab);
        let total_ratings = self.read_total_ratings(&tab);

        self.scroll_to_end(&tab).await?;

        let html = tab
            .get_content()
            .map_err(|e| browser_error("failed to read page content", e))?;
        debug!(bytes = html.len(), "captured rendered page");

        let (title, image) = {
            let document = Html::parse_document(&html);
            (parse_title(&document), parse_image(&document))
        };
        let reviews = parse_reviews(&html);

        info!(reviews = reviews.len(), title = %title, "product page scraped");
        if let ScrapedField::Failed(reason) = &overall_rating {
            warn!("{}", reason);
        }
        if let ScrapedField::Failed(reason) = &image {
            warn!("{}", reason);
        }

        Ok(ProductPage {
            url: url.to_string(),
            title,
            overall_rating,
            total_ratings,
            image,
            reviews,
        })
    }
}
