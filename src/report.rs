//! Console and JSON rendering of an analysis run.

use serde::Serialize;
use std::fmt::Write;

use crate::analyzer::Analysis;
use crate::crawler::ProductPage;
use crate::stats::ScoredReview;

/// Review text wider than this is cut in the table.
const TABLE_TEXT_WIDTH: usize = 60;

/// Page lines printed as soon as the listing is loaded.
pub fn render_page_header(page: &ProductPage) -> String {
    format!(
        "Product Rating: {}\nTotal Reviews: {}\nProduct Image URL: {}\n",
        page.overall_rating, page.total_ratings, page.image
    )
}

fn clip(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        flat
    } else {
        let kept: String = flat.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One row per review: index, text, rating, polarity.
pub fn render_table(reviews: &[ScoredReview]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<width$}  {:>6}  {:>9}",
        "",
        "Review",
        "Rating",
        "Sentiment",
        width = TABLE_TEXT_WIDTH
    );
    for (i, review) in reviews.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>6.1}  {:>9.6}",
            i,
            clip(&review.text, TABLE_TEXT_WIDTH),
            review.rating,
            review.polarity,
            width = TABLE_TEXT_WIDTH
        );
    }
    out
}

/// Full console report after the analysis.
pub fn render_report(analysis: &Analysis) -> String {
    format!(
        "Sentiment Analysis Score: {}\n\nReviews:\n{}\nReview Summary:\n{}\n",
        analysis.average_polarity,
        render_table(&analysis.reviews),
        analysis.summary
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    page: &'a ProductPage,
    total_ratings_count: Option<u64>,
    analysis: &'a Analysis,
}

pub fn render_json(page: &ProductPage, analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        page,
        total_ratings_count: page.total_ratings_count(),
        analysis,
    })
}
