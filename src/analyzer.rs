//! Review analysis pipeline: score, aggregate, theme, summarize.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::review::{self, RawReview, Review};
use crate::sentiment::PolarityScorer;
use crate::stats::{average_polarity, ReviewStats, ScoredReview};
use crate::summary::{self, SummaryInput, NEUTRAL_EXCERPT_CHARS, NO_REVIEWS_SUMMARY};
use crate::themes::{extract_themes, ThemeCatalog, ThemeMap, CATALOG};

/// Result of analyzing one product's reviews.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub title: String,
    /// `None` when there were no reviews
    pub stats: Option<ReviewStats>,
    pub average_polarity: f64,
    pub reviews: Vec<ScoredReview>,
    pub positive_themes: ThemeMap,
    pub negative_themes: ThemeMap,
    pub neutral_excerpt: Option<String>,
    pub summary: String,
}

pub struct ReviewAnalyzer<S> {
    scorer: S,
    catalog: ThemeCatalog,
}

impl<S: PolarityScorer> ReviewAnalyzer<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            catalog: CATALOG,
        }
    }

    /// Score every review once, in input order.
    pub fn score(&self, reviews: &[Review]) -> Vec<ScoredReview> {
        reviews
            .iter()
            .map(|review| ScoredReview {
                text: review.text.clone(),
                rating: review.rating,
                polarity: self.scorer.polarity(&review.text),
            })
            .collect()
    }

    /// Mean polarity over all reviews; 0.0 for none.
    pub fn aggregate_sentiment(&self, reviews: &[Review]) -> f64 {
        average_polarity(&self.score(reviews))
    }

    pub fn summarize(&self, reviews: &[Review], title: &str) -> String {
        self.analyze(reviews, title).summary
    }

    /// Parse scraped ratings, then analyze. Any unreadable rating aborts.
    pub fn analyze_raw(&self, raw: &[RawReview], title: &str) -> Result<Analysis> {
        let reviews = review::parse_reviews(raw)?;
        Ok(self.analyze(&reviews, title))
    }

    pub fn analyze(&self, reviews: &[Review], title: &str) -> Analysis {
        let scored = self.score(reviews);
        let average_polarity = average_polarity(&scored);

        let Some(stats) = ReviewStats::compute(&scored) else {
            info!("no reviews to analyze");
            return Analysis {
                title: title.to_string(),
                stats: None,
                average_polarity,
                reviews: scored,
                positive_themes: ThemeMap::new(),
                negative_themes: ThemeMap::new(),
                neutral_excerpt: None,
                summary: NO_REVIEWS_SUMMARY.to_string(),
            };
        };

        let detailed: Vec<(&ScoredReview, &Review)> = scored
            .iter()
            .zip(reviews)
            .filter(|(_, review)| review.is_detailed())
            .collect();

        let positive_themes = extract_themes(
            detailed.iter().filter(|(s, _)| s.is_positive()).map(|(_, r)| *r),
            &self.catalog,
        );
        let negative_themes = extract_themes(
            detailed.iter().filter(|(s, _)| s.is_negative()).map(|(_, r)| *r),
            &self.catalog,
        );

        let neutral_excerpt = longest_neutral(&detailed)
            .map(|review| summary::truncate_chars(&review.text, NEUTRAL_EXCERPT_CHARS).to_string());

        debug!(
            detailed = detailed.len(),
            positive_themes = positive_themes.len(),
            negative_themes = negative_themes.len(),
            has_neutral = neutral_excerpt.is_some(),
            "themes extracted"
        );

        let summary = summary::compose(&SummaryInput {
            title,
            stats: &stats,
            positive_themes: &positive_themes,
            negative_themes: &negative_themes,
            neutral_excerpt: neutral_excerpt.as_deref(),
        });

        info!(
            total = stats.total_reviews,
            avg_rating = stats.avg_rating,
            positive_percent = stats.positive_percent,
            negative_percent = stats.negative_percent,
            "analysis complete"
        );

        Analysis {
            title: title.to_string(),
            stats: Some(stats),
            average_polarity,
            reviews: scored,
            positive_themes,
            negative_themes,
            neutral_excerpt,
            summary,
        }
    }
}

/// Longest neutral detailed review; the earliest wins a tie.
fn longest_neutral<'a>(detailed: &[(&ScoredReview, &'a Review)]) -> Option<&'a Review> {
    detailed
        .iter()
        .filter(|(s, _)| s.is_neutral())
        .map(|(_, r)| *r)
        .fold(None::<&Review>, |best, candidate| match best {
            Some(current) if current.char_len() >= candidate.char_len() => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconScorer;
    use crate::themes::Theme;

    /// Polarity from a marker word, so tests control buckets exactly.
    fn marker_scorer(text: &str) -> f64 {
        if text.contains("[pos]") {
            0.5
        } else if text.contains("[neg]") {
            -0.5
        } else {
            0.0
        }
    }

    fn padded(marker: &str, body: &str, rating: f64) -> Review {
        Review::new(format!("{} {} {}", marker, "a".repeat(201), body), rating)
    }

    #[test]
    fn test_empty_reviews() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        assert_eq!(analyzer.summarize(&[], "Widget"), "No reviews found for analysis.");
        assert_eq!(analyzer.aggregate_sentiment(&[]), 0.0);
        assert!(analyzer.analyze(&[], "Widget").stats.is_none());
    }

    #[test]
    fn test_single_positive_detailed_review() {
        let analyzer = ReviewAnalyzer::new(LexiconScorer);
        let reviews = vec![Review::new(format!("{} great quality build", "A".repeat(201)), 5.0)];
        let analysis = analyzer.analyze(&reviews, "Widget");

        assert_eq!(analysis.positive_themes[&Theme::Quality].len(), 1);
        assert!(analysis.negative_themes.is_empty());
        assert!(analysis.summary.contains("The standout features praised by customers include the quality ("));
        assert!(analysis.summary.contains("overwhelmingly positive reviews"));
        assert!(analysis.summary.ends_with("particularly for those valuing quality."));
    }

    #[test]
    fn test_all_negative_gets_mixed_closing() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![
            padded("[neg]", "the build broke quickly.", 2.0),
            padded("[neg]", "too expensive.", 1.0),
            padded("[neg]", "it was fine i guess", 3.0),
        ];
        let analysis = analyzer.analyze(&reviews, "Widget");
        let stats = analysis.stats.as_ref().unwrap();

        assert_eq!(stats.avg_rating, 2.0);
        assert_eq!(stats.positive_percent, 0.0);
        assert!(analysis.summary.contains("generally negative reviews"));
        assert!(analysis.summary.contains("However, some users have expressed concerns about the quality ("));
        assert!(analysis.summary.ends_with(
            "Given the mixed feedback, potential buyers should carefully consider these varied \
             experiences and whether the reported issues might affect their intended use of the product."
        ));
    }

    #[test]
    fn test_review_lands_in_two_themes() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![padded("[pos]", "fast performance at a great price", 5.0)];
        let analysis = analyzer.analyze(&reviews, "Widget");

        assert!(analysis.positive_themes[&Theme::Performance][0].ends_with("fast performance at a great price"));
        assert!(analysis.positive_themes[&Theme::Value][0].ends_with("fast performance at a great price"));
        assert!(analysis.summary.contains("the value ("));
        assert!(analysis.summary.contains(", and the performance ("));
    }

    #[test]
    fn test_short_reviews_count_but_are_not_themed() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![
            Review::new("[pos] great quality", 5.0),
            Review::new("[neg] bad price", 1.0),
        ];
        let analysis = analyzer.analyze(&reviews, "Widget");
        let stats = analysis.stats.unwrap();

        assert_eq!(stats.positive_percent, 50.0);
        assert_eq!(stats.negative_percent, 50.0);
        assert!(analysis.positive_themes.is_empty());
        assert!(analysis.negative_themes.is_empty());
        assert_eq!(analysis.average_polarity, 0.0);
    }

    #[test]
    fn test_neutral_excerpt_is_longest_and_truncated() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let shorter = Review::new(format!("Short neutral {}", "b".repeat(200)), 3.0);
        let longer = Review::new(format!("Long neutral {}", "c".repeat(400)), 3.0);
        let analysis = analyzer.analyze(&[shorter, longer.clone()], "Widget");

        let excerpt = analysis.neutral_excerpt.unwrap();
        assert_eq!(excerpt.chars().count(), 150);
        assert!(longer.text.starts_with(&excerpt));
        assert!(analysis
            .summary
            .contains(&format!("A balanced perspective from users notes that {}... ", excerpt)));
    }

    #[test]
    fn test_neutral_tie_keeps_first() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let first = Review::new(format!("first {}", "x".repeat(250)), 3.0);
        let second = Review::new(format!("secnd {}", "x".repeat(250)), 3.0);
        let analysis = analyzer.analyze(&[first, second], "Widget");
        assert!(analysis.neutral_excerpt.unwrap().starts_with("first"));
    }

    #[test]
    fn test_neutral_reviews_are_not_themed() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![padded("", "great quality build", 4.0)];
        let analysis = analyzer.analyze(&reviews, "Widget");

        assert!(analysis.positive_themes.is_empty());
        assert!(analysis.negative_themes.is_empty());
        assert!(analysis.neutral_excerpt.is_some());
        assert!(analysis.summary.contains("A balanced perspective from users notes that "));
    }

    #[test]
    fn test_short_neutral_review_is_not_quoted() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![
            Review::new("short neutral", 3.0),
            Review::new(format!("edge {}", "n".repeat(195)), 3.0),
        ];
        assert_eq!(reviews[1].char_len(), 200);
        let analysis = analyzer.analyze(&reviews, "Widget");

        assert!(analysis.neutral_excerpt.is_none());
        assert!(!analysis.summary.contains("balanced perspective"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let analyzer = ReviewAnalyzer::new(LexiconScorer);
        let reviews = vec![
            padded("", "Excellent design and easy setup. Support was helpful.", 5.0),
            padded("", "Terrible durability, the material cracked. Not worth the price.", 1.0),
            Review::new("Okay.", 3.0),
        ];
        let first = analyzer.summarize(&reviews, "Widget");
        let second = analyzer.summarize(&reviews, "Widget");
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_raw_rejects_bad_rating() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let raw = vec![
            RawReview {
                text: "[pos] lovely".into(),
                rating: "5.0 out of 5 stars".into(),
            },
            RawReview {
                text: "[neg] meh".into(),
                rating: "Error finding rating: timeout".into(),
            },
        ];
        assert!(matches!(
            analyzer.analyze_raw(&raw, "Widget"),
            Err(crate::error::AnalyzerError::Parse(_))
        ));

        let analysis = analyzer.analyze_raw(&raw[..1], "Widget").unwrap();
        assert_eq!(analysis.stats.unwrap().avg_rating, 5.0);
    }

    #[test]
    fn test_scores_follow_input_order() {
        let analyzer = ReviewAnalyzer::new(marker_scorer);
        let reviews = vec![
            Review::new("[neg] a", 1.0),
            Review::new("[pos] b", 5.0),
            Review::new("c", 3.0),
        ];
        let polarities: Vec<f64> = analyzer.score(&reviews).iter().map(|s| s.polarity).collect();
        assert_eq!(polarities, [-0.5, 0.5, 0.0]);
    }
}
