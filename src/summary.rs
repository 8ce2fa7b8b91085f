//! Narrative summary assembly.
//!
//! The paragraph is built from fixed clauses appended in order: opening,
//! praised themes, a neutral excerpt, concerns, then a closing
//! recommendation. Descriptor and closing choices come from ordered rule
//! tables where the first matching rule wins.

use crate::stats::ReviewStats;
use crate::themes::{longest_example, ThemeMap};

pub const NO_REVIEWS_SUMMARY: &str = "No reviews found for analysis.";

/// Placeholder used when the product title could not be read.
pub const FALLBACK_TITLE: &str = "Product";

/// Neutral excerpts are cut to this many characters.
pub const NEUTRAL_EXCERPT_CHARS: usize = 150;

/// A first-match-wins rule: predicate over the statistics and its outcome.
pub struct Rule<T> {
    pub matches: fn(&ReviewStats) -> bool,
    pub outcome: T,
}

/// Return the outcome of the first rule that matches.
pub fn first_match<T: Copy>(rules: &[Rule<T>], stats: &ReviewStats) -> Option<T> {
    rules
        .iter()
        .find(|rule| (rule.matches)(stats))
        .map(|rule| rule.outcome)
}

pub const DESCRIPTOR_RULES: &[Rule<&str>] = &[
    Rule {
        matches: |s| s.positive_percent >= 80.0,
        outcome: "overwhelmingly positive reviews",
    },
    Rule {
        matches: |s| s.positive_percent >= 70.0,
        outcome: "largely positive reviews",
    },
    Rule {
        matches: |s| s.positive_percent >= 60.0,
        outcome: "generally positive reviews",
    },
    Rule {
        matches: |s| s.negative_percent >= 60.0,
        outcome: "generally negative reviews",
    },
];

pub const DEFAULT_DESCRIPTOR: &str = "mixed reviews";

/// Which closing sentence ends the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Strong praise naming the leading positive themes
    HighlyRecommended,
    /// Most buyers satisfied, weigh the trade-offs
    Cautious,
    /// Feedback too split to recommend
    Mixed,
}

pub const RECOMMENDATION_RULES: &[Rule<Recommendation>] = &[
    Rule {
        matches: |s| s.avg_rating >= 4.0 && s.positive_percent >= 70.0,
        outcome: Recommendation::HighlyRecommended,
    },
    Rule {
        matches: |s| s.avg_rating >= 3.5 && s.positive_percent >= 60.0,
        outcome: Recommendation::Cautious,
    },
];

const HIGHLY_RECOMMENDED_PREFIX: &str = "Given the substantial positive feedback and high average rating, this product comes highly recommended by the majority of users, particularly for those valuing ";
const CAUTIOUS_CLOSING: &str = "While most users are satisfied with their purchase, potential buyers should weigh the praised aspects against the reported limitations to ensure it meets their specific needs.";
const MIXED_CLOSING: &str = "Given the mixed feedback, potential buyers should carefully consider these varied experiences and whether the reported issues might affect their intended use of the product.";

pub fn sentiment_descriptor(stats: &ReviewStats) -> &'static str {
    first_match(DESCRIPTOR_RULES, stats).unwrap_or(DEFAULT_DESCRIPTOR)
}

pub fn recommendation(stats: &ReviewStats) -> Recommendation {
    first_match(RECOMMENDATION_RULES, stats).unwrap_or(Recommendation::Mixed)
}

/// Everything the paragraph is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub title: &'a str,
    pub stats: &'a ReviewStats,
    pub positive_themes: &'a ThemeMap,
    pub negative_themes: &'a ThemeMap,
    /// Already truncated neutral review text
    pub neutral_excerpt: Option<&'a str>,
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `"the quality (...), the value (...), and the design (...)"`
fn theme_points(themes: &ThemeMap) -> String {
    let points: Vec<String> = themes
        .iter()
        .filter_map(|(theme, examples)| {
            longest_example(examples).map(|example| format!("the {} ({})", theme, example))
        })
        .collect();

    match points.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{}, and {}", rest.join(", "), last),
    }
}

fn closing(input: &SummaryInput<'_>) -> String {
    match recommendation(input.stats) {
        Recommendation::HighlyRecommended => {
            let leading: Vec<&str> = input
                .positive_themes
                .keys()
                .take(2)
                .map(|theme| theme.label())
                .collect();
            format!("{}{}.", HIGHLY_RECOMMENDED_PREFIX, leading.join(" and "))
        }
        Recommendation::Cautious => CAUTIOUS_CLOSING.to_string(),
        Recommendation::Mixed => MIXED_CLOSING.to_string(),
    }
}

/// Assemble the narrative paragraph.
pub fn compose(input: &SummaryInput<'_>) -> String {
    let stats = input.stats;
    let mut summary = format!(
        "Based on a detailed analysis of {} customer reviews, the {} has received {} with an average rating of {:.1} out of 5 stars. ",
        stats.total_reviews,
        input.title,
        sentiment_descriptor(stats),
        stats.avg_rating
    );

    if !input.positive_themes.is_empty() {
        summary.push_str("The standout features praised by customers include ");
        summary.push_str(&theme_points(input.positive_themes));
        summary.push_str(". ");
    }

    if let Some(excerpt) = input.neutral_excerpt {
        summary.push_str(&format!(
            "A balanced perspective from users notes that {}... ",
            excerpt
        ));
    }

    if !input.negative_themes.is_empty() {
        summary.push_str("However, some users have expressed concerns about ");
        summary.push_str(&theme_points(input.negative_themes));
        summary.push_str(". ");
    }

    summary.push_str(&closing(input));
    summary
}
