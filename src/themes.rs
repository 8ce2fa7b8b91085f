//! Theme catalog and keyword-based theme extraction.
//!
//! Each [`Theme`] owns a fixed set of trigger keywords. Extraction walks the
//! reviews in order and, for every theme whose keywords appear in a review,
//! keeps the first `.`-delimited sentence that mentions one of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::review::Review;

/// Topical categories, declared in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Quality,
    Value,
    Performance,
    Features,
    Design,
    Usability,
    Reliability,
    Support,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Quality => "quality",
            Theme::Value => "value",
            Theme::Performance => "performance",
            Theme::Features => "features",
            Theme::Design => "design",
            Theme::Usability => "usability",
            Theme::Reliability => "reliability",
            Theme::Support => "support",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        CATALOG.keywords(self)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable theme → keywords table, iterated in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct ThemeCatalog {
    entries: &'static [(Theme, &'static [&'static str])],
}

/// The built-in catalog.
pub static CATALOG: ThemeCatalog = ThemeCatalog {
    entries: &[
        (Theme::Quality, &["quality", "build", "material", "durability", "construction"]),
        (Theme::Value, &["price", "value", "worth", "cost", "expensive", "cheap"]),
        (Theme::Performance, &["performance", "speed", "fast", "slow", "efficient"]),
        (Theme::Features, &["feature", "functionality", "options", "capabilities"]),
        (Theme::Design, &["design", "look", "aesthetic", "style", "appearance"]),
        (Theme::Usability, &["easy", "simple", "intuitive", "user-friendly", "difficult"]),
        (Theme::Reliability, &["reliable", "consistent", "stable", "issues", "problems"]),
        (Theme::Support, &["support", "customer service", "warranty", "help"]),
    ],
};

impl ThemeCatalog {
    pub fn iter(&self) -> impl Iterator<Item = (Theme, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    pub fn keywords(&self, theme: Theme) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(t, _)| *t == theme)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

/// Theme → example sentences. Only themes with at least one example are present.
pub type ThemeMap = BTreeMap<Theme, Vec<String>>;

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// First `.`-delimited sentence of `lowered` mentioning any keyword, trimmed.
fn first_relevant_sentence<'a>(lowered: &'a str, keywords: &[&str]) -> Option<&'a str> {
    lowered
        .split('.')
        .map(str::trim)
        .find(|sentence| !sentence.is_empty() && mentions_any(sentence, keywords))
}

/// Collect one example sentence per (review, matching theme).
///
/// Callers pass only detailed reviews of a single polarity.
pub fn extract_themes<'r, I>(reviews: I, catalog: &ThemeCatalog) -> ThemeMap
where
    I: IntoIterator<Item = &'r Review>,
{
    let mut themes = ThemeMap::new();

    for review in reviews {
        let lowered = review.text.to_lowercase();
        for (theme, keywords) in catalog.iter() {
            if !mentions_any(&lowered, keywords) {
                continue;
            }
            if let Some(sentence) = first_relevant_sentence(&lowered, keywords) {
                themes.entry(theme).or_default().push(sentence.to_string());
            }
        }
    }

    themes
}

/// Longest example by character count; the earliest wins a tie.
pub fn longest_example(examples: &[String]) -> Option<&str> {
    examples
        .iter()
        .fold(None::<&String>, |best, candidate| match best {
            Some(current) if current.chars().count() >= candidate.chars().count() => Some(current),
            _ => Some(candidate),
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(body: &str) -> Review {
        Review::new(format!("{} {}", "a".repeat(201), body), 5.0)
    }

    #[test]
    fn test_catalog_order_and_keywords() {
        let labels: Vec<&str> = CATALOG.iter().map(|(t, _)| t.label()).collect();
        assert_eq!(
            labels,
            [
                "quality", "value", "performance", "features",
                "design", "usability", "reliability", "support"
            ]
        );
        assert_eq!(
            Theme::Support.keywords(),
            ["support", "customer service", "warranty", "help"]
        );
    }

    #[test]
    fn test_single_theme_match() {
        let reviews = vec![detailed("great quality build")];
        let themes = extract_themes(&reviews, &CATALOG);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[&Theme::Quality].len(), 1);
        assert!(themes[&Theme::Quality][0].ends_with("great quality build"));
    }

    #[test]
    fn test_review_contributes_to_multiple_themes() {
        let reviews = vec![Review::new(
            "Fast performance at a great price. ".repeat(8),
            5.0,
        )];
        let themes = extract_themes(&reviews, &CATALOG);
        assert_eq!(themes[&Theme::Performance], ["fast performance at a great price"]);
        assert_eq!(themes[&Theme::Value], ["fast performance at a great price"]);
        assert!(!themes.contains_key(&Theme::Quality));
    }

    #[test]
    fn test_only_first_relevant_sentence_per_review() {
        let reviews = vec![Review::new(
            "It arrived early. The price was fair. The price later dropped. The cost is fine.",
            4.0,
        )];
        let themes = extract_themes(&reviews, &CATALOG);
        assert_eq!(themes[&Theme::Value], ["the price was fair"]);
    }

    #[test]
    fn test_examples_keep_review_order() {
        let reviews = vec![
            Review::new("Solid design overall.", 5.0),
            Review::new("I like the look.", 4.0),
        ];
        let themes = extract_themes(&reviews, &CATALOG);
        assert_eq!(themes[&Theme::Design], ["solid design overall", "i like the look"]);
    }

    #[test]
    fn test_unmatched_themes_are_absent() {
        let reviews = vec![Review::new("Nothing to see here.", 3.0)];
        assert!(extract_themes(&reviews, &CATALOG).is_empty());
        assert!(extract_themes(&Vec::<Review>::new(), &CATALOG).is_empty());
    }

    #[test]
    fn test_adding_reviews_only_extends_examples() {
        let mut reviews = vec![detailed("the build is solid")];
        let before = extract_themes(&reviews, &CATALOG);
        reviews.push(detailed("the material feels premium"));
        let after = extract_themes(&reviews, &CATALOG);
        for (theme, examples) in &before {
            assert!(after[theme].starts_with(examples));
        }
        assert_eq!(after[&Theme::Quality].len(), 2);
    }

    #[test]
    fn test_longest_example_prefers_first_on_tie() {
        let examples = vec!["abc".to_string(), "xyz".to_string(), "ab".to_string()];
        assert_eq!(longest_example(&examples), Some("abc"));
        let examples = vec!["ab".to_string(), "abcd".to_string()];
        assert_eq!(longest_example(&examples), Some("abcd"));
        assert_eq!(longest_example(&[]), None);
    }
}
