//! Review records as scraped and as analyzed.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Highest star rating a listing can display.
pub const MAX_STARS: f64 = 5.0;

/// Reviews longer than this many characters are "detailed" and feed theme extraction.
pub const DETAILED_REVIEW_MIN_CHARS: usize = 200;

/// A review exactly as it appears on the page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawReview {
    pub text: String,
    /// Display string such as `"4.0 out of 5 stars"`
    pub rating: String,
}

/// A review with its star rating parsed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub text: String,
    pub rating: f64,
}

impl Review {
    pub fn new(text: impl Into<String>, rating: f64) -> Self {
        Self {
            text: text.into(),
            rating,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_detailed(&self) -> bool {
        self.char_len() > DETAILED_REVIEW_MIN_CHARS
    }
}

impl TryFrom<&RawReview> for Review {
    type Error = ParseError;

    fn try_from(raw: &RawReview) -> Result<Self, Self::Error> {
        Ok(Review {
            text: raw.text.clone(),
            rating: parse_rating(&raw.rating)?,
        })
    }
}

/// Parse the number in front of `" out of "` in a star-rating string.
pub fn parse_rating(text: &str) -> Result<f64, ParseError> {
    let malformed = |reason: &str| ParseError::Rating {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let (stars, _) = text
        .split_once(" out of ")
        .ok_or_else(|| malformed("missing \" out of \""))?;

    let value: f64 = stars
        .trim()
        .parse()
        .map_err(|_| malformed("star count is not a number"))?;

    if !value.is_finite() || !(0.0..=MAX_STARS).contains(&value) {
        return Err(malformed("star count outside 0-5"));
    }

    Ok(value)
}

/// Convert a scraped review set, failing on the first unparseable rating.
pub fn parse_reviews(raw: &[RawReview]) -> Result<Vec<Review>, ParseError> {
    raw.iter().map(Review::try_from).collect()
}
