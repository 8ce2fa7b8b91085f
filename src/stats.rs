//! Aggregate statistics over a full review set.

use serde::Serialize;

/// A review paired with its polarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    pub text: String,
    pub rating: f64,
    pub polarity: f64,
}

impl ScoredReview {
    pub fn is_positive(&self) -> bool {
        self.polarity > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.polarity < 0.0
    }

    pub fn is_neutral(&self) -> bool {
        self.polarity == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub avg_rating: f64,
    pub min_rating: f64,
    pub max_rating: f64,
    pub positive_percent: f64,
    pub negative_percent: f64,
    pub neutral_percent: f64,
}

impl ReviewStats {
    /// `None` for an empty set; nothing is divided in that case.
    pub fn compute(reviews: &[ScoredReview]) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }

        let total = reviews.len() as f64;
        let percent = |count: usize| count as f64 / total * 100.0;

        let rating_sum: f64 = reviews.iter().map(|r| r.rating).sum();
        let min_rating = reviews.iter().map(|r| r.rating).fold(f64::INFINITY, f64::min);
        let max_rating = reviews.iter().map(|r| r.rating).fold(f64::NEG_INFINITY, f64::max);

        let positive = reviews.iter().filter(|r| r.is_positive()).count();
        let negative = reviews.iter().filter(|r| r.is_negative()).count();
        let neutral = reviews.len() - positive - negative;

        Some(Self {
            total_reviews: reviews.len(),
            // clamp guards float drift past the observed bounds
            avg_rating: (rating_sum / total).clamp(min_rating, max_rating),
            min_rating,
            max_rating,
            positive_percent: percent(positive),
            negative_percent: percent(negative),
            neutral_percent: percent(neutral),
        })
    }
}

/// Mean polarity of every review, or 0.0 when there are none.
pub fn average_polarity(reviews: &[ScoredReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    reviews.iter().map(|r| r.polarity).sum::<f64>() / reviews.len() as f64
}
