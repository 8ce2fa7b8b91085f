//! Product review analysis: scrape a listing's reviews, score their
//! sentiment, pull out recurring themes, and write a narrative summary.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod error;
pub mod preview;
pub mod report;
pub mod review;
pub mod sentiment;
pub mod stats;
pub mod stealth;
pub mod summary;
pub mod themes;

pub use analyzer::{Analysis, ReviewAnalyzer};
pub use crawler::{ChromeReviewSource, ProductPage, ReviewSource, ScrapedField};
pub use error::{AnalyzerError, ParseError};
pub use review::{RawReview, Review};
pub use sentiment::{LexiconScorer, PolarityScorer};
pub use themes::{Theme, ThemeMap, CATALOG};
