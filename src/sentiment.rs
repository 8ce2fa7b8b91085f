//! Lexicon-based polarity scoring.
//!
//! Scores a text in [-1.0, 1.0] from a static word list with per-word
//! polarities. Intensifiers ("very good") scale the next hit and nearby
//! negators ("not good") flip and dampen it. No external ML dependencies.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Anything that can score the sentiment of a text.
///
/// Negative means negative sentiment, positive means positive, zero is neutral.
/// Implementations must be deterministic and stay within [-1.0, 1.0].
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> f64,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        // positive
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("amazing", 0.6),
        ("wonderful", 1.0), ("fantastic", 0.4), ("superb", 1.0), ("outstanding", 0.5),
        ("brilliant", 0.9), ("love", 0.5), ("loved", 0.7), ("lovely", 0.5),
        ("best", 1.0), ("better", 0.5), ("nice", 0.6), ("happy", 0.8),
        ("pleased", 0.5), ("beautiful", 0.85), ("perfect", 1.0), ("perfectly", 1.0),
        ("awesome", 1.0), ("incredible", 0.9), ("impressive", 1.0), ("impressed", 0.7),
        ("delightful", 1.0), ("pleasant", 0.73), ("satisfied", 0.5), ("satisfying", 0.5),
        ("recommend", 0.4), ("recommended", 0.4), ("exceptional", 0.67), ("solid", 0.4),
        ("sturdy", 0.5), ("comfortable", 0.4), ("easy", 0.43), ("simple", 0.2),
        ("intuitive", 0.5), ("fast", 0.2), ("quick", 0.33), ("efficient", 0.5),
        ("reliable", 0.5), ("helpful", 0.5), ("worth", 0.3), ("fine", 0.4),
        ("works", 0.2), ("glad", 0.5), ("favorite", 0.5), ("clean", 0.37),
        ("durable", 0.5), ("affordable", 0.4), ("stylish", 0.5), ("smooth", 0.4),
        // negative
        ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
        ("poor", -0.4), ("poorly", -0.4), ("worst", -1.0), ("worse", -0.4),
        ("hate", -0.8), ("hated", -0.9), ("dislike", -0.5), ("disappointing", -0.6),
        ("disappointed", -0.75), ("disappointment", -0.6), ("failure", -0.32), ("failed", -0.5),
        ("fail", -0.5), ("fails", -0.5), ("sad", -0.5), ("unhappy", -0.6),
        ("angry", -0.5), ("annoying", -0.8), ("annoyed", -0.5), ("frustrated", -0.7),
        ("frustrating", -0.7), ("broken", -0.4), ("broke", -0.4), ("defective", -0.6),
        ("useless", -0.5), ("waste", -0.2), ("flimsy", -0.5), ("unreliable", -0.6),
        ("unstable", -0.4), ("slow", -0.3), ("difficult", -0.5), ("confusing", -0.4),
        ("complicated", -0.3), ("overpriced", -0.5), ("expensive", -0.5), ("worthless", -0.8),
        ("garbage", -0.8), ("junk", -0.6), ("mediocre", -0.5), ("cheaply", -0.4),
        ("wrong", -0.5), ("returned", -0.2), ("noisy", -0.4), ("uncomfortable", -0.5),
        ("stopped", -0.2), ("refund", -0.3), ("problem", -0.3), ("problems", -0.3),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    vec![
        ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("incredibly", 1.4),
        ("super", 1.3), ("so", 1.2), ("too", 1.2), ("quite", 1.1),
        ("absolutely", 1.4), ("totally", 1.3), ("pretty", 1.1), ("highly", 1.3),
    ]
    .into_iter()
    .collect()
});

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "hardly", "cannot", "don", "doesn", "didn",
    "isn", "wasn", "aren", "weren", "won", "wouldn", "couldn", "shouldn",
];

/// How far back (in words) a negator still applies.
const NEGATION_WINDOW: usize = 2;

/// Negated words keep only half their strength, with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// Default scorer backed by the static lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowercase_text = text.to_lowercase();
        let words: Vec<&str> = lowercase_text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();

        let mut hits = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&base) = LEXICON.get(word) else {
                continue;
            };

            let mut score = base;
            if let Some(factor) = i.checked_sub(1).and_then(|p| INTENSIFIERS.get(words[p])) {
                score *= factor;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if words[window_start..i].iter().any(|w| NEGATORS.contains(w)) {
                score *= NEGATION_FACTOR;
            }

            hits.push(score.clamp(-1.0, 1.0));
        }

        if hits.is_empty() {
            return 0.0;
        }

        let mean = hits.iter().sum::<f64>() / hits.len() as f64;
        tracing::trace!(words = words.len(), hits = hits.len(), mean, "scored text");
        mean.clamp(-1.0, 1.0)
    }
}
