//! Lexicon-based sentiment scoring.
//!
//! The analyzer is a pure function over text: it lowercases the input,
//! tokenizes on whitespace, sums a per-token valence from an embedded
//! AFINN-style lexicon, and derives a categorical mood from the raw sum.
//! It holds no state and performs no I/O, so every call with the same input
//! produces the same output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

mod lexicon;

static LEXICON: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| lexicon::ENTRIES.iter().copied().collect());

/// Raw score above which a message is labeled positive (negated for
/// negative). Applied to the summed score, not the length-normalized
/// comparative value; exactly +/-0.2 is neutral.
const MOOD_THRESHOLD: f64 = 0.2;

/// Categorical sentiment label for a scored message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Positive => write!(f, "positive"),
            Mood::Negative => write!(f, "negative"),
            Mood::Neutral => write!(f, "neutral"),
        }
    }
}

/// The result of scoring a single piece of text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Sum of the lexicon valences of every token.
    pub score: f64,
    /// `score` divided by the token count (at least 1).
    pub comparative: f64,
    /// Categorical label derived from `score`.
    pub mood: Mood,
}

/// Deterministic, side-effect-free sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scores `text` against the embedded lexicon.
    ///
    /// Unknown tokens contribute zero. An empty input scores 0 with a
    /// neutral mood; the comparative divisor is clamped to 1 so it never
    /// divides by zero.
    pub fn score(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let score: f64 = tokens
            .iter()
            .map(|token| LEXICON.get(*token).copied().unwrap_or(0.0))
            .sum();
        let comparative = score / tokens.len().max(1) as f64;
        Sentiment {
            score,
            comparative,
            mood: classify(score),
        }
    }
}

/// Maps a raw summed score onto a mood label using strict comparisons
/// against [`MOOD_THRESHOLD`].
fn classify(score: f64) -> Mood {
    if score > MOOD_THRESHOLD {
        Mood::Positive
    } else if score < -MOOD_THRESHOLD {
        Mood::Negative
    } else {
        Mood::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scoring_is_deterministic() {
        let analyzer = SentimentAnalyzer::new();
        let first = analyzer.score("I love this great service");
        let second = analyzer.score("I love this great service");
        assert_eq!(first, second);
    }

    #[test]
    fn positive_text_scores_positive() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.score("I love this!");
        assert_relative_eq!(result.score, 3.0);
        assert_eq!(result.mood, Mood::Positive);
    }

    #[test]
    fn negative_text_scores_negative() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.score("this is terrible and I hate it");
        assert_relative_eq!(result.score, -6.0);
        assert_eq!(result.mood, Mood::Negative);
    }

    #[test]
    fn unknown_tokens_contribute_zero() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.score("quasar flibbertigibbet antidisestablishmentarianism");
        assert_relative_eq!(result.score, 0.0);
        assert_relative_eq!(result.comparative, 0.0);
        assert_eq!(result.mood, Mood::Neutral);
    }

    #[test]
    fn comparative_divides_by_token_count() {
        let analyzer = SentimentAnalyzer::new();
        // "love" = 3.0 over four tokens.
        let result = analyzer.score("i love my dog");
        assert_relative_eq!(result.comparative, 0.75);
    }

    #[test]
    fn empty_input_is_neutral_without_dividing_by_zero() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.score("");
        assert_relative_eq!(result.score, 0.0);
        assert_relative_eq!(result.comparative, 0.0);
        assert_eq!(result.mood, Mood::Neutral);
    }

    #[test]
    fn tokenization_lowercases_before_lookup() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.score("LOVE").mood, Mood::Positive);
        assert_eq!(analyzer.score("HATE").mood, Mood::Negative);
    }

    #[test]
    fn mood_boundaries_use_raw_score() {
        // Thresholds are compared against the summed score, so any single
        // lexicon hit of +/-1 or more crosses them regardless of length.
        assert_eq!(classify(0.5), Mood::Positive);
        assert_eq!(classify(-0.5), Mood::Negative);
        assert_eq!(classify(0.0), Mood::Neutral);
    }

    #[test]
    fn mood_boundary_at_threshold_is_neutral() {
        // The comparisons are strict, so exactly +/-0.2 stays neutral.
        assert_eq!(classify(0.2), Mood::Neutral);
        assert_eq!(classify(-0.2), Mood::Neutral);
    }

    #[test]
    fn mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&Mood::Negative).unwrap(), "\"negative\"");
        assert_eq!(serde_json::to_string(&Mood::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn sentiment_round_trips_through_json() {
        let analyzer = SentimentAnalyzer::new();
        let original = analyzer.score("what a wonderful day");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Sentiment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
