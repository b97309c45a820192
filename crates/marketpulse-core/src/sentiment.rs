//! Deterministic lexical sentiment scoring for headlines and post excerpts.
//!
//! The scorer counts hits against two disjoint fixed lexicons and maps the
//! count difference onto a bounded score. No randomness, no external calls;
//! the same text always scores the same value, and unscoreable input scores
//! exactly neutral instead of erroring.

use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bullish valence terms. Disjoint from [`BEARISH`].
const BULLISH: &[&str] = &[
    "beat", "beats", "breakout", "bullish", "buy", "calls", "gain", "gains", "growth", "jump",
    "jumps", "long", "moon", "profit", "profits", "rally", "record", "rocket", "soar", "soars",
    "strong", "surge", "surges", "undervalued", "upgrade", "win", "wins",
];

/// Bearish valence terms. Disjoint from [`BULLISH`].
const BEARISH: &[&str] = &[
    "avoid", "bearish", "crash", "crashes", "decline", "declines", "downgrade", "drop", "drops",
    "dump", "fall", "falls", "fraud", "lawsuit", "loss", "losses", "miss", "misses", "overvalued",
    "plunge", "plunges", "puts", "sell", "short", "slump", "weak",
];

/// Saturation point: four net lexicon hits pin the score to +/-1.0.
const SATURATION_HITS: f64 = 4.0;

/// Signed valence in [-1.0, 1.0]; 0.0 means neutral or unscoreable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SentimentScore(f64);

impl SentimentScore {
    pub const NEUTRAL: Self = Self(0.0);

    /// Clamp an arbitrary value into the valid score range. Non-finite
    /// input collapses to neutral.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        Self(value.clamp(-1.0, 1.0))
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn label(self) -> &'static str {
        if self.0 > 0.0 {
            "bullish"
        } else if self.0 < 0.0 {
            "bearish"
        } else {
            "neutral"
        }
    }
}

impl Display for SentimentScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

impl Serialize for SentimentScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for SentimentScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !(-1.0..=1.0).contains(&value) {
            return Err(D::Error::custom(format!(
                "sentiment score {value} outside [-1.0, 1.0]"
            )));
        }
        Ok(Self(value))
    }
}

/// Score a text string.
///
/// Lowercases, tokenizes on non-alphanumeric boundaries, and counts bullish
/// and bearish lexicon hits. The score is `(bullish - bearish) / 4` clamped
/// to [-1.0, 1.0]: monotonic in the count difference and saturating at four
/// net hits. Empty or lexicon-free text scores exactly 0.0.
pub fn score(text: &str) -> SentimentScore {
    let lowered = text.to_lowercase();
    let mut bullish = 0i64;
    let mut bearish = 0i64;

    for token in lowered
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
    {
        if BULLISH.contains(&token) {
            bullish += 1;
        } else if BEARISH.contains(&token) {
            bearish += 1;
        }
    }

    let diff = bullish - bearish;
    if diff == 0 {
        return SentimentScore::NEUTRAL;
    }
    SentimentScore::new(diff as f64 / SATURATION_HITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_exactly_zero() {
        assert_eq!(score("").value(), 0.0);
        assert_eq!(score("   \t\n").value(), 0.0);
    }

    #[test]
    fn lexicon_free_text_is_neutral() {
        assert_eq!(score("the quarterly report was published today"), SentimentScore::NEUTRAL);
    }

    #[test]
    fn positive_headline_scores_strictly_positive() {
        assert!(score("Company X profits soar").value() > 0.0);
    }

    #[test]
    fn negative_headline_scores_strictly_negative() {
        assert!(score("Company X shares crash").value() < 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Strong breakout, analysts upgrade; shorts dump and crash";
        assert_eq!(score(text), score(text));
    }

    #[test]
    fn score_is_bounded() {
        let very_bullish = "buy buy buy moon rocket rally surge soar breakout growth";
        let very_bearish = "sell sell crash dump plunge slump decline weak avoid fraud";
        assert_eq!(score(very_bullish).value(), 1.0);
        assert_eq!(score(very_bearish).value(), -1.0);
    }

    #[test]
    fn score_is_monotonic_in_count_difference() {
        let one = score("profits soar").value();
        let two = score("profits soar and shares rally").value();
        assert!(two >= one);
        assert!(one > 0.0);
    }

    #[test]
    fn tokenization_ignores_case_and_punctuation() {
        assert_eq!(score("BUY!"), score("buy"));
        assert!(score("no 'crash,' they said").value() < 0.0);
    }

    #[test]
    fn lexicons_are_disjoint() {
        for term in BULLISH {
            assert!(!BEARISH.contains(term), "term '{term}' appears in both lexicons");
        }
    }

    #[test]
    fn labels_follow_sign() {
        assert_eq!(score("profits soar").label(), "bullish");
        assert_eq!(score("shares crash").label(), "bearish");
        assert_eq!(score("shares traded").label(), "neutral");
    }

    #[test]
    fn deserialization_rejects_out_of_range() {
        let err = serde_json::from_str::<SentimentScore>("1.5");
        assert!(err.is_err());
    }
}
