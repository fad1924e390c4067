//! Sentiment labels and scores.

use serde::{Deserialize, Serialize};

/// Polarity above which text reads as positive.
const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below which text reads as negative.
const NEGATIVE_THRESHOLD: f64 = -0.1;
/// Subjectivity above which text reads as subjective.
const SUBJECTIVE_THRESHOLD: f64 = 0.5;

/// Polarity label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    /// Polarity above 0.1.
    Positive,
    /// Polarity below -0.1.
    Negative,
    /// Anything in between.
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Labels a polarity score.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Self::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Subjectivity label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subjectivity {
    /// Subjectivity above 0.5.
    Subjective,
    /// Anything else.
    #[default]
    Objective,
}

impl Subjectivity {
    /// Labels a subjectivity score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > SUBJECTIVE_THRESHOLD {
            Self::Subjective
        } else {
            Self::Objective
        }
    }
}

/// Sentiment reading for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    sentiment: SentimentLabel,
    subjectivity: Subjectivity,
    sentiment_score: f64,
    subjectivity_score: f64,
}

impl Sentiment {
    /// Creates a reading from raw scores, deriving both labels.
    #[must_use]
    pub fn from_scores(polarity: f64, subjectivity: f64) -> Self {
        Self {
            sentiment: SentimentLabel::from_polarity(polarity),
            subjectivity: Subjectivity::from_score(subjectivity),
            sentiment_score: polarity,
            subjectivity_score: subjectivity,
        }
    }

    /// Returns the polarity label.
    #[must_use]
    pub const fn label(&self) -> SentimentLabel {
        self.sentiment
    }

    /// Returns the subjectivity label.
    #[must_use]
    pub const fn subjectivity(&self) -> Subjectivity {
        self.subjectivity
    }

    /// Returns the polarity score in `[-1, 1]`.
    #[must_use]
    pub const fn polarity_score(&self) -> f64 {
        self.sentiment_score
    }

    /// Returns the subjectivity score in `[0, 1]`.
    #[must_use]
    pub const fn subjectivity_score(&self) -> f64 {
        self.subjectivity_score
    }
}
