//! Lexicon-based sentiment scoring.
//!
//! Polarity and subjectivity are averaged over the words found in the
//! lexicon. A preceding negator flips and halves the polarity of the next
//! scored word; preceding intensifiers scale both of its scores.

use crate::analysis::domain::Sentiment;

/// `(word, polarity, subjectivity)`.
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("brilliant", 0.9, 1.0),
    ("easy", 0.43, 0.83),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("fast", 0.2, 0.6),
    ("fine", 0.42, 0.5),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.5),
    ("like", 0.2, 0.4),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("pleased", 0.5, 1.0),
    ("thanks", 0.2, 0.2),
    ("useful", 0.3, 0.0),
    ("wonderful", 1.0, 1.0),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("difficult", -0.5, 1.0),
    ("disappointed", -0.75, 0.75),
    ("hard", -0.29, 0.54),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("useless", -0.5, 0.2),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

/// `(word, multiplier)`.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("too", 1.2),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["no", "not", "never", "nothing", "nobody", "neither", "nor"];

/// Polarity factor applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

/// Scores text against a fixed word lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentLexicon;

impl SentimentLexicon {
    /// Creates the lexicon scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Scores `text`, returning a neutral objective reading when no lexicon
    /// word occurs.
    #[must_use]
    pub fn score(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let mut negated = false;
        let mut intensity = 1.0_f64;
        let mut polarity_total = 0.0_f64;
        let mut subjectivity_total = 0.0_f64;
        let mut matched = 0_u32;

        let words = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|word| !word.is_empty());
        for word in words {
            if is_negator(word) {
                negated = true;
                continue;
            }
            if let Some(multiplier) = intensifier(word) {
                intensity *= multiplier;
                continue;
            }
            let Some((polarity, subjectivity)) = lookup(word) else {
                continue;
            };

            let directed = if negated {
                polarity * NEGATION_FACTOR
            } else {
                polarity
            };
            polarity_total += (directed * intensity).clamp(-1.0, 1.0);
            subjectivity_total += (subjectivity * intensity).clamp(0.0, 1.0);
            matched += 1;
            negated = false;
            intensity = 1.0;
        }

        if matched == 0 {
            return Sentiment::from_scores(0.0, 0.0);
        }
        let count = f64::from(matched);
        Sentiment::from_scores(
            (polarity_total / count).clamp(-1.0, 1.0),
            (subjectivity_total / count).clamp(0.0, 1.0),
        )
    }
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn intensifier(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(candidate, _)| *candidate == word)
        .map(|(_, multiplier)| *multiplier)
}

fn lookup(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(candidate, _, _)| *candidate == word)
        .map(|(_, polarity, subjectivity)| (*polarity, *subjectivity))
}
