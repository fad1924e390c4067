//! Input analyzer producing [`AnalyzedInput`] records.

use crate::analysis::{
    domain::{AnalyzedInput, Entities, InputKind, Intent},
    services::SentimentLexicon,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid number pattern"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[A-Z][a-z]* )*[A-Z][a-z]*\b").expect("valid name pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\d{1,2}/\d{1,2}/\d{2,4}",
        r"|\d{1,2}-\d{1,2}-\d{2,4}",
        r"|\d{1,2}\s(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s\d{2,4}",
    ))
    .expect("valid date pattern")
});

/// Stateless analyzer turning raw text into an [`AnalyzedInput`].
///
/// # Examples
///
/// ```
/// use switchyard::analysis::domain::{InputKind, Intent};
/// use switchyard::analysis::services::InputAnalyzer;
///
/// let analyzed = InputAnalyzer::new().analyze("Find my keys!", InputKind::Text);
/// assert_eq!(analyzed.cleaned_input(), "find my keys");
/// assert_eq!(analyzed.intent(), Intent::Search);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InputAnalyzer {
    lexicon: SentimentLexicon,
}

impl InputAnalyzer {
    /// Creates an analyzer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::new(),
        }
    }

    /// Analyzes `text`.
    #[must_use]
    pub fn analyze(&self, text: &str, kind: InputKind) -> AnalyzedInput {
        let cleaned = clean_text(text);
        let tokens: Vec<String> = cleaned.split_whitespace().map(str::to_owned).collect();
        let intent = Intent::classify(&tokens);
        let entities = extract_entities(text);
        let sentiment = self.lexicon.score(text);
        debug!(%intent, %kind, tokens = tokens.len(), "analyzed input");

        AnalyzedInput::new(
            text.to_owned(),
            cleaned,
            tokens,
            intent,
            entities,
            sentiment,
            kind,
        )
    }
}

/// Lowercases `text` and drops every character that is neither a word
/// character nor whitespace.
fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_owned()
}

fn extract_entities(text: &str) -> Entities {
    let numbers = NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|found| found.as_str().parse::<u64>().ok())
        .collect();
    let names = NAME_PATTERN
        .find_iter(text)
        .map(|found| found.as_str().to_owned())
        .collect();
    let dates = DATE_PATTERN
        .find_iter(text)
        .map(|found| found.as_str().to_owned())
        .collect();
    Entities::new(numbers, names, dates)
}
