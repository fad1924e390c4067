//! Analysis services.

mod analyzer;
mod lexicon;

pub use analyzer::InputAnalyzer;
pub use lexicon::SentimentLexicon;
