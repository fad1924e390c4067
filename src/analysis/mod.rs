//! Input analysis for Switchyard.
//!
//! Turns raw user text into an [`domain::AnalyzedInput`]: cleaned tokens, a
//! coarse intent, extracted entities, and a sentiment reading. Analysis is a
//! pure function of the input text.
//!
//! - Domain types in [`domain`]
//! - The analyzer and its sentiment lexicon in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
