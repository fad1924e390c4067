//! Domain model for analyzed user input.

mod entities;
mod input;
mod intent;
mod sentiment;

pub use entities::Entities;
pub use input::{AnalyzedInput, InputKind, ParseInputKindError};
pub use intent::Intent;
pub use sentiment::{Sentiment, SentimentLabel, Subjectivity};
