//! Domain model for keyword-frequency selection.

mod model;
mod outcome;
mod training;

pub use model::KeywordModel;
pub use outcome::Selection;
pub use training::TrainingExample;
