mod accuracy;
mod resolver;

pub use accuracy::{AccuracyResult, AccuracyTier, FeedbackLabel};
pub use resolver::{InputResolver, Resolution};
