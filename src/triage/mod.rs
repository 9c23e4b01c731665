pub mod batch;
pub mod engine;
pub mod fallback;
pub mod priority;
pub mod rules;
pub mod stats;

pub use batch::{classify_batch, BatchPacing};
pub use engine::UrgencyClassifier;
pub use priority::{suggest_priority, ResponsePriority};
pub use rules::Lexicon;
pub use stats::{aggregate, ClassificationStats};
