pub mod email;
pub mod verdict;

pub use email::ClassificationInput;
pub use verdict::{
    ClassificationResult, ClassificationSource, EmailType, QueueState, SenderType, UrgencyCategory,
};
