pub mod client;
pub mod inference;
pub mod prompt;

pub use client::OpenAiClient;
pub use inference::ClassificationError;
