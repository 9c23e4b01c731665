pub mod env;
mod loader;

pub use env::{AppConfig, BatchConfig, DirectoryConfig, OpenAiConfig};
pub use loader::load_config;
