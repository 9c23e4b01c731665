use std::{env, time::Duration};

use crate::ai::inference::OPENAI_API_URL;

use super::env::{
    AppConfig, BatchConfig, ConfigError, DirectoryConfig, LoggingConfig, OpenAiConfig,
};

const API_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let openai = OpenAiConfig {
            api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.is_empty() && v != API_KEY_PLACEHOLDER),
            endpoint: env::var("OPENAI_API_URL").unwrap_or_else(|_| OPENAI_API_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            max_tokens: parse_or("OPENAI_MAX_TOKENS", 800),
            temperature: parse_or("OPENAI_TEMPERATURE", 0.3),
            request_timeout: Duration::from_millis(parse_or("OPENAI_TIMEOUT_MS", 30_000)),
        };

        let chunk_size: usize = parse_or("BATCH_CHUNK_SIZE", 5);
        if chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "BATCH_CHUNK_SIZE",
                "must be at least 1".to_string(),
            ));
        }
        let batch = BatchConfig {
            chunk_size,
            pause_between_calls: Duration::from_millis(parse_or("BATCH_CALL_PAUSE_MS", 500)),
            pause_between_chunks: Duration::from_millis(parse_or("BATCH_CHUNK_PAUSE_MS", 2_000)),
        };

        let institution_domains = env::var("INSTITUTION_DOMAINS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(|part| part.trim().trim_start_matches('@').to_lowercase())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|domains| !domains.is_empty())
            .unwrap_or_else(|| vec!["uss.cl".to_string()]);

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let timezone = env::var("TRIAGE_TIMEZONE").unwrap_or_else(|_| "America/Santiago".to_string());

        let inbox_file = env::var("INBOX_FILE").unwrap_or_else(|_| "inbox.json".to_string());

        Ok(Self {
            openai,
            batch,
            institution_domains,
            directories,
            logging,
            timezone,
            inbox_file,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}
