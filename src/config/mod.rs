#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::MailerConfigProvider;
use crate::utils::error::{ConectaError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url,
};

pub const DEFAULT_FROM_ADDRESS: &str = "ConectaFunerarias <noreply@conectafunerarias.cl>";
pub const MAX_BATCH_SIZE: usize = 100;
pub const MAX_BATCH_DELAY_MS: u64 = 60_000;

/// 三種配置來源共用的檢查
pub fn validate_mailer_config<C: MailerConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("api_endpoint", config.api_endpoint())?;

    if config.api_key().trim().is_empty() {
        return Err(ConectaError::MissingConfigError {
            field: "api_key".to_string(),
        });
    }
    if config.api_key().contains("${") {
        return Err(ConectaError::InvalidConfigValueError {
            field: "api_key".to_string(),
            value: config.api_key().to_string(),
            reason: "Environment variable placeholder was not resolved".to_string(),
        });
    }

    validate_non_empty_string("from", config.from_address())?;
    validate_positive_number("batch_size", config.batch_size(), 1)?;
    validate_range("batch_size", config.batch_size(), 1, MAX_BATCH_SIZE)?;
    validate_range(
        "batch_delay_ms",
        config.batch_delay().as_millis() as u64,
        0,
        MAX_BATCH_DELAY_MS,
    )?;

    if let Some(timeout) = config.request_timeout() {
        if timeout.is_zero() {
            return Err(ConectaError::InvalidConfigValueError {
                field: "timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }
    }

    Ok(())
}
