use crate::adapters::DEFAULT_API_ENDPOINT;
use crate::config::{validate_mailer_config, DEFAULT_FROM_ADDRESS};
use crate::core::mailer::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::core::MailerConfigProvider;
use crate::utils::error::{ConectaError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// serverless 環境下從環境變數讀取的配置
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub from_address: String,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
    pub timeout_seconds: Option<u64>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 透過任意查詢函式建立，測試時不必動到行程環境變數
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_endpoint: lookup("RESEND_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            api_key: lookup("RESEND_API_KEY").ok_or_else(|| ConectaError::ConfigError {
                message: "RESEND_API_KEY environment variable is required".to_string(),
            })?,
            from_address: lookup("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            batch_size: parse_var(&lookup, "EMAIL_BATCH_SIZE")?.unwrap_or(DEFAULT_BATCH_SIZE),
            batch_delay_ms: parse_var(&lookup, "EMAIL_BATCH_DELAY_MS")?
                .unwrap_or(DEFAULT_BATCH_DELAY.as_millis() as u64),
            timeout_seconds: parse_var(&lookup, "EMAIL_TIMEOUT_SECONDS")?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConectaError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl MailerConfigProvider for LambdaConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn from_address(&self) -> &str {
        &self.from_address
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_mailer_config(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = LambdaConfig::from_lookup(lookup_from(&[("RESEND_API_KEY", "re_123")])).unwrap();

        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.from_address, DEFAULT_FROM_ADDRESS);
        assert_eq!(config.batch_size(), 50);
        assert_eq!(config.batch_delay(), Duration::from_millis(100));
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key() {
        let err = LambdaConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConectaError::ConfigError { .. }));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            ("RESEND_API_KEY", "re_123"),
            ("EMAIL_BATCH_SIZE", "20"),
            ("EMAIL_BATCH_DELAY_MS", "250"),
            ("EMAIL_TIMEOUT_SECONDS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.batch_size(), 20);
        assert_eq!(config.batch_delay(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));

        let err = LambdaConfig::from_lookup(lookup_from(&[
            ("RESEND_API_KEY", "re_123"),
            ("EMAIL_BATCH_SIZE", "fifty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConectaError::InvalidConfigValueError { field, .. } if field == "EMAIL_BATCH_SIZE"));
    }

    #[test]
    fn test_validation_rejects_out_of_range_batch() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            ("RESEND_API_KEY", "re_123"),
            ("EMAIL_BATCH_SIZE", "0"),
        ]))
        .unwrap();
        match config.validate().unwrap_err() {
            ConectaError::InvalidConfigValueError { field, reason, .. } => {
                assert_eq!(field, "batch_size");
                assert_eq!(reason, "Value must be at least 1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
