use crate::adapters::DEFAULT_API_ENDPOINT;
use crate::config::{validate_mailer_config, DEFAULT_FROM_ADDRESS};
use crate::core::mailer::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::core::MailerConfigProvider;
use crate::utils::error::{ConectaError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static placeholder pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub batch: Option<BatchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub api_key: String,
    pub from: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub size: Option<usize>,
    pub delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConectaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConectaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESEND_API_KEY})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl MailerConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.provider
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn api_key(&self) -> &str {
        &self.provider.api_key
    }

    fn from_address(&self) -> &str {
        self.provider.from.as_deref().unwrap_or(DEFAULT_FROM_ADDRESS)
    }

    fn batch_size(&self) -> usize {
        self.batch
            .as_ref()
            .and_then(|b| b.size)
            .unwrap_or(DEFAULT_BATCH_SIZE)
    }

    fn batch_delay(&self) -> Duration {
        self.batch
            .as_ref()
            .and_then(|b| b.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BATCH_DELAY)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.provider.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_mailer_config(self)
    }
}
