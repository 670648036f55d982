use crate::core::mailer::{BatchMailer, BatchPolicy};
use crate::core::{EmailMessage, EmailSender, MailerConfigProvider};
use crate::utils::error::{ConectaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
}

/// Resend 相容的 `/emails` HTTP API
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config<C: MailerConfigProvider>(config: &C) -> Self {
        let client = Self::new(config.api_key(), config.api_endpoint());
        match config.request_timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        tracing::debug!("📡 POST {} to {:?}", self.endpoint, message.to);

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Provider response status: {}", status);

        // 2xx 代表服務商已接受，沒有 id 也算成功
        if status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let id = serde_json::from_str::<SendResponse>(&text)
                .ok()
                .and_then(|body| body.id);
            if id.is_none() {
                tracing::warn!("⚠️ Provider accepted message to {:?} without an id", message.to);
            }
            return Ok(id.unwrap_or_default());
        }

        // 錯誤回應的 body 不一定是 JSON
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_default();

        Err(ConectaError::SendError { message })
    }
}

impl BatchMailer<ResendClient> {
    /// 依配置組出使用 Resend 的批次寄信器
    pub fn from_config<C: MailerConfigProvider>(config: &C) -> Result<Self> {
        let policy = BatchPolicy::new(config.batch_size(), config.batch_delay())?;
        Ok(Self::with_policy(
            ResendClient::from_config(config),
            config.from_address(),
            policy,
        ))
    }
}
