use crate::domain::model::EmailMessage;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 外部寄信能力：成功時回傳服務商的 message id
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<String>;
}

pub trait MailerConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn from_address(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn batch_delay(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
}
