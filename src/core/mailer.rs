use crate::core::{BatchReport, EmailMessage, EmailSender, RecipientResult, SendOutcome};
use crate::utils::error::{ConectaError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);
pub const FALLBACK_SEND_ERROR: &str = "Failed to send email";

/// 分批寄送的節流設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchPolicy {
    pub fn new(batch_size: usize, batch_delay: Duration) -> Result<Self> {
        if batch_size == 0 {
            return Err(ConectaError::InvalidConfigValueError {
                field: "batch_size".to_string(),
                value: batch_size.to_string(),
                reason: "Batch size must be at least 1".to_string(),
            });
        }
        Ok(Self {
            batch_size,
            batch_delay,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

pub struct BatchMailer<S: EmailSender + 'static> {
    sender: Arc<S>,
    from: String,
    policy: BatchPolicy,
}

impl<S: EmailSender + 'static> BatchMailer<S> {
    pub fn new(sender: S, from: impl Into<String>) -> Self {
        Self::with_policy(sender, from, BatchPolicy::default())
    }

    pub fn with_policy(sender: S, from: impl Into<String>, policy: BatchPolicy) -> Self {
        Self {
            sender: Arc::new(sender),
            from: from.into(),
            policy,
        }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// 每個收件人寄一封，分批併發並在批次之間暫停。
    ///
    /// 個別收件人失敗只會記在結果裡；只有輸入不合法或批次協調本身出錯時才回傳 `Err`。
    pub async fn send_batch(
        &self,
        recipients: &[String],
        subject: &str,
        html: &str,
    ) -> Result<BatchReport> {
        if recipients.is_empty() {
            return Err(ConectaError::validation("recipients cannot be empty"));
        }
        if subject.is_empty() {
            return Err(ConectaError::validation("subject cannot be empty"));
        }
        if html.is_empty() {
            return Err(ConectaError::validation("html body cannot be empty"));
        }

        let chunks: Vec<&[String]> = recipients.chunks(self.policy.batch_size).collect();
        let total_batches = chunks.len();
        tracing::info!(
            "📧 Sending to {} recipients in {} batches of up to {}",
            recipients.len(),
            total_batches,
            self.policy.batch_size
        );

        let mut results = Vec::with_capacity(recipients.len());

        for (index, chunk) in chunks.into_iter().enumerate() {
            let chunk_results = self.send_chunk(chunk, subject, html).await?;
            let chunk_sent = chunk_results
                .iter()
                .filter(|r| r.outcome.is_success())
                .count();
            tracing::debug!(
                "📧 Batch {}/{}: {} sent, {} failed",
                index + 1,
                total_batches,
                chunk_sent,
                chunk_results.len() - chunk_sent
            );
            results.extend(chunk_results);

            if index + 1 < total_batches {
                tokio::time::sleep(self.policy.batch_delay).await;
            }
        }

        let report = BatchReport::from_results(results, total_batches);
        if report.failed > 0 {
            tracing::warn!(
                "⚠️ Batch send finished with failures: {} sent, {} failed",
                report.sent,
                report.failed
            );
        } else {
            tracing::info!("✅ Batch send finished: {} sent", report.sent);
        }

        Ok(report)
    }

    /// 同一批全部同時送出，等全部結束後依輸入順序回傳
    async fn send_chunk(
        &self,
        chunk: &[String],
        subject: &str,
        html: &str,
    ) -> Result<Vec<RecipientResult>> {
        let mut tasks = JoinSet::new();

        for (slot, recipient) in chunk.iter().enumerate() {
            let sender = Arc::clone(&self.sender);
            let message = EmailMessage::new(&self.from, recipient, subject, html);

            tasks.spawn(async move {
                let outcome = match sender.send(&message).await {
                    Ok(id) => SendOutcome::Success { id },
                    Err(e) => {
                        let error = match e {
                            ConectaError::SendError { message: reason } if !reason.is_empty() => {
                                reason
                            }
                            ConectaError::SendError { .. } => FALLBACK_SEND_ERROR.to_string(),
                            other => other.to_string(),
                        };
                        tracing::debug!("Send to {:?} failed: {}", message.to, error);
                        SendOutcome::Failure { error }
                    }
                };
                (slot, outcome)
            });
        }

        let mut outcomes: Vec<Option<SendOutcome>> = vec![None; chunk.len()];
        while let Some(joined) = tasks.join_next().await {
            let (slot, outcome) = joined.map_err(|e| ConectaError::InternalError {
                message: format!("send task failed: {}", e),
            })?;
            outcomes[slot] = Some(outcome);
        }

        chunk
            .iter()
            .zip(outcomes)
            .map(|(recipient, outcome)| {
                let outcome = outcome.ok_or_else(|| ConectaError::InternalError {
                    message: format!("no outcome recorded for {}", recipient),
                })?;
                Ok(RecipientResult {
                    recipient: recipient.clone(),
                    outcome,
                })
            })
            .collect()
    }
}
