#[cfg(feature = "lambda")]
use chrono::{DateTime, Utc};
#[cfg(feature = "lambda")]
use conecta_funerarias::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use conecta_funerarias::{BatchMailer, LambdaConfig, RecipientResult};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub results: Vec<RecipientResult>,
    pub completed_at: DateTime<Utc>,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!(
        "Starting send-marketing-email for {} recipients",
        event.payload.recipients.len()
    );

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let mailer = BatchMailer::from_config(&config)?;
    let report = mailer
        .send_batch(
            &event.payload.recipients,
            &event.payload.subject,
            &event.payload.html,
        )
        .await?;

    tracing::info!(
        "send-marketing-email completed: {} sent, {} failed",
        report.sent,
        report.failed
    );

    Ok(Response {
        success: true,
        sent: report.sent,
        failed: report.failed,
        results: report.results,
        completed_at: report.completed_at,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
