pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::ResendClient;
pub use config::{lambda::LambdaConfig, toml_config::TomlConfig};
pub use core::mailer::{BatchMailer, BatchPolicy};
pub use domain::model::{BatchReport, EmailMessage, RecipientResult, Rut, SendOutcome};
pub use domain::ports::{EmailSender, MailerConfigProvider};
pub use utils::error::{ConectaError, Result};
