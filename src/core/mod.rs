pub mod mailer;
pub mod rut;

pub use crate::domain::model::{BatchReport, EmailMessage, RecipientResult, Rut, SendOutcome};
pub use crate::domain::ports::{EmailSender, MailerConfigProvider};
pub use crate::utils::error::Result;
