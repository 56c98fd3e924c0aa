//! Outbound mail.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::mail::MailConfig;
use crate::error::AppError;

mod http;
mod log;

pub use http::HttpMailer;
pub use log::LogMailer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport failed: {0}")]
    Transport(String),
    #[error("mail API rejected message with status {status}")]
    Rejected { status: u16 },
}

#[async_trait]
pub trait Mailer: Send + Sync + Debug {
    /// Sender address used when composing messages.
    fn from_address(&self) -> &str;

    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// `HttpMailer` when a mail API is configured, `LogMailer` otherwise.
pub fn mailer_from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match &config.api_url {
        Some(url) => {
            let mailer = HttpMailer::new(url.clone(), config.api_key.clone(), config.from.clone())?;
            Ok(Arc::new(mailer))
        }
        None => Ok(Arc::new(LogMailer::new(config.from.clone()))),
    }
}
