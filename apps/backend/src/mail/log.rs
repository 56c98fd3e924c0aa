use async_trait::async_trait;
use tracing::info;

use super::{MailError, MailMessage, Mailer};
use crate::logging::pii::Redacted;

/// Logs messages instead of delivering them. Used when no mail API is set.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    fn from_address(&self) -> &str {
        &self.from
    }

    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        info!(
            to = %Redacted(&message.to),
            subject = %message.subject,
            body_len = message.text.len(),
            "mail not delivered: no mail API configured"
        );
        Ok(())
    }
}
