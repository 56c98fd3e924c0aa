use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, warn};

use super::{MailError, MailMessage, Mailer};
use crate::error::AppError;
use crate::logging::pii::Redacted;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts each message as JSON to a mail API endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(url: String, api_key: Option<String>, from: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build mail HTTP client: {e}")))?;
        Ok(Self {
            client,
            url,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    fn from_address(&self) -> &str {
        &self.from
    }

    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        debug!(to = %Redacted(&message.to), subject = %message.subject, "posting mail");

        let mut request = self
            .client
            .post(&self.url)
            .json(&message);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), to = %Redacted(&message.to), "mail API rejected message");
            return Err(MailError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
