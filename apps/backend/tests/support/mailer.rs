//! Mailer double that records what would have been sent.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use minutes::mail::{MailError, MailMessage, Mailer};

#[derive(Debug, Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail: bool,
}

impl CapturingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A mailer whose transport always fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    fn from_address(&self) -> &str {
        "no-reply@minutes.test"
    }

    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
