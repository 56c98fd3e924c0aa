use super::opt_var;

pub const DEFAULT_MAIL_FROM: &str = "no-reply@minutes.local";

/// Outbound mail settings.
///
/// With `MAIL_API_URL` set, mail is posted to that HTTP API; without it,
/// messages are only logged.
#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: opt_var("MAIL_API_URL"),
            api_key: opt_var("MAIL_API_KEY"),
            from: opt_var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            from: DEFAULT_MAIL_FROM.to_string(),
        }
    }
}
