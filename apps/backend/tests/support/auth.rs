//! JWT token generation helpers for tests

use std::time::{Duration, SystemTime};

use minutes::auth::jwt::mint_access_token;
use minutes::state::security_config::SecurityConfig;

/// Mint a bearer token for the given sub and email
pub fn mint_test_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    mint_access_token(sub, email, SystemTime::now(), sec).expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix
pub fn bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, email, sec))
}

/// Token issued 25 hours ago, one hour past its 24 hour lifetime
pub fn mint_expired_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let past_time = SystemTime::now()
        .checked_sub(Duration::from_secs(25 * 60 * 60))
        .unwrap();
    mint_access_token(sub, email, past_time, sec).expect("should mint expired token successfully")
}
