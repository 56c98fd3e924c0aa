use argon2::Params;
use jsonwebtoken::Algorithm;

/// Access tokens are valid for exactly 24 hours after issuance.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Configuration for token signing and password hashing
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret used to sign and verify access tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HS256)
    pub algorithm: Algorithm,
    /// Cost parameters for argon2id password hashes
    pub password_params: Params,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given signing secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            password_params: Params::default(),
        }
    }

    pub fn with_password_params(mut self, params: Params) -> Self {
        self.password_params = params;
        self
    }

    /// Cheap hashing parameters so test suites stay fast.
    pub fn for_tests() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self::new(b"test_secret_for_minutes_backend".to_vec()).with_password_params(params)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
