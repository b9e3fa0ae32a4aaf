use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Security configuration loaded from the environment.
#[derive(Clone)]
pub struct SecurityConfig {
    /// General signing secret for user-scoped tokens.
    pub jwt_secret: String,
    /// Distinct signing secret for administrative tokens. When unset, admin
    /// token verification falls back to the general secret.
    pub admin_jwt_secret: Option<String>,
    /// Secret mixed into password hashes as the Argon2 secret parameter.
    pub password_pepper: String,
    pub token_expiration_minutes: i64,
    pub lockout_threshold: i32,
    pub lockout_duration_secs: i64,
    /// DANGER: when enabled, a request with no credential resolves to a
    /// super-privileged bypass principal. This reproduces a historical
    /// development shortcut and must stay off in production; the default
    /// is off, and enabling it requires the explicit environment flag
    /// `ALLOW_ANONYMOUS_ADMIN_BYPASS=true`.
    pub allow_anonymous_bypass: bool,
}

impl SecurityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let admin_jwt_secret = env::var("ADMIN_JWT_SECRET").ok();

        let password_pepper = env::var("PASSWORD_PEPPER")
            .map_err(|_| ConfigError::MissingVar("PASSWORD_PEPPER"))?;

        let token_expiration_minutes = env::var("TOKEN_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 60);

        let lockout_threshold = env::var("LOCKOUT_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let lockout_duration_secs = env::var("LOCKOUT_DURATION_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15 * 60);

        let allow_anonymous_bypass = env::var("ALLOW_ANONYMOUS_ADMIN_BYPASS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            jwt_secret,
            admin_jwt_secret,
            password_pepper,
            token_expiration_minutes,
            lockout_threshold,
            lockout_duration_secs,
            allow_anonymous_bypass,
        })
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("admin_jwt_secret", &self.admin_jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("password_pepper", &"<redacted>")
            .field("token_expiration_minutes", &self.token_expiration_minutes)
            .field("lockout_threshold", &self.lockout_threshold)
            .field("lockout_duration_secs", &self.lockout_duration_secs)
            .field("allow_anonymous_bypass", &self.allow_anonymous_bypass)
            .finish()
    }
}
