use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::DomainError;
use crate::types::internal::{AdminClaims, UserClaims};

/// Issues and verifies the two token kinds: user access tokens signed with
/// the general secret and administrative tokens signed with the
/// administrative secret.
///
/// When no administrative secret is configured, admin verification falls back
/// to the general secret. A token that fails admin verification is never
/// retried as a user token and vice versa; scheme selection happens in the
/// authorization engine.
#[derive(Clone)]
pub struct TokenService {
    jwt_secret: String,
    admin_jwt_secret: Option<String>,
    expiration_minutes: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("admin_jwt_secret", &self.admin_jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl TokenService {
    pub fn new(
        jwt_secret: String,
        admin_jwt_secret: Option<String>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            jwt_secret,
            admin_jwt_secret,
            expiration_minutes,
        }
    }

    fn admin_secret(&self) -> &str {
        self.admin_jwt_secret.as_deref().unwrap_or(&self.jwt_secret)
    }

    /// Issue a user access token. Returns the token and its expiry timestamp.
    pub fn issue_user_token(&self, user_id: i32) -> Result<(String, i64), DomainError> {
        let now = Utc::now().timestamp();
        let exp = now + self.expiration_minutes * 60;
        let claims = UserClaims {
            sub: user_id.to_string(),
            iat: now,
            exp,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::crypto("sign user token", e.to_string()))?;

        Ok((token, exp))
    }

    /// Verify a user access token and extract the subject user id.
    pub fn verify_user_token(&self, token: &str) -> Result<i32, DomainError> {
        let data = decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::Unauthorized)?;

        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| DomainError::Unauthorized)
    }

    pub fn issue_admin_token(&self) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            token_type: "admin".to_string(),
            is_admin: true,
            iat: now,
            exp: now + self.expiration_minutes * 60,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.admin_secret().as_bytes()),
        )
        .map_err(|e| DomainError::crypto("sign admin token", e.to_string()))
    }

    /// Verify an administrative token. The signature must validate against
    /// the administrative secret and the payload must assert both the admin
    /// token type and the admin flag.
    pub fn verify_admin_token(&self, token: &str) -> Result<(), DomainError> {
        let data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.admin_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::Unauthorized)?;

        if data.claims.token_type == "admin" && data.claims.is_admin {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
