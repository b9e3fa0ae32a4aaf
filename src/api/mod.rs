pub mod admin_api;
pub mod article_api;
pub mod auth_api;
pub mod health;

pub use admin_api::AdminApi;
pub use article_api::ArticleApi;
pub use auth_api::AuthApi;
pub use health::HealthApi;

use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

impl BearerAuth {
    pub fn token(&self) -> &str {
        &self.0.token
    }
}

/// Extract the bearer token from a raw `Authorization` header value, for
/// endpoints where anonymous access degrades rather than fails. The scheme
/// prefix is stripped; a bare value passes through so sentinel handling in
/// the resolver still applies.
pub fn optional_token(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

#[cfg(test)]
mod tests {
    use super::optional_token;

    #[test]
    fn test_optional_token_strips_the_bearer_prefix() {
        assert_eq!(optional_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(optional_token(Some("abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_optional_token_passes_absence_and_sentinels_through() {
        assert_eq!(optional_token(None), None);
        assert_eq!(optional_token(Some("")), Some(""));
        assert_eq!(optional_token(Some("null")), Some("null"));
    }
}
