use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::AuthService;
use crate::stores::NewUser;
use crate::types::dto::{
    LoginRequest, RegisterRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};

/// Registration, login and identity endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let body = body.0;
        let user = self
            .auth_service
            .register(NewUser {
                username: body.username,
                email: body.email,
                password: body.password,
                display_name: body.display_name,
            })
            .await?;
        Ok(Json(user.into()))
    }

    /// Login with a username or email and password
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let (token, expires_at, _user) = self
            .auth_service
            .login(&body.identifier, &body.password)
            .await?;
        Ok(Json(TokenResponse { token, expires_at }))
    }

    /// Return the authenticated user's profile
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let user = self.auth_service.user_profile(&principal).await?;
        Ok(Json(user.into()))
    }

    /// Update the authenticated user's profile
    #[oai(path = "/me", method = "put", tag = "AuthTags::Authentication")]
    async fn update_me(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let body = body.0;
        let user = self
            .auth_service
            .update_profile(&principal, body.display_name, body.bio, body.avatar_url)
            .await?;
        Ok(Json(user.into()))
    }
}
