use poem_openapi::Object;

use crate::types::db::user;

/// Request body for account registration
#[derive(Object, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for credential login. The identifier may be a username or an
/// email address.
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Object, Debug, Default)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Object, Debug)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: i64,
}

/// Public view of a user account. Never carries credential material.
#[derive(Object, Debug)]
pub struct UserResponse {
    pub id: i32,
    pub username: Option<String>,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_journalist: bool,
    pub is_active: bool,
    pub is_suspended: bool,
    pub created_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            bio: model.bio,
            avatar_url: model.avatar_url,
            is_journalist: model.is_journalist,
            is_active: model.is_active,
            is_suspended: model.is_suspended,
            created_at: model.created_at,
        }
    }
}
