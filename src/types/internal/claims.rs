use serde::{Deserialize, Serialize};

/// Claims carried by a user-scoped access token, signed with the general
/// secret. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims asserted by an administrative token, signed with the administrative
/// secret. Field names follow the wire format the admin panel issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}
