use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::{AdminService, AuthService};
use crate::types::dto::{
    JournalistAccessRequest, SuspensionRequest, UserListResponse, UserResponse,
};

/// Administrative user management endpoints
pub struct AdminApi {
    auth_service: Arc<AuthService>,
    admin_service: Arc<AdminService>,
}

impl AdminApi {
    pub fn new(auth_service: Arc<AuthService>, admin_service: Arc<AdminService>) -> Self {
        Self {
            auth_service,
            admin_service,
        }
    }
}

#[derive(Tags)]
enum AdminTags {
    /// User management
    Administration,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all user accounts
    #[oai(path = "/users", method = "get", tag = "AdminTags::Administration")]
    async fn list_users(&self, auth: BearerAuth) -> Result<Json<UserListResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let users = self.admin_service.list_users(&principal).await?;
        Ok(Json(UserListResponse {
            users: users.into_iter().map(Into::into).collect(),
        }))
    }

    /// Grant a role to a user
    #[oai(
        path = "/users/:id/roles/:role",
        method = "post",
        tag = "AdminTags::Administration"
    )]
    async fn grant_role(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        role: Path<String>,
    ) -> Result<(), ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        self.admin_service
            .grant_role(&principal, id.0, &role.0)
            .await?;
        Ok(())
    }

    /// Revoke a role from a user
    #[oai(
        path = "/users/:id/roles/:role",
        method = "delete",
        tag = "AdminTags::Administration"
    )]
    async fn revoke_role(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        role: Path<String>,
    ) -> Result<(), ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        self.admin_service
            .revoke_role(&principal, id.0, &role.0)
            .await?;
        Ok(())
    }

    /// Grant or revoke journalist access
    #[oai(
        path = "/users/:id/journalist",
        method = "put",
        tag = "AdminTags::Administration"
    )]
    async fn set_journalist(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<JournalistAccessRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let user = self
            .admin_service
            .set_journalist_access(&principal, id.0, body.granted)
            .await?;
        Ok(Json(user.into()))
    }

    /// Suspend or reactivate an account
    #[oai(
        path = "/users/:id/suspension",
        method = "put",
        tag = "AdminTags::Administration"
    )]
    async fn set_suspension(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<SuspensionRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let user = self
            .admin_service
            .set_suspended(&principal, id.0, body.suspended)
            .await?;
        Ok(Json(user.into()))
    }
}
