use tracing::info;

use crate::errors::DomainError;
use crate::services::audit_logger;
use crate::stores::{AuditStore, RoleStore, UserStore};
use crate::types::db::user;
use crate::types::internal::{permissions, Principal};

/// Administrative user management: role grants, journalist access and
/// account suspension. Every operation requires the user-management
/// permission and lands in the audit trail.
#[derive(Debug, Clone)]
pub struct AdminService {
    user_store: UserStore,
    role_store: RoleStore,
    audit_store: AuditStore,
}

impl AdminService {
    pub fn new(user_store: UserStore, role_store: RoleStore, audit_store: AuditStore) -> Self {
        Self {
            user_store,
            role_store,
            audit_store,
        }
    }

    fn require_user_management(&self, principal: &Principal) -> Result<(), DomainError> {
        if principal.has_permission(permissions::USER_MANAGE) {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                "User management permission is required",
            ))
        }
    }

    pub async fn grant_role(
        &self,
        principal: &Principal,
        user_id: i32,
        role_name: &str,
    ) -> Result<(), DomainError> {
        self.require_user_management(principal)?;

        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        let role = self
            .role_store
            .find_role_by_name(role_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Role"))?;

        self.role_store
            .grant_role(user.id, role.id, principal.user_id())
            .await?;
        audit_logger::log_role_granted(&self.audit_store, principal.user_id(), user.id, role_name)
            .await;
        info!(user_id = user.id, role = role_name, "role granted");
        Ok(())
    }

    pub async fn revoke_role(
        &self,
        principal: &Principal,
        user_id: i32,
        role_name: &str,
    ) -> Result<(), DomainError> {
        self.require_user_management(principal)?;

        let role = self
            .role_store
            .find_role_by_name(role_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Role"))?;

        self.role_store.revoke_role(user_id, role.id).await?;
        audit_logger::log_role_revoked(&self.audit_store, principal.user_id(), user_id, role_name)
            .await;
        info!(user_id, role = role_name, "role revoked");
        Ok(())
    }

    /// Grant or revoke journalist access: flips the flag and keeps the
    /// journalist role membership in step with it.
    pub async fn set_journalist_access(
        &self,
        principal: &Principal,
        user_id: i32,
        granted: bool,
    ) -> Result<user::Model, DomainError> {
        self.require_user_management(principal)?;

        let updated = self.user_store.set_journalist(user_id, granted).await?;

        if let Some(role) = self.role_store.find_role_by_name("journalist").await? {
            if granted {
                self.role_store
                    .grant_role(user_id, role.id, principal.user_id())
                    .await?;
            } else {
                self.role_store.revoke_role(user_id, role.id).await?;
            }
        }
        audit_logger::log_journalist_change(
            &self.audit_store,
            principal.user_id(),
            user_id,
            granted,
        )
        .await;
        info!(user_id, granted, "journalist access changed");
        Ok(updated)
    }

    pub async fn set_suspended(
        &self,
        principal: &Principal,
        user_id: i32,
        suspended: bool,
    ) -> Result<user::Model, DomainError> {
        self.require_user_management(principal)?;

        if suspended && user_id == principal.user_id() {
            return Err(DomainError::forbidden("Cannot suspend your own account"));
        }

        let updated = self.user_store.set_suspended(user_id, suspended).await?;
        audit_logger::log_suspension_change(
            &self.audit_store,
            principal.user_id(),
            user_id,
            suspended,
        )
        .await;
        info!(user_id, suspended, "suspension state changed");
        Ok(updated)
    }

    pub async fn list_users(
        &self,
        principal: &Principal,
    ) -> Result<Vec<user::Model>, DomainError> {
        if !principal.has_any_permission(&[permissions::USER_READ, permissions::USER_MANAGE]) {
            return Err(DomainError::forbidden(
                "User read permission is required",
            ));
        }
        self.user_store.list_users().await
    }
}
