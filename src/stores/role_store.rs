use std::collections::HashSet;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::errors::DomainError;
use crate::types::db::{permission, role, role_permission, user_role};

/// Storage for the role/permission model: role membership and the derived
/// per-user permission set.
#[derive(Debug, Clone)]
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<role::Model>, DomainError> {
        role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find role by name", e))
    }

    /// Role names held by a user, ordered by role id.
    pub async fn roles_for_user(&self, user_id: i32) -> Result<Vec<String>, DomainError> {
        let memberships = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load role memberships", e))?;

        let role_ids: Vec<i32> = memberships.iter().map(|m| m.role_id).collect();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load roles", e))?;

        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    /// Union of the permission names granted through every role the user
    /// holds. Duplicates across roles collapse in the set.
    pub async fn permissions_for_user(
        &self,
        user_id: i32,
    ) -> Result<HashSet<String>, DomainError> {
        let memberships = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load role memberships", e))?;

        let role_ids: Vec<i32> = memberships.iter().map(|m| m.role_id).collect();
        if role_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let edges = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.is_in(role_ids))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load role permissions", e))?;

        let permission_ids: HashSet<i32> = edges.into_iter().map(|e| e.permission_id).collect();
        if permission_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let permissions = permission::Entity::find()
            .filter(permission::Column::Id.is_in(permission_ids))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load permissions", e))?;

        Ok(permissions.into_iter().map(|p| p.name).collect())
    }

    pub async fn permissions_for_role(
        &self,
        role_id: i32,
    ) -> Result<HashSet<String>, DomainError> {
        let edges = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.eq(role_id))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load role permissions", e))?;

        let permission_ids: Vec<i32> = edges.into_iter().map(|e| e.permission_id).collect();
        if permission_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let permissions = permission::Entity::find()
            .filter(permission::Column::Id.is_in(permission_ids))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("load permissions", e))?;

        Ok(permissions.into_iter().map(|p| p.name).collect())
    }

    /// Grant a role to a user. Granting an already-held role is a no-op.
    pub async fn grant_role(
        &self,
        user_id: i32,
        role_id: i32,
        granted_by: i32,
    ) -> Result<(), DomainError> {
        let membership = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            granted_by: Set(Some(granted_by)),
            granted_at: Set(Utc::now().timestamp()),
        };

        let result = user_role::Entity::insert(membership)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(DomainError::database("grant role", e)),
        }
    }

    /// Revoke a role from a user. Revoking a role the user does not hold is
    /// a no-op.
    pub async fn revoke_role(&self, user_id: i32, role_id: i32) -> Result<(), DomainError> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("revoke role", e))?;
        Ok(())
    }
}
