use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::DomainError;
use crate::types::db::audit_log;

/// One security-relevant event to be recorded.
#[derive(Debug)]
pub struct AuditEntry {
    pub user_id: Option<i32>,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<i32>,
    pub details: Option<serde_json::Value>,
}

/// Append-only store for the audit trail.
#[derive(Debug, Clone)]
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        let active = audit_log::ActiveModel {
            user_id: Set(entry.user_id),
            action: Set(entry.action),
            resource: Set(entry.resource),
            resource_id: Set(entry.resource_id),
            details: Set(entry.details.map(|d| d.to_string())),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        active
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::database("record audit entry", e))?;
        Ok(())
    }

    pub async fn list_by_action(
        &self,
        action: &str,
    ) -> Result<Vec<audit_log::Model>, DomainError> {
        audit_log::Entity::find()
            .filter(audit_log::Column::Action.eq(action))
            .order_by_asc(audit_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("list audit entries", e))
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<audit_log::Model>, DomainError> {
        audit_log::Entity::find()
            .filter(audit_log::Column::UserId.eq(user_id))
            .order_by_asc(audit_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("list audit entries for user", e))
    }
}
