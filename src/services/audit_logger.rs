//! Audit trail helpers.
//!
//! Each helper records one well-known event shape. Audit failures are logged
//! and swallowed so bookkeeping never blocks the operation being audited.

use serde_json::json;

use crate::stores::{AuditEntry, AuditStore};

pub const ACTION_LOGIN_SUCCESS: &str = "login_success";
pub const ACTION_LOGIN_FAILURE: &str = "login_failure";
pub const ACTION_ACCOUNT_LOCKED: &str = "account_locked";
pub const ACTION_ROLE_GRANTED: &str = "role_granted";
pub const ACTION_ROLE_REVOKED: &str = "role_revoked";
pub const ACTION_JOURNALIST_GRANTED: &str = "journalist_granted";
pub const ACTION_JOURNALIST_REVOKED: &str = "journalist_revoked";
pub const ACTION_USER_SUSPENDED: &str = "user_suspended";
pub const ACTION_USER_ACTIVATED: &str = "user_activated";

async fn record(store: &AuditStore, entry: AuditEntry) {
    if let Err(e) = store.record(entry).await {
        tracing::error!(error = %e, "failed to record audit entry");
    }
}

pub async fn log_login_success(store: &AuditStore, user_id: i32) {
    record(
        store,
        AuditEntry {
            user_id: Some(user_id),
            action: ACTION_LOGIN_SUCCESS.to_string(),
            resource: "auth".to_string(),
            resource_id: None,
            details: None,
        },
    )
    .await;
}

/// `user_id` is None when the identifier matched no account.
pub async fn log_login_failure(store: &AuditStore, user_id: Option<i32>, identifier: &str) {
    record(
        store,
        AuditEntry {
            user_id,
            action: ACTION_LOGIN_FAILURE.to_string(),
            resource: "auth".to_string(),
            resource_id: None,
            details: Some(json!({ "identifier": identifier })),
        },
    )
    .await;
}

pub async fn log_account_locked(store: &AuditStore, user_id: i32, locked_until: i64) {
    record(
        store,
        AuditEntry {
            user_id: Some(user_id),
            action: ACTION_ACCOUNT_LOCKED.to_string(),
            resource: "auth".to_string(),
            resource_id: None,
            details: Some(json!({ "locked_until": locked_until })),
        },
    )
    .await;
}

pub async fn log_role_granted(store: &AuditStore, actor_id: i32, target_id: i32, role: &str) {
    record(
        store,
        AuditEntry {
            user_id: Some(actor_id),
            action: ACTION_ROLE_GRANTED.to_string(),
            resource: "user".to_string(),
            resource_id: Some(target_id),
            details: Some(json!({ "role": role })),
        },
    )
    .await;
}

pub async fn log_role_revoked(store: &AuditStore, actor_id: i32, target_id: i32, role: &str) {
    record(
        store,
        AuditEntry {
            user_id: Some(actor_id),
            action: ACTION_ROLE_REVOKED.to_string(),
            resource: "user".to_string(),
            resource_id: Some(target_id),
            details: Some(json!({ "role": role })),
        },
    )
    .await;
}

pub async fn log_journalist_change(
    store: &AuditStore,
    actor_id: i32,
    target_id: i32,
    granted: bool,
) {
    let action = if granted {
        ACTION_JOURNALIST_GRANTED
    } else {
        ACTION_JOURNALIST_REVOKED
    };
    record(
        store,
        AuditEntry {
            user_id: Some(actor_id),
            action: action.to_string(),
            resource: "user".to_string(),
            resource_id: Some(target_id),
            details: None,
        },
    )
    .await;
}

pub async fn log_suspension_change(
    store: &AuditStore,
    actor_id: i32,
    target_id: i32,
    suspended: bool,
) {
    let action = if suspended {
        ACTION_USER_SUSPENDED
    } else {
        ACTION_USER_ACTIVATED
    };
    record(
        store,
        AuditEntry {
            user_id: Some(actor_id),
            action: action.to_string(),
            resource: "user".to_string(),
            resource_id: Some(target_id),
            details: None,
        },
    )
    .await;
}
