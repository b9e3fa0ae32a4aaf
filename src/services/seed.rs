//! Reference-data seeding.
//!
//! Runs at startup after migrations. Every step is idempotent: existing
//! rows are matched by their unique name and left untouched, so repeated
//! startups converge on the same state without duplicating anything.

use std::env;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::errors::DomainError;
use crate::stores::{NewUser, RoleStore, UserStore};
use crate::types::db::{category, permission, role};
use crate::types::internal::permissions;

const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("News", "news"),
    ("Politics", "politics"),
    ("Sports", "sports"),
    ("Opinion", "opinion"),
];

struct RoleDef {
    name: &'static str,
    description: &'static str,
    permissions: Vec<&'static str>,
}

fn role_definitions() -> Vec<RoleDef> {
    vec![
        RoleDef {
            name: "admin",
            description: "Full administrative access",
            permissions: permissions::catalog().iter().map(|p| p.name).collect(),
        },
        RoleDef {
            name: "editor",
            description: "Editorial review and site curation",
            permissions: vec![
                permissions::ARTICLE_READ,
                permissions::ARTICLE_UPDATE,
                permissions::ARTICLE_DELETE,
                permissions::ARTICLE_APPROVE,
                permissions::CATEGORY_MANAGE,
                permissions::TAG_MANAGE,
                permissions::MEDIA_MANAGE,
                permissions::COMMENT_MANAGE,
                permissions::DASHBOARD_VIEW,
            ],
        },
        RoleDef {
            name: "journalist",
            description: "Article authoring",
            permissions: permissions::journalist_permissions().to_vec(),
        },
    ]
}

async fn ensure_permission(
    db: &DatabaseConnection,
    def: &permissions::PermissionDef,
) -> Result<permission::Model, DomainError> {
    let existing = permission::Entity::find()
        .filter(permission::Column::Name.eq(def.name))
        .one(db)
        .await
        .map_err(|e| DomainError::database("find permission", e))?;
    if let Some(model) = existing {
        return Ok(model);
    }

    let active = permission::ActiveModel {
        name: Set(def.name.to_string()),
        resource: Set(def.resource.to_string()),
        action: Set(def.action.to_string()),
        description: Set(Some(def.description.to_string())),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    };
    active
        .insert(db)
        .await
        .map_err(|e| DomainError::database("insert permission", e))
}

async fn ensure_role(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<role::Model, DomainError> {
    let existing = role::Entity::find()
        .filter(role::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| DomainError::database("find role", e))?;
    if let Some(model) = existing {
        return Ok(model);
    }

    let active = role::ActiveModel {
        name: Set(name.to_string()),
        description: Set(Some(description.to_string())),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    };
    active
        .insert(db)
        .await
        .map_err(|e| DomainError::database("insert role", e))
}

async fn ensure_role_permission(
    db: &DatabaseConnection,
    role_id: i32,
    permission_id: i32,
) -> Result<(), DomainError> {
    use crate::types::db::role_permission;
    use sea_orm::sea_query::OnConflict;
    use sea_orm::DbErr;

    let edge = role_permission::ActiveModel {
        role_id: Set(role_id),
        permission_id: Set(permission_id),
    };
    let result = role_permission::Entity::insert(edge)
        .on_conflict(
            OnConflict::columns([
                role_permission::Column::RoleId,
                role_permission::Column::PermissionId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(db)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(DomainError::database("link role permission", e)),
    }
}

/// Seed the permission catalog, the built-in roles and their permission
/// grants, and optionally a bootstrap administrator account configured
/// through `ADMIN_USERNAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD`.
pub async fn seed(
    db: &DatabaseConnection,
    user_store: &UserStore,
    role_store: &RoleStore,
) -> Result<(), DomainError> {
    for def in permissions::catalog() {
        ensure_permission(db, def).await?;
    }

    for role_def in role_definitions() {
        let role = ensure_role(db, role_def.name, role_def.description).await?;
        for perm_name in &role_def.permissions {
            let perm = permission::Entity::find()
                .filter(permission::Column::Name.eq(*perm_name))
                .one(db)
                .await
                .map_err(|e| DomainError::database("find permission", e))?
                .ok_or_else(|| DomainError::not_found("Permission"))?;
            ensure_role_permission(db, role.id, perm.id).await?;
        }
    }

    for (name, slug) in DEFAULT_CATEGORIES {
        ensure_category(db, name, slug).await?;
    }

    seed_admin_account(user_store, role_store).await?;

    info!("reference data seeded");
    Ok(())
}

async fn ensure_category(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<(), DomainError> {
    let existing = category::Entity::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(|e| DomainError::database("find category", e))?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now().timestamp();
    let active = category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        description: Set(None),
        is_enabled: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    active
        .insert(db)
        .await
        .map_err(|e| DomainError::database("insert category", e))?;
    Ok(())
}

async fn seed_admin_account(
    user_store: &UserStore,
    role_store: &RoleStore,
) -> Result<(), DomainError> {
    let (Ok(username), Ok(email), Ok(password)) = (
        env::var("ADMIN_USERNAME"),
        env::var("ADMIN_EMAIL"),
        env::var("ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    if user_store.find_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let admin = user_store
        .create_user(NewUser {
            username,
            email,
            password,
            display_name: Some("Administrator".to_string()),
        })
        .await?;

    let role = role_store
        .find_role_by_name("admin")
        .await?
        .ok_or_else(|| DomainError::not_found("Role"))?;
    role_store.grant_role(admin.id, role.id, admin.id).await?;

    info!(user_id = admin.id, "bootstrap administrator created");
    Ok(())
}
