use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use rand_core::OsRng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::errors::DomainError;
use crate::types::db::user;

/// Account lockout policy applied on repeated credential failures.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Consecutive failures at which the account locks.
    pub threshold: i32,
    pub duration_secs: i64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: 5,
            duration_secs: 15 * 60,
        }
    }
}

/// Attributes for creating a credential-backed account.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// An external identity assertion, as delivered by an identity provider.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub provider: String,
    pub subject_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Storage and credential operations for user accounts.
///
/// Password hashing uses Argon2id with a process-wide pepper as the secret
/// parameter; hashing runs on the blocking pool so it never stalls the async
/// runtime.
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
    password_pepper: String,
    lockout: LockoutPolicy,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("password_pepper", &"<redacted>")
            .field("lockout", &self.lockout)
            .finish()
    }
}

impl UserStore {
    pub fn new(db: DatabaseConnection, password_pepper: String, lockout: LockoutPolicy) -> Self {
        Self {
            db,
            password_pepper,
            lockout,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let pepper = self.password_pepper.clone();
        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new_with_secret(
                pepper.as_bytes(),
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                argon2::Params::default(),
            )
            .map_err(|e| DomainError::crypto("configure hasher", e.to_string()))?;

            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| DomainError::crypto("hash password", e.to_string()))
        })
        .await
        .map_err(|e| DomainError::crypto("hash password", e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let pepper = self.password_pepper.clone();
        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new_with_secret(
                pepper.as_bytes(),
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                argon2::Params::default(),
            )
            .map_err(|e| DomainError::crypto("configure hasher", e.to_string()))?;

            let parsed = PasswordHash::new(&hash)
                .map_err(|e| DomainError::crypto("parse stored hash", e.to_string()))?;
            Ok(argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| DomainError::crypto("verify password", e.to_string()))?
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model, DomainError> {
        let password_hash = self.hash_password(new_user.password).await?;
        let now = Utc::now().timestamp();

        let active = user::ActiveModel {
            username: Set(Some(new_user.username)),
            email: Set(new_user.email),
            password_hash: Set(Some(password_hash)),
            display_name: Set(new_user.display_name),
            is_journalist: Set(false),
            is_active: Set(true),
            is_suspended: Set(false),
            failed_login_attempts: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DomainError::validation("Username or email already in use")
            } else {
                DomainError::database("create user", e)
            }
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, DomainError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find user by id", e))
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, DomainError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find user by username", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DomainError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find user by email", e))
    }

    /// Lookup by username or email, whichever matches.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<user::Model>, DomainError> {
        user::Entity::find()
            .filter(
                sea_orm::Condition::any()
                    .add(user::Column::Username.eq(identifier))
                    .add(user::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find user by identifier", e))
    }

    /// Verify a plaintext password against the stored hash. A user without a
    /// stored hash (external-identity-only account) never verifies.
    pub async fn verify_credential(
        &self,
        user: &user::Model,
        password: &str,
    ) -> Result<bool, DomainError> {
        match &user.password_hash {
            Some(hash) => {
                self.verify_password(password.to_string(), hash.clone())
                    .await
            }
            None => Ok(false),
        }
    }

    /// Whether the account is currently locked out. An expired lock is
    /// cleared on observation.
    pub async fn is_locked(&self, user: &user::Model) -> Result<bool, DomainError> {
        let Some(locked_until) = user.locked_until else {
            return Ok(false);
        };
        let now = Utc::now().timestamp();
        if locked_until > now {
            return Ok(true);
        }

        // Lock expired: clear it and reset the counter
        user::Entity::update_many()
            .col_expr(user::Column::LockedUntil, Expr::value(Option::<i64>::None))
            .col_expr(user::Column::FailedLoginAttempts, Expr::value(0))
            .filter(user::Column::Id.eq(user.id))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("clear expired lockout", e))?;
        Ok(false)
    }

    /// Record one failed login attempt. Returns `true` when this failure
    /// tripped the lockout threshold and the account is now locked.
    ///
    /// The increment is a single atomic UPDATE so concurrent failures are
    /// never lost; the lock is only set when the account is not already
    /// locked, so further failures do not extend an active lock.
    pub async fn record_failed_login(&self, user_id: i32) -> Result<bool, DomainError> {
        let now = Utc::now().timestamp();

        user::Entity::update_many()
            .col_expr(
                user::Column::FailedLoginAttempts,
                Expr::col(user::Column::FailedLoginAttempts).add(1),
            )
            .col_expr(user::Column::LastFailedLogin, Expr::value(now))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("record failed login", e))?;

        let locked = user::Entity::update_many()
            .col_expr(
                user::Column::LockedUntil,
                Expr::value(now + self.lockout.duration_secs),
            )
            .filter(user::Column::Id.eq(user_id))
            .filter(user::Column::FailedLoginAttempts.gte(self.lockout.threshold))
            .filter(
                sea_orm::Condition::any()
                    .add(user::Column::LockedUntil.is_null())
                    .add(user::Column::LockedUntil.lte(now)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("apply lockout", e))?;

        Ok(locked.rows_affected > 0)
    }

    /// Clear the failure counter after a successful login.
    pub async fn reset_failed_logins(&self, user_id: i32) -> Result<(), DomainError> {
        user::Entity::update_many()
            .col_expr(user::Column::FailedLoginAttempts, Expr::value(0))
            .col_expr(user::Column::LockedUntil, Expr::value(Option::<i64>::None))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("reset failed logins", e))?;
        Ok(())
    }

    /// Resolve an external identity to a local account.
    ///
    /// Resolution is three-tiered: an exact provider+subject match wins; next
    /// an existing account with the asserted email gets the identity linked;
    /// otherwise a fresh account is created with a username derived from the
    /// email local part and the provider name.
    pub async fn find_or_link_external_identity(
        &self,
        identity: ExternalIdentity,
    ) -> Result<user::Model, DomainError> {
        let existing = user::Entity::find()
            .filter(user::Column::OauthProvider.eq(identity.provider.as_str()))
            .filter(user::Column::OauthId.eq(identity.subject_id.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find external identity", e))?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let now = Utc::now().timestamp();

        if let Some(by_email) = self.find_by_email(&identity.email).await? {
            let needs_avatar = by_email.avatar_url.is_none();
            let mut active: user::ActiveModel = by_email.into();
            active.oauth_provider = Set(Some(identity.provider));
            active.oauth_id = Set(Some(identity.subject_id));
            active.oauth_email = Set(Some(identity.email));
            // Backfill the avatar from the provider; never overwrite one
            // the account already has
            if needs_avatar {
                if let Some(avatar_url) = identity.avatar_url {
                    active.avatar_url = Set(Some(avatar_url));
                }
            }
            active.updated_at = Set(now);
            return active
                .update(&self.db)
                .await
                .map_err(|e| DomainError::database("link external identity", e));
        }

        let local_part = identity.email.split('@').next().unwrap_or("user");
        let username = format!("{}_{}", local_part, identity.provider);

        let active = user::ActiveModel {
            username: Set(Some(username)),
            email: Set(identity.email.clone()),
            password_hash: Set(None),
            display_name: Set(identity.display_name),
            avatar_url: Set(identity.avatar_url),
            oauth_provider: Set(Some(identity.provider)),
            oauth_id: Set(Some(identity.subject_id)),
            oauth_email: Set(Some(identity.email)),
            is_journalist: Set(false),
            is_active: Set(true),
            is_suspended: Set(false),
            failed_login_attempts: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DomainError::conflict("Derived username already in use")
            } else {
                DomainError::database("create external-identity user", e)
            }
        })
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        display_name: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<user::Model, DomainError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let mut active: user::ActiveModel = user.into();
        if let Some(display_name) = display_name {
            active.display_name = Set(Some(display_name));
        }
        if let Some(bio) = bio {
            active.bio = Set(Some(bio));
        }
        if let Some(avatar_url) = avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::database("update profile", e))
    }

    pub async fn update_password(
        &self,
        user_id: i32,
        new_password: String,
    ) -> Result<(), DomainError> {
        let hash = self.hash_password(new_password).await?;
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(Some(hash));
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::database("update password", e))?;
        Ok(())
    }

    pub async fn set_journalist(
        &self,
        user_id: i32,
        is_journalist: bool,
    ) -> Result<user::Model, DomainError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let mut active: user::ActiveModel = user.into();
        active.is_journalist = Set(is_journalist);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::database("set journalist flag", e))
    }

    pub async fn set_suspended(
        &self,
        user_id: i32,
        is_suspended: bool,
    ) -> Result<user::Model, DomainError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let mut active: user::ActiveModel = user.into();
        active.is_suspended = Set(is_suspended);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::database("set suspended flag", e))
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, DomainError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("list users", e))
    }
}
