use tracing::{info, warn};

use crate::errors::DomainError;
use crate::services::audit_logger;
use crate::services::token_service::TokenService;
use crate::stores::{AuditStore, ExternalIdentity, NewUser, RoleStore, UserStore};
use crate::types::db::user;
use crate::types::internal::{Principal, UserPrincipal};

/// Bearer values that count as "no credential presented". Clients have been
/// observed sending the literal strings, so they are treated as absent rather
/// than as tokens that fail verification.
const CREDENTIAL_SENTINELS: [&str; 3] = ["", "null", "undefined"];

/// Registration, login and request-principal resolution.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_store: UserStore,
    role_store: RoleStore,
    audit_store: AuditStore,
    token_service: TokenService,
    allow_anonymous_bypass: bool,
}

impl AuthService {
    pub fn new(
        user_store: UserStore,
        role_store: RoleStore,
        audit_store: AuditStore,
        token_service: TokenService,
        allow_anonymous_bypass: bool,
    ) -> Self {
        if allow_anonymous_bypass {
            warn!(
                "anonymous admin bypass is ENABLED; requests without a credential \
                 resolve to a full administrative principal"
            );
        }
        Self {
            user_store,
            role_store,
            audit_store,
            token_service,
            allow_anonymous_bypass,
        }
    }

    pub async fn register(&self, new_user: NewUser) -> Result<user::Model, DomainError> {
        if new_user.username.trim().len() < 3 {
            return Err(DomainError::validation(
                "Username must be at least 3 characters",
            ));
        }
        if !new_user.email.contains('@') {
            return Err(DomainError::validation("Invalid email address"));
        }
        if new_user.password.len() < 8 {
            return Err(DomainError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let user = self.user_store.create_user(new_user).await?;
        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Credential login. Returns the issued token and its expiry.
    ///
    /// Failures are indistinguishable to the caller whether the identifier
    /// was unknown or the password wrong. A locked account is reported as
    /// locked even for a correct password; the lock must expire first.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(String, i64, user::Model), DomainError> {
        let Some(user) = self.user_store.find_by_identifier(identifier).await? else {
            audit_logger::log_login_failure(&self.audit_store, None, identifier).await;
            return Err(DomainError::Unauthorized);
        };

        if self.user_store.is_locked(&user).await? {
            let until = user.locked_until.unwrap_or_default();
            return Err(DomainError::AccountLocked { until });
        }

        if user.is_suspended || !user.is_active {
            audit_logger::log_login_failure(&self.audit_store, Some(user.id), identifier).await;
            return Err(DomainError::forbidden("Account is not active"));
        }

        if !self.user_store.verify_credential(&user, password).await? {
            audit_logger::log_login_failure(&self.audit_store, Some(user.id), identifier).await;

            let tripped = self.user_store.record_failed_login(user.id).await?;
            if tripped {
                let until = self
                    .user_store
                    .find_by_id(user.id)
                    .await?
                    .and_then(|u| u.locked_until)
                    .unwrap_or_default();
                warn!(user_id = user.id, locked_until = until, "account locked out");
                audit_logger::log_account_locked(&self.audit_store, user.id, until).await;
                return Err(DomainError::AccountLocked { until });
            }
            return Err(DomainError::Unauthorized);
        }

        self.user_store.reset_failed_logins(user.id).await?;
        audit_logger::log_login_success(&self.audit_store, user.id).await;

        let (token, expires_at) = self.token_service.issue_user_token(user.id)?;
        info!(user_id = user.id, "login succeeded");
        Ok((token, expires_at, user))
    }

    /// Login or registration through an external identity provider. The
    /// identity is resolved to a local account (matching, linking or
    /// creating one) and a regular user token is issued.
    pub async fn login_external(
        &self,
        identity: ExternalIdentity,
    ) -> Result<(String, i64, user::Model), DomainError> {
        let user = self
            .user_store
            .find_or_link_external_identity(identity)
            .await?;

        if user.is_suspended || !user.is_active {
            return Err(DomainError::forbidden("Account is not active"));
        }

        audit_logger::log_login_success(&self.audit_store, user.id).await;
        let (token, expires_at) = self.token_service.issue_user_token(user.id)?;
        Ok((token, expires_at, user))
    }

    /// Resolve the request principal from an optional bearer credential.
    ///
    /// Resolution order: absent credential (or a known sentinel value) is
    /// either the bypass principal or a hard failure depending on
    /// configuration; then the administrative token scheme; then the user
    /// token scheme. Anything else fails closed.
    pub async fn resolve_principal(
        &self,
        bearer: Option<&str>,
    ) -> Result<Principal, DomainError> {
        let token = match bearer {
            Some(value) if !CREDENTIAL_SENTINELS.contains(&value) => value,
            _ => {
                if self.allow_anonymous_bypass {
                    warn!("resolving anonymous request to the bypass administrative principal");
                    return Ok(Principal::BypassAdmin);
                }
                return Err(DomainError::Unauthorized);
            }
        };

        if self.token_service.verify_admin_token(token).is_ok() {
            return Ok(Principal::TokenAdmin);
        }

        let user_id = self.token_service.verify_user_token(token)?;
        let user = self
            .user_store
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if user.is_suspended || !user.is_active {
            return Err(DomainError::Unauthorized);
        }

        let roles = self.role_store.roles_for_user(user.id).await?;
        let permissions = self.role_store.permissions_for_user(user.id).await?;

        Ok(Principal::User(UserPrincipal {
            id: user.id,
            username: user.username,
            email: user.email,
            is_journalist: user.is_journalist,
            roles,
            permissions,
        }))
    }

    /// Full profile of the user behind a principal. Administrative
    /// principals carry no profile.
    pub async fn user_profile(&self, principal: &Principal) -> Result<user::Model, DomainError> {
        match principal {
            Principal::User(user) => self
                .user_store
                .find_by_id(user.id)
                .await?
                .ok_or_else(|| DomainError::not_found("User")),
            Principal::BypassAdmin | Principal::TokenAdmin => Err(DomainError::forbidden(
                "Administrative tokens have no user profile",
            )),
        }
    }

    pub async fn update_profile(
        &self,
        principal: &Principal,
        display_name: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<user::Model, DomainError> {
        match principal {
            Principal::User(user) => {
                self.user_store
                    .update_profile(user.id, display_name, bio, avatar_url)
                    .await
            }
            Principal::BypassAdmin | Principal::TokenAdmin => Err(DomainError::forbidden(
                "Administrative tokens have no user profile",
            )),
        }
    }

    /// Like [`resolve_principal`](Self::resolve_principal) but an invalid or
    /// absent credential degrades to no principal instead of failing the
    /// request. Storage failures still propagate.
    pub async fn optional_principal(
        &self,
        bearer: Option<&str>,
    ) -> Result<Option<Principal>, DomainError> {
        match self.resolve_principal(bearer).await {
            Ok(principal) => Ok(Some(principal)),
            Err(DomainError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
