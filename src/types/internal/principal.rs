use std::collections::HashSet;

use crate::types::internal::permissions;

/// User id attributed to the hardcoded administrative principals when an
/// operation needs an acting user (article authorship, role grants). The
/// seeded administrative account occupies this id on a fresh database.
///
/// Writes that reference the acting user under a foreign key require that
/// account to exist; without the `ADMIN_*` bootstrap configured, admin-token
/// article creation is rejected with a validation error.
pub const ADMIN_SURROGATE_USER_ID: i32 = 1;

/// The resolved identity+rights bundle attached to a request.
///
/// Exactly one variant is produced per request by the authorization engine;
/// downstream code pattern-matches instead of probing for field presence.
#[derive(Debug, Clone)]
pub enum Principal {
    /// No credential was presented and the anonymous-bypass mode is enabled.
    /// Carries the full administrative permission set. Development-only; the
    /// bypass is off by default.
    BypassAdmin,
    /// A signed administrative token was presented and verified.
    TokenAdmin,
    /// A signed user token was presented; the user was loaded together with
    /// its roles and the union of its permissions.
    User(UserPrincipal),
}

#[derive(Debug, Clone)]
pub struct UserPrincipal {
    pub id: i32,
    pub username: Option<String>,
    pub email: String,
    pub is_journalist: bool,
    pub roles: Vec<String>,
    pub permissions: HashSet<String>,
}

impl Principal {
    /// Id of the acting user. Administrative principals act as the seeded
    /// administrative account.
    pub fn user_id(&self) -> i32 {
        match self {
            Principal::BypassAdmin | Principal::TokenAdmin => ADMIN_SURROGATE_USER_ID,
            Principal::User(user) => user.id,
        }
    }

    pub fn has_permission(&self, name: &str) -> bool {
        match self {
            Principal::BypassAdmin | Principal::TokenAdmin => {
                permissions::admin_permissions().contains(&name)
            }
            Principal::User(user) => user.permissions.contains(name),
        }
    }

    /// True iff the principal's permission set intersects `required`.
    pub fn has_any_permission(&self, required: &[&str]) -> bool {
        required.iter().any(|name| self.has_permission(name))
    }

    pub fn has_any_role(&self, required: &[&str]) -> bool {
        match self {
            Principal::BypassAdmin | Principal::TokenAdmin => required.contains(&"admin"),
            Principal::User(user) => user
                .roles
                .iter()
                .any(|role| required.contains(&role.as_str())),
        }
    }

    /// The journalist flag counts as holding the article-create permission.
    pub fn is_journalist_capable(&self) -> bool {
        match self {
            Principal::BypassAdmin | Principal::TokenAdmin => true,
            Principal::User(user) => {
                user.is_journalist || user.permissions.contains(permissions::ARTICLE_CREATE)
            }
        }
    }

    /// Short label for audit records and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Principal::BypassAdmin => "bypass_admin",
            Principal::TokenAdmin => "token_admin",
            Principal::User(_) => "user",
        }
    }
}
