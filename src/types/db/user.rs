use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    /// Absent for external-identity-only accounts.
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,

    // At most one linked external identity per user
    pub oauth_provider: Option<String>,
    pub oauth_id: Option<String>,
    pub oauth_email: Option<String>,

    pub is_journalist: bool,
    pub is_active: bool,
    pub is_suspended: bool,

    // Lockout bookkeeping
    pub failed_login_attempts: i32,
    pub last_failed_login: Option<i64>,
    pub locked_until: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    /// A user must hold a credential hash or a linked external identity to
    /// be login-capable.
    pub fn is_login_capable(&self) -> bool {
        self.password_hash.is_some() || self.oauth_provider.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
