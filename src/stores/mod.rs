// Stores own all persistence concerns; services above them never touch
// sea-orm queries directly.
pub mod article_store;
pub mod audit_store;
pub mod role_store;
pub mod user_store;

pub use article_store::ArticleStore;
pub use audit_store::{AuditEntry, AuditStore};
pub use role_store::RoleStore;
pub use user_store::{ExternalIdentity, LockoutPolicy, NewUser, UserStore};
