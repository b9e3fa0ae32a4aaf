// Database entities, one module per table
pub mod article;
pub mod article_version;
pub mod audit_log;
pub mod category;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;
