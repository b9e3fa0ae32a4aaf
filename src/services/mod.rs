pub mod admin_service;
pub mod article_service;
pub mod audit_logger;
pub mod auth_service;
pub mod seed;
pub mod token_service;

pub use admin_service::AdminService;
pub use article_service::ArticleService;
pub use auth_service::AuthService;
pub use token_service::TokenService;
