pub mod admin;
pub mod article;
pub mod auth;

pub use admin::{JournalistAccessRequest, SuspensionRequest, UserListResponse};
pub use article::{
    ArticleListResponse, ArticleResponse, CreateArticleRequest, TransitionRequest,
    UpdateArticleRequest,
};
pub use auth::{
    LoginRequest, RegisterRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};
