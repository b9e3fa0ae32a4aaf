use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use newsdesk_backend::api::{AdminApi, ArticleApi, AuthApi, HealthApi};
use newsdesk_backend::config::{init_logging, SecurityConfig};
use newsdesk_backend::services::{
    seed, AdminService, ArticleService, AuthService, TokenService,
};
use newsdesk_backend::stores::{
    ArticleStore, AuditStore, LockoutPolicy, RoleStore, UserStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let security = SecurityConfig::from_env()?;

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://newsdesk.db?mode=rwc".to_string());
    let db: DatabaseConnection = Database::connect(&database_url).await?;
    info!(database_url, "connected to database");

    Migrator::up(&db, None).await?;
    info!("database migrations completed");

    let user_store = UserStore::new(
        db.clone(),
        security.password_pepper.clone(),
        LockoutPolicy {
            threshold: security.lockout_threshold,
            duration_secs: security.lockout_duration_secs,
        },
    );
    let role_store = RoleStore::new(db.clone());
    let audit_store = AuditStore::new(db.clone());
    let article_store = ArticleStore::new(db.clone());

    seed::seed(&db, &user_store, &role_store).await?;

    let token_service = TokenService::new(
        security.jwt_secret.clone(),
        security.admin_jwt_secret.clone(),
        security.token_expiration_minutes,
    );

    let auth_service = Arc::new(AuthService::new(
        user_store.clone(),
        role_store.clone(),
        audit_store.clone(),
        token_service,
        security.allow_anonymous_bypass,
    ));
    let article_service = Arc::new(ArticleService::new(article_store));
    let admin_service = Arc::new(AdminService::new(user_store, role_store, audit_store));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(auth_service.clone()),
            ArticleApi::new(auth_service.clone(), article_service),
            AdminApi::new(auth_service, admin_service),
        ),
        "Newsdesk Backend",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    info!("starting server on http://0.0.0.0:3000");
    info!("swagger UI available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000"))
        .run(app)
        .await?;
    Ok(())
}
