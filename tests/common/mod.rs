use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use newsdesk_backend::services::{
    seed, AdminService, ArticleService, AuthService, TokenService,
};
use newsdesk_backend::stores::{
    ArticleStore, AuditStore, LockoutPolicy, NewUser, RoleStore, UserStore,
};
use newsdesk_backend::types::db::user;
use newsdesk_backend::types::internal::Principal;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestHarness {
    pub db: DatabaseConnection,
    pub user_store: UserStore,
    pub role_store: RoleStore,
    pub audit_store: AuditStore,
    pub article_store: ArticleStore,
    pub auth_service: AuthService,
    pub article_service: ArticleService,
    pub admin_service: AdminService,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_bypass(false).await
    }

    pub async fn with_bypass(allow_anonymous_bypass: bool) -> Self {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = UserStore::new(
            db.clone(),
            "test-pepper".to_string(),
            LockoutPolicy {
                threshold: 5,
                duration_secs: 900,
            },
        );
        let role_store = RoleStore::new(db.clone());
        let audit_store = AuditStore::new(db.clone());
        let article_store = ArticleStore::new(db.clone());

        seed::seed(&db, &user_store, &role_store)
            .await
            .expect("Failed to seed reference data");

        let token_service = TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            Some("test-admin-secret-minimum-32-chars".to_string()),
            60,
        );

        let auth_service = AuthService::new(
            user_store.clone(),
            role_store.clone(),
            audit_store.clone(),
            token_service,
            allow_anonymous_bypass,
        );
        let article_service = ArticleService::new(article_store.clone());
        let admin_service = AdminService::new(
            user_store.clone(),
            role_store.clone(),
            audit_store.clone(),
        );

        Self {
            db,
            user_store,
            role_store,
            audit_store,
            article_store,
            auth_service,
            article_service,
            admin_service,
        }
    }

    pub fn admin_token_service(&self) -> TokenService {
        TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
            Some("test-admin-secret-minimum-32-chars".to_string()),
            60,
        )
    }

    pub async fn register_user(&self, username: &str) -> user::Model {
        self.auth_service
            .register(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: TEST_PASSWORD.to_string(),
                display_name: None,
            })
            .await
            .expect("Failed to register user")
    }

    /// Register a user and grant the seeded journalist role.
    pub async fn register_journalist(&self, username: &str) -> user::Model {
        let user = self.register_user(username).await;
        let role = self
            .role_store
            .find_role_by_name("journalist")
            .await
            .expect("Failed to look up role")
            .expect("Journalist role not seeded");
        self.role_store
            .grant_role(user.id, role.id, user.id)
            .await
            .expect("Failed to grant journalist role");
        user
    }

    /// Register a user and grant the seeded editor role.
    pub async fn register_editor(&self, username: &str) -> user::Model {
        let user = self.register_user(username).await;
        let role = self
            .role_store
            .find_role_by_name("editor")
            .await
            .expect("Failed to look up role")
            .expect("Editor role not seeded");
        self.role_store
            .grant_role(user.id, role.id, user.id)
            .await
            .expect("Failed to grant editor role");
        user
    }

    /// Resolve a principal through the full login + token path.
    pub async fn principal_for(&self, username: &str) -> Principal {
        let (token, _, _) = self
            .auth_service
            .login(username, TEST_PASSWORD)
            .await
            .expect("Login failed");
        self.auth_service
            .resolve_principal(Some(&token))
            .await
            .expect("Principal resolution failed")
    }
}
