mod common;

use newsdesk_backend::errors::DomainError;
use newsdesk_backend::types::dto::CreateArticleRequest;
use newsdesk_backend::types::internal::{permissions, Principal, ADMIN_SURROGATE_USER_ID};

use common::TestHarness;

fn minimal_article(headline: &str) -> CreateArticleRequest {
    CreateArticleRequest {
        headline: headline.to_string(),
        slug: None,
        sub_headline: None,
        summary: None,
        body: "Body text.".to_string(),
        category_id: None,
        featured_image_url: None,
        featured_image_caption: None,
        featured_image_alt: None,
        featured_image_credit: None,
        is_breaking: None,
        is_opinion: None,
        language: None,
        location_tag: None,
        source_attribution: None,
        seo_title: None,
        seo_description: None,
        scheduled_publish_at: None,
        scheduled_unpublish_at: None,
    }
}

#[tokio::test]
async fn test_missing_credential_fails_closed_by_default() {
    let harness = TestHarness::new().await;

    for bearer in [None, Some(""), Some("null"), Some("undefined")] {
        let result = harness.auth_service.resolve_principal(bearer).await;
        assert!(
            matches!(result, Err(DomainError::Unauthorized)),
            "expected Unauthorized for {bearer:?}"
        );
    }
}

#[tokio::test]
async fn test_bypass_mode_resolves_missing_credential_to_admin() {
    let harness = TestHarness::with_bypass(true).await;

    for bearer in [None, Some(""), Some("null"), Some("undefined")] {
        let principal = harness
            .auth_service
            .resolve_principal(bearer)
            .await
            .expect("Bypass resolution failed");
        assert!(matches!(principal, Principal::BypassAdmin));
        assert_eq!(principal.user_id(), ADMIN_SURROGATE_USER_ID);
        assert!(principal.has_permission(permissions::USER_MANAGE));
    }
}

#[tokio::test]
async fn test_bypass_mode_still_verifies_presented_tokens() {
    let harness = TestHarness::with_bypass(true).await;

    let result = harness
        .auth_service
        .resolve_principal(Some("garbage-token"))
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_admin_token_resolves_to_token_admin() {
    let harness = TestHarness::new().await;
    let token = harness
        .admin_token_service()
        .issue_admin_token()
        .expect("Failed to issue admin token");

    let principal = harness
        .auth_service
        .resolve_principal(Some(&token))
        .await
        .expect("Resolution failed");
    assert!(matches!(principal, Principal::TokenAdmin));
    assert!(principal.has_permission(permissions::ARTICLE_APPROVE));
    assert!(principal.has_any_role(&["admin"]));
}

#[tokio::test]
async fn test_user_principal_carries_role_permission_union() {
    let harness = TestHarness::new().await;
    let user = harness.register_journalist("casey").await;

    // A second role layers editor permissions on top
    let editor_role = harness
        .role_store
        .find_role_by_name("editor")
        .await
        .expect("Role lookup failed")
        .expect("Editor role not seeded");
    harness
        .role_store
        .grant_role(user.id, editor_role.id, user.id)
        .await
        .expect("Grant failed");

    let principal = harness.principal_for("casey").await;
    // From the journalist role
    assert!(principal.has_permission(permissions::ARTICLE_CREATE));
    assert!(principal.has_permission(permissions::MEDIA_UPLOAD));
    // From the editor role
    assert!(principal.has_permission(permissions::ARTICLE_APPROVE));
    // From neither
    assert!(!principal.has_permission(permissions::USER_MANAGE));
}

#[tokio::test]
async fn test_granting_a_role_twice_is_idempotent() {
    let harness = TestHarness::new().await;
    let user = harness.register_user("riley").await;
    let role = harness
        .role_store
        .find_role_by_name("journalist")
        .await
        .expect("Role lookup failed")
        .expect("Journalist role not seeded");

    harness
        .role_store
        .grant_role(user.id, role.id, user.id)
        .await
        .expect("First grant failed");
    harness
        .role_store
        .grant_role(user.id, role.id, user.id)
        .await
        .expect("Second grant should be a no-op");

    let roles = harness
        .role_store
        .roles_for_user(user.id)
        .await
        .expect("Role listing failed");
    assert_eq!(roles, vec!["journalist".to_string()]);
}

#[tokio::test]
async fn test_revoking_a_role_removes_its_permissions() {
    let harness = TestHarness::new().await;
    let user = harness.register_journalist("quinn").await;

    let before = harness.principal_for("quinn").await;
    assert!(before.has_permission(permissions::ARTICLE_CREATE));

    let role = harness
        .role_store
        .find_role_by_name("journalist")
        .await
        .expect("Role lookup failed")
        .expect("Journalist role not seeded");
    harness
        .role_store
        .revoke_role(user.id, role.id)
        .await
        .expect("Revoke failed");

    let after = harness.principal_for("quinn").await;
    assert!(!after.has_permission(permissions::ARTICLE_CREATE));
}

#[tokio::test]
async fn test_plain_user_cannot_create_articles() {
    let harness = TestHarness::new().await;
    harness.register_user("reader").await;
    let principal = harness.principal_for("reader").await;

    let result = harness
        .article_service
        .create(&principal, minimal_article("Not Allowed"))
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_journalist_flag_grants_authoring_without_a_role() {
    let harness = TestHarness::new().await;
    let user = harness.register_user("flagged").await;
    harness
        .user_store
        .set_journalist(user.id, true)
        .await
        .expect("Failed to set flag");

    let principal = harness.principal_for("flagged").await;
    let article = harness
        .article_service
        .create(&principal, minimal_article("Flag Carried Me"))
        .await
        .expect("Creation failed");
    assert_eq!(article.author_id, user.id);
}

#[tokio::test]
async fn test_suspended_user_token_stops_resolving() {
    let harness = TestHarness::new().await;
    let user = harness.register_user("suspect").await;

    let (token, _, _) = harness
        .auth_service
        .login("suspect", common::TEST_PASSWORD)
        .await
        .expect("Login failed");
    harness
        .user_store
        .set_suspended(user.id, true)
        .await
        .expect("Failed to suspend");

    let result = harness.auth_service.resolve_principal(Some(&token)).await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_optional_principal_degrades_instead_of_failing() {
    let harness = TestHarness::new().await;

    let anonymous = harness
        .auth_service
        .optional_principal(None)
        .await
        .expect("Optional resolution failed");
    assert!(anonymous.is_none());

    let invalid = harness
        .auth_service
        .optional_principal(Some("garbage-token"))
        .await
        .expect("Optional resolution failed");
    assert!(invalid.is_none());
}

#[tokio::test]
async fn test_user_management_requires_permission() {
    let harness = TestHarness::new().await;
    let actor = harness.register_user("lowly").await;
    let target = harness.register_user("target").await;
    let principal = harness.principal_for("lowly").await;

    let result = harness
        .admin_service
        .set_journalist_access(&principal, target.id, true)
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));

    let result = harness
        .admin_service
        .grant_role(&principal, actor.id, "admin")
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_admin_authoring_without_bootstrap_account_fails_cleanly() {
    // No ADMIN_* bootstrap is configured, so the surrogate user id has no
    // backing row and the insert must surface a validation error rather
    // than an opaque database failure.
    let harness = TestHarness::new().await;
    let token = harness
        .admin_token_service()
        .issue_admin_token()
        .expect("Failed to issue admin token");
    let principal = harness
        .auth_service
        .resolve_principal(Some(&token))
        .await
        .expect("Resolution failed");

    let result = harness
        .article_service
        .create(&principal, minimal_article("Ghost Writer"))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_admin_token_can_manage_users() {
    let harness = TestHarness::new().await;
    let target = harness.register_user("promoted").await;
    let token = harness
        .admin_token_service()
        .issue_admin_token()
        .expect("Failed to issue admin token");
    let principal = harness
        .auth_service
        .resolve_principal(Some(&token))
        .await
        .expect("Resolution failed");

    harness
        .admin_service
        .grant_role(&principal, target.id, "journalist")
        .await
        .expect("Grant failed");
    let updated = harness
        .admin_service
        .set_journalist_access(&principal, target.id, true)
        .await
        .expect("Journalist grant failed");
    assert!(updated.is_journalist);

    let roles = harness
        .role_store
        .roles_for_user(target.id)
        .await
        .expect("Role listing failed");
    assert_eq!(roles, vec!["journalist".to_string()]);
}
