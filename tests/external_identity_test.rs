mod common;

use newsdesk_backend::stores::ExternalIdentity;

use common::TestHarness;

fn identity(provider: &str, subject: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        provider: provider.to_string(),
        subject_id: subject.to_string(),
        email: email.to_string(),
        display_name: Some("Test Person".to_string()),
        avatar_url: None,
    }
}

#[tokio::test]
async fn test_new_identity_creates_account_with_derived_username() {
    let harness = TestHarness::new().await;

    let user = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-123", "pat@example.com"))
        .await
        .expect("Resolution failed");

    assert_eq!(user.username.as_deref(), Some("pat_github"));
    assert_eq!(user.email, "pat@example.com");
    assert_eq!(user.oauth_provider.as_deref(), Some("github"));
    assert_eq!(user.oauth_id.as_deref(), Some("gh-123"));
    assert!(user.password_hash.is_none());
    assert!(user.is_active);
}

#[tokio::test]
async fn test_exact_provider_match_returns_same_account() {
    let harness = TestHarness::new().await;

    let first = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-123", "pat@example.com"))
        .await
        .expect("Resolution failed");
    let second = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-123", "pat@example.com"))
        .await
        .expect("Resolution failed");

    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_matching_email_links_identity_to_existing_account() {
    let harness = TestHarness::new().await;
    let existing = harness.register_user("pat").await;

    let resolved = harness
        .user_store
        .find_or_link_external_identity(identity("google", "g-999", "pat@example.com"))
        .await
        .expect("Resolution failed");

    // Linked, not duplicated
    assert_eq!(resolved.id, existing.id);
    assert_eq!(resolved.oauth_provider.as_deref(), Some("google"));
    assert_eq!(resolved.oauth_id.as_deref(), Some("g-999"));
    // The original credential survives the link
    assert!(resolved.password_hash.is_some());
    assert_eq!(resolved.username.as_deref(), Some("pat"));
}

#[tokio::test]
async fn test_email_link_backfills_missing_avatar() {
    let harness = TestHarness::new().await;
    let existing = harness.register_user("pat").await;
    assert!(existing.avatar_url.is_none());

    let mut asserted = identity("google", "g-1", "pat@example.com");
    asserted.avatar_url = Some("https://cdn.example.com/pat.png".to_string());

    let linked = harness
        .user_store
        .find_or_link_external_identity(asserted)
        .await
        .expect("Resolution failed");
    assert_eq!(
        linked.avatar_url.as_deref(),
        Some("https://cdn.example.com/pat.png")
    );
}

#[tokio::test]
async fn test_email_link_keeps_an_existing_avatar() {
    let harness = TestHarness::new().await;
    let existing = harness.register_user("sal").await;
    harness
        .user_store
        .update_profile(
            existing.id,
            None,
            None,
            Some("https://cdn.example.com/own.png".to_string()),
        )
        .await
        .expect("Profile update failed");

    let mut asserted = identity("google", "g-2", "sal@example.com");
    asserted.avatar_url = Some("https://provider.example.com/other.png".to_string());

    let linked = harness
        .user_store
        .find_or_link_external_identity(asserted)
        .await
        .expect("Resolution failed");
    assert_eq!(
        linked.avatar_url.as_deref(),
        Some("https://cdn.example.com/own.png")
    );
}

#[tokio::test]
async fn test_provider_match_wins_over_email_match() {
    let harness = TestHarness::new().await;

    // Account A carries the linked identity, account B carries the email
    let linked = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-1", "old@example.com"))
        .await
        .expect("Resolution failed");
    harness.register_user("other").await;

    // Same provider+subject but the email now matches account B
    let resolved = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-1", "other@example.com"))
        .await
        .expect("Resolution failed");

    assert_eq!(resolved.id, linked.id);
}

#[tokio::test]
async fn test_same_subject_on_different_provider_is_a_different_identity() {
    let harness = TestHarness::new().await;

    let github = harness
        .user_store
        .find_or_link_external_identity(identity("github", "id-1", "a@example.com"))
        .await
        .expect("Resolution failed");
    let google = harness
        .user_store
        .find_or_link_external_identity(identity("google", "id-1", "b@example.com"))
        .await
        .expect("Resolution failed");

    assert_ne!(github.id, google.id);
}

#[tokio::test]
async fn test_external_login_issues_a_working_token() {
    let harness = TestHarness::new().await;

    let (token, _, user) = harness
        .auth_service
        .login_external(identity("github", "gh-7", "sam@example.com"))
        .await
        .expect("External login failed");

    let principal = harness
        .auth_service
        .resolve_principal(Some(&token))
        .await
        .expect("Principal resolution failed");
    assert_eq!(principal.user_id(), user.id);
}

#[tokio::test]
async fn test_suspended_account_cannot_login_externally() {
    let harness = TestHarness::new().await;

    let user = harness
        .user_store
        .find_or_link_external_identity(identity("github", "gh-8", "sue@example.com"))
        .await
        .expect("Resolution failed");
    harness
        .user_store
        .set_suspended(user.id, true)
        .await
        .expect("Failed to suspend");

    let result = harness
        .auth_service
        .login_external(identity("github", "gh-8", "sue@example.com"))
        .await;
    assert!(result.is_err());
}
