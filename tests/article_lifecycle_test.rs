mod common;

use newsdesk_backend::errors::DomainError;
use newsdesk_backend::types::db::article::ArticleStatus;
use newsdesk_backend::types::dto::{CreateArticleRequest, UpdateArticleRequest};

use common::TestHarness;

fn create_request(headline: &str) -> CreateArticleRequest {
    CreateArticleRequest {
        headline: headline.to_string(),
        slug: None,
        sub_headline: None,
        summary: None,
        body: "Some words about the matter at hand.".to_string(),
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
async fn test_create_produces_a_draft_with_derived_slug() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let principal = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&principal, create_request("Markets Rally: What Happened?"))
        .await
        .expect("Creation failed");

    assert_eq!(article.status, ArticleStatus::Draft);
    assert_eq!(article.slug, "markets-rally-what-happened");
    assert_eq!(article.author_id, principal.user_id());
    assert!(article.published_at.is_none());
    assert!(article.reading_time >= 1);
    assert_eq!(article.view_count, 0);
}

#[tokio::test]
async fn test_explicit_slug_is_normalized_and_used() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let principal = harness.principal_for("josie").await;

    let mut request = create_request("Some Headline");
    request.slug = Some("My Custom Slug!".to_string());

    let article = harness
        .article_service
        .create(&principal, request)
        .await
        .expect("Creation failed");
    assert_eq!(article.slug, "my-custom-slug");
}

#[tokio::test]
async fn test_colliding_headline_slug_is_a_conflict() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let principal = harness.principal_for("josie").await;

    harness
        .article_service
        .create(&principal, create_request("Big News!"))
        .await
        .expect("First creation failed");

    let result = harness
        .article_service
        .create(&principal, create_request("Big... News"))
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_review_flow_stamps_publication_exactly_once() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    harness.register_editor("eddie").await;
    let author = harness.principal_for("josie").await;
    let editor = harness.principal_for("eddie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Review Flow"))
        .await
        .expect("Creation failed");

    // Author submits for review
    let pending = harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Pending)
        .await
        .expect("Submit failed");
    assert_eq!(pending.status, ArticleStatus::Pending);
    assert!(pending.published_at.is_none());

    // Editor publishes
    let published = harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");
    assert_eq!(published.status, ArticleStatus::Published);
    assert_eq!(published.editor_id, Some(editor.user_id()));
    let first_published_at = published.published_at.expect("published_at not stamped");

    // Archive and republish: the original timestamp survives
    harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Archived)
        .await
        .expect("Archive failed");
    let republished = harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Published)
        .await
        .expect("Republish failed");
    assert_eq!(republished.published_at, Some(first_published_at));
}

#[tokio::test]
async fn test_author_can_publish_own_draft_directly() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Direct Publish"))
        .await
        .expect("Creation failed");

    let published = harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Published)
        .await
        .expect("Direct publish failed");
    assert_eq!(published.status, ArticleStatus::Published);
    assert!(published.published_at.is_some());
    // Self-publication records no editor
    assert_eq!(published.editor_id, None);
}

#[tokio::test]
async fn test_non_owner_without_update_permission_cannot_move_an_article() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    harness.register_journalist("mallory").await;
    let author = harness.principal_for("josie").await;
    let other = harness.principal_for("mallory").await;

    let article = harness
        .article_service
        .create(&author, create_request("Hands Off"))
        .await
        .expect("Creation failed");

    // Another journalist holds article.create but not article.update, and is
    // not the author. The draft is not even visible to them.
    let result = harness
        .article_service
        .transition(&other, article.id, ArticleStatus::Pending)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));

    // Once published the article is visible, but still immovable for them
    harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");
    let result = harness
        .article_service
        .transition(&other, article.id, ArticleStatus::Archived)
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_illegal_edges_are_rejected() {
    let harness = TestHarness::new().await;
    harness.register_editor("eddie").await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;
    let editor = harness.principal_for("eddie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Edge Cases"))
        .await
        .expect("Creation failed");

    // Draft cannot go straight to archived
    let result = harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Archived)
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    // Published cannot go back to draft
    harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");
    let result = harness
        .article_service
        .transition(&editor, article.id, ArticleStatus::Draft)
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_transition_to_current_status_is_a_noop() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Idempotent"))
        .await
        .expect("Creation failed");

    let same = harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Draft)
        .await
        .expect("No-op transition failed");
    assert_eq!(same.status, ArticleStatus::Draft);
    assert_eq!(same.updated_at, article.updated_at);
}

#[tokio::test]
async fn test_content_update_snapshots_previous_version() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Original Headline"))
        .await
        .expect("Creation failed");

    harness
        .article_service
        .update(
            &author,
            article.id,
            UpdateArticleRequest {
                body: Some("Rewritten body with different words.".to_string()),
                change_note: Some("tightened the lede".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update failed");

    let versions = harness
        .article_store
        .versions_for_article(article.id)
        .await
        .expect("Failed to list versions");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version_number, 1);
    // The snapshot holds the pre-change content
    assert_eq!(versions[0].headline, "Original Headline");
    assert_eq!(versions[0].body, "Some words about the matter at hand.");
    assert_eq!(versions[0].change_note.as_deref(), Some("tightened the lede"));
    assert_eq!(versions[0].changed_by, Some(author.user_id()));
}

#[tokio::test]
async fn test_metadata_only_update_takes_no_snapshot() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Metadata Only"))
        .await
        .expect("Creation failed");

    harness
        .article_service
        .update(
            &author,
            article.id,
            UpdateArticleRequest {
                summary: Some("A new summary.".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update failed");

    let versions = harness
        .article_store
        .versions_for_article(article.id)
        .await
        .expect("Failed to list versions");
    assert!(versions.is_empty());
}

#[tokio::test]
async fn test_rejected_update_leaves_no_version_snapshot() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    harness
        .article_service
        .create(&author, create_request("Taken Title"))
        .await
        .expect("First creation failed");
    let article = harness
        .article_service
        .create(&author, create_request("Second Story"))
        .await
        .expect("Second creation failed");

    // Renaming onto an existing slug is refused
    let result = harness
        .article_service
        .update(
            &author,
            article.id,
            UpdateArticleRequest {
                headline: Some("Taken Title".to_string()),
                body: Some("Rewritten body too.".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    // The refused update must not have written a snapshot
    let versions = harness
        .article_store
        .versions_for_article(article.id)
        .await
        .expect("Failed to list versions");
    assert!(versions.is_empty());
}

#[tokio::test]
async fn test_slug_follows_headline_until_first_publication() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Working Title"))
        .await
        .expect("Creation failed");
    assert_eq!(article.slug, "working-title");

    // Pre-publication, the slug tracks the headline
    let renamed = harness
        .article_service
        .update(
            &author,
            article.id,
            UpdateArticleRequest {
                headline: Some("Final Title".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update failed");
    assert_eq!(renamed.slug, "final-title");

    // After publication, the slug freezes
    harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");
    let renamed_again = harness
        .article_service
        .update(
            &author,
            article.id,
            UpdateArticleRequest {
                headline: Some("Post-Publish Title".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update failed");
    assert_eq!(renamed_again.headline, "Post-Publish Title");
    assert_eq!(renamed_again.slug, "final-title");
}

#[tokio::test]
async fn test_only_drafts_can_be_deleted() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let draft = harness
        .article_service
        .create(&author, create_request("Disposable Draft"))
        .await
        .expect("Creation failed");
    harness
        .article_service
        .delete(&author, draft.id)
        .await
        .expect("Draft deletion failed");

    let published = harness
        .article_service
        .create(&author, create_request("Permanent Record"))
        .await
        .expect("Creation failed");
    harness
        .article_service
        .transition(&author, published.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");

    let result = harness.article_service.delete(&author, published.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_public_slug_lookup_only_resolves_published() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Hidden Until Published"))
        .await
        .expect("Creation failed");

    let result = harness
        .article_service
        .get_published_by_slug("hidden-until-published")
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));

    harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");

    let found = harness
        .article_service
        .get_published_by_slug("hidden-until-published")
        .await
        .expect("Lookup failed");
    assert_eq!(found.id, article.id);
}

#[tokio::test]
async fn test_view_counter_increments_per_read() {
    let harness = TestHarness::new().await;
    harness.register_journalist("josie").await;
    let author = harness.principal_for("josie").await;

    let article = harness
        .article_service
        .create(&author, create_request("Counted"))
        .await
        .expect("Creation failed");
    harness
        .article_service
        .transition(&author, article.id, ArticleStatus::Published)
        .await
        .expect("Publish failed");

    for _ in 0..3 {
        harness
            .article_service
            .record_view(&article)
            .await
            .expect("View increment failed");
    }
    harness
        .article_service
        .record_like(&article)
        .await
        .expect("Like increment failed");

    let reloaded = harness
        .article_store
        .find_by_id(article.id)
        .await
        .expect("Failed to load article")
        .expect("Article missing");
    assert_eq!(reloaded.view_count, 3);
    assert_eq!(reloaded.like_count, 1);
    assert_eq!(reloaded.comment_count, 0);
}
