use chrono::Utc;
use sea_orm::Set;
use tracing::info;

use crate::errors::DomainError;
use crate::stores::ArticleStore;
use crate::types::db::article::{self, ArticleStatus};
use crate::types::dto::{CreateArticleRequest, UpdateArticleRequest};
use crate::types::internal::{permissions, Principal};

const WORDS_PER_MINUTE: usize = 200;

/// Derive a URL slug from a headline: lowercase, non-alphanumeric runs
/// collapse to single hyphens, leading and trailing hyphens trimmed.
pub fn slugify(headline: &str) -> String {
    let mut slug = String::with_capacity(headline.len());
    let mut last_was_hyphen = true;
    for ch in headline.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            slug.push(lower);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Estimated reading time in minutes, rounded up, never below one.
pub fn reading_time_minutes(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    (words.div_ceil(WORDS_PER_MINUTE)).max(1) as i32
}

/// Article lifecycle engine: creation, content updates with version
/// snapshots, status transitions and engagement counters.
///
/// Every mutation validates authorization and state before writing, so a
/// rejected operation leaves no partial change behind.
#[derive(Debug, Clone)]
pub struct ArticleService {
    store: ArticleStore,
}

impl ArticleService {
    pub fn new(store: ArticleStore) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: CreateArticleRequest,
    ) -> Result<article::Model, DomainError> {
        if !principal.is_journalist_capable() {
            return Err(DomainError::forbidden(
                "Journalist access is required to create articles",
            ));
        }

        let headline = request.headline.trim().to_string();
        if headline.is_empty() {
            return Err(DomainError::validation("Headline must not be empty"));
        }
        if request.body.trim().is_empty() {
            return Err(DomainError::validation("Body must not be empty"));
        }

        let slug = match &request.slug {
            Some(explicit) => slugify(explicit),
            None => slugify(&headline),
        };
        if slug.is_empty() {
            return Err(DomainError::validation(
                "Slug must contain at least one alphanumeric character",
            ));
        }
        if self.store.slug_exists(&slug).await? {
            return Err(DomainError::conflict(format!(
                "An article with slug '{slug}' already exists"
            )));
        }
        if let Some(category_id) = request.category_id {
            if !self.store.category_exists(category_id).await? {
                return Err(DomainError::validation("Unknown or disabled category"));
            }
        }

        let now = Utc::now().timestamp();
        let active = article::ActiveModel {
            headline: Set(headline),
            sub_headline: Set(request.sub_headline),
            summary: Set(request.summary),
            body: Set(request.body.clone()),
            slug: Set(slug),
            featured_image_url: Set(request.featured_image_url),
            featured_image_caption: Set(request.featured_image_caption),
            featured_image_alt: Set(request.featured_image_alt),
            featured_image_credit: Set(request.featured_image_credit),
            category_id: Set(request.category_id),
            author_id: Set(principal.user_id()),
            editor_id: Set(None),
            status: Set(ArticleStatus::Draft),
            is_breaking: Set(request.is_breaking.unwrap_or(false)),
            is_pinned: Set(false),
            is_featured: Set(false),
            is_opinion: Set(request.is_opinion.unwrap_or(false)),
            is_fact_checked: Set(false),
            language: Set(request.language.unwrap_or_else(|| "en".to_string())),
            location_tag: Set(request.location_tag),
            source_attribution: Set(request.source_attribution),
            seo_title: Set(request.seo_title),
            seo_description: Set(request.seo_description),
            reading_time: Set(reading_time_minutes(&request.body)),
            view_count: Set(0),
            like_count: Set(0),
            comment_count: Set(0),
            published_at: Set(None),
            scheduled_publish_at: Set(request.scheduled_publish_at),
            scheduled_unpublish_at: Set(request.scheduled_unpublish_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = self.store.insert(active).await?;
        info!(article_id = created.id, author_id = created.author_id, "article created");
        Ok(created)
    }

    /// Fetch an article by id. Unpublished articles are visible only to
    /// their author and to principals holding an editorial permission;
    /// everyone else gets not-found, not forbidden, so existence leaks
    /// nothing.
    pub async fn get(
        &self,
        principal: &Principal,
        id: i32,
    ) -> Result<article::Model, DomainError> {
        let article = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Article"))?;

        if article.status == ArticleStatus::Published
            || article.author_id == principal.user_id()
            || principal.has_any_permission(&[
                permissions::ARTICLE_UPDATE,
                permissions::ARTICLE_APPROVE,
            ])
        {
            Ok(article)
        } else {
            Err(DomainError::not_found("Article"))
        }
    }

    /// Public slug lookup. Only published articles resolve.
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<article::Model, DomainError> {
        self.store
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("Article"))
    }

    pub async fn list_own(
        &self,
        principal: &Principal,
        status: Option<ArticleStatus>,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<article::Model>, u64), DomainError> {
        self.store
            .list_by_author(principal.user_id(), status, limit, offset)
            .await
    }

    /// Owners may always modify their own article; the blanket update
    /// permission covers everyone else's.
    fn can_modify(&self, principal: &Principal, article: &article::Model) -> bool {
        article.author_id == principal.user_id()
            || principal.has_permission(permissions::ARTICLE_UPDATE)
    }

    /// Apply a partial content update. A version snapshot of the pre-change
    /// headline and body is appended before any content field changes.
    ///
    /// The slug follows the headline until first publication; once
    /// `published_at` is set the slug is frozen and a headline change keeps
    /// the original slug.
    pub async fn update(
        &self,
        principal: &Principal,
        id: i32,
        request: UpdateArticleRequest,
    ) -> Result<article::Model, DomainError> {
        let current = self.get(principal, id).await?;

        if !self.can_modify(principal, &current) {
            return Err(DomainError::forbidden(
                "Not allowed to modify this article",
            ));
        }

        let mut new_slug = None;
        if let Some(headline) = &request.headline {
            let headline = headline.trim();
            if headline.is_empty() {
                return Err(DomainError::validation("Headline must not be empty"));
            }
            if headline != current.headline && current.published_at.is_none() {
                let slug = slugify(headline);
                if slug.is_empty() {
                    return Err(DomainError::validation(
                        "Headline must contain at least one alphanumeric character",
                    ));
                }
                if slug != current.slug && self.store.slug_exists(&slug).await? {
                    return Err(DomainError::conflict(format!(
                        "An article with slug '{slug}' already exists"
                    )));
                }
                new_slug = Some(slug);
            }
        }

        if let Some(category_id) = request.category_id {
            if !self.store.category_exists(category_id).await? {
                return Err(DomainError::validation("Unknown or disabled category"));
            }
        }

        let new_reading_time = request.body.as_deref().map(reading_time_minutes);

        // Snapshot only once every validation has passed, so a rejected
        // update leaves no version row behind.
        let content_changed = matches!(&request.headline, Some(h) if h.trim() != current.headline)
            || matches!(&request.body, Some(b) if *b != current.body);
        if content_changed {
            self.store
                .append_version(&current, Some(principal.user_id()), request.change_note.clone())
                .await?;
        }

        let mut active: article::ActiveModel = current.into();
        if let Some(headline) = request.headline {
            active.headline = Set(headline.trim().to_string());
        }
        if let Some(slug) = new_slug {
            active.slug = Set(slug);
        }
        if let Some(body) = request.body {
            active.body = Set(body);
        }
        if let Some(minutes) = new_reading_time {
            active.reading_time = Set(minutes);
        }
        if let Some(sub_headline) = request.sub_headline {
            active.sub_headline = Set(Some(sub_headline));
        }
        if let Some(summary) = request.summary {
            active.summary = Set(Some(summary));
        }
        if let Some(category_id) = request.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(url) = request.featured_image_url {
            active.featured_image_url = Set(Some(url));
        }
        if let Some(caption) = request.featured_image_caption {
            active.featured_image_caption = Set(Some(caption));
        }
        if let Some(alt) = request.featured_image_alt {
            active.featured_image_alt = Set(Some(alt));
        }
        if let Some(credit) = request.featured_image_credit {
            active.featured_image_credit = Set(Some(credit));
        }
        if let Some(flag) = request.is_breaking {
            active.is_breaking = Set(flag);
        }
        if let Some(flag) = request.is_pinned {
            active.is_pinned = Set(flag);
        }
        if let Some(flag) = request.is_featured {
            active.is_featured = Set(flag);
        }
        if let Some(flag) = request.is_opinion {
            active.is_opinion = Set(flag);
        }
        if let Some(flag) = request.is_fact_checked {
            active.is_fact_checked = Set(flag);
        }
        if let Some(language) = request.language {
            active.language = Set(language);
        }
        if let Some(tag) = request.location_tag {
            active.location_tag = Set(Some(tag));
        }
        if let Some(attribution) = request.source_attribution {
            active.source_attribution = Set(Some(attribution));
        }
        if let Some(title) = request.seo_title {
            active.seo_title = Set(Some(title));
        }
        if let Some(description) = request.seo_description {
            active.seo_description = Set(Some(description));
        }
        if let Some(at) = request.scheduled_publish_at {
            active.scheduled_publish_at = Set(Some(at));
        }
        if let Some(at) = request.scheduled_unpublish_at {
            active.scheduled_unpublish_at = Set(Some(at));
        }
        active.updated_at = Set(Utc::now().timestamp());

        self.store.update(active).await
    }

    /// Move an article to `target` status.
    ///
    /// Only the author or a principal holding the blanket update permission
    /// may move an article. Transitioning to the current status is a no-op.
    /// The first arrival in `published` stamps `published_at`; later
    /// re-publications from the archive keep the original timestamp.
    pub async fn transition(
        &self,
        principal: &Principal,
        id: i32,
        target: ArticleStatus,
    ) -> Result<article::Model, DomainError> {
        let current = self.get(principal, id).await?;

        if current.status == target {
            return Ok(current);
        }

        if !current.status.can_transition_to(target) {
            return Err(DomainError::validation(format!(
                "Cannot transition an article from {} to {}",
                current.status, target
            )));
        }

        let is_author = current.author_id == principal.user_id();
        if !is_author && !principal.has_permission(permissions::ARTICLE_UPDATE) {
            return Err(DomainError::forbidden(
                "Not allowed to move this article",
            ));
        }

        let previous_status = current.status;
        let previously_published = current.published_at;
        let author_id = current.author_id;

        let mut active: article::ActiveModel = current.into();
        active.status = Set(target);
        if target == ArticleStatus::Published && previously_published.is_none() {
            active.published_at = Set(Some(Utc::now().timestamp()));
        }
        if !is_author {
            active.editor_id = Set(Some(principal.user_id()));
        }
        active.updated_at = Set(Utc::now().timestamp());

        let updated = self.store.update(active).await?;
        info!(
            article_id = updated.id,
            author_id,
            from = %previous_status,
            to = %target,
            actor = principal.kind(),
            "article transitioned"
        );
        Ok(updated)
    }

    /// Delete an article. Only drafts may be deleted; anything that entered
    /// review or publication must be archived instead.
    pub async fn delete(&self, principal: &Principal, id: i32) -> Result<(), DomainError> {
        let current = self.get(principal, id).await?;

        let can_delete = current.author_id == principal.user_id()
            || principal.has_permission(permissions::ARTICLE_DELETE);
        if !can_delete {
            return Err(DomainError::forbidden(
                "Not allowed to delete this article",
            ));
        }

        if current.status != ArticleStatus::Draft {
            return Err(DomainError::forbidden(
                "Only draft articles can be deleted",
            ));
        }

        self.store.delete(id).await?;
        info!(article_id = id, "article deleted");
        Ok(())
    }

    pub async fn record_view(&self, article: &article::Model) -> Result<(), DomainError> {
        self.store.increment_view_count(article.id).await
    }

    pub async fn record_like(&self, article: &article::Model) -> Result<(), DomainError> {
        self.store.increment_like_count(article.id).await
    }

    pub async fn record_comment(&self, article: &article::Model) -> Result<(), DomainError> {
        self.store.increment_comment_count(article.id).await
    }
}
