use std::sync::Arc;

use poem_openapi::param::{Header, Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{optional_token, BearerAuth};
use crate::errors::ApiError;
use crate::services::{ArticleService, AuthService};
use crate::types::db::article::ArticleStatus;
use crate::types::dto::{
    ArticleListResponse, ArticleResponse, CreateArticleRequest, TransitionRequest,
    UpdateArticleRequest,
};

/// Article authoring, lifecycle and public reading endpoints
pub struct ArticleApi {
    auth_service: Arc<AuthService>,
    article_service: Arc<ArticleService>,
}

impl ArticleApi {
    pub fn new(auth_service: Arc<AuthService>, article_service: Arc<ArticleService>) -> Self {
        Self {
            auth_service,
            article_service,
        }
    }
}

#[derive(Tags)]
enum ArticleTags {
    /// Article authoring and lifecycle
    Articles,
    /// Public article reading
    Public,
}

#[OpenApi(prefix_path = "/articles")]
impl ArticleApi {
    /// Create a draft article
    #[oai(path = "/", method = "post", tag = "ArticleTags::Articles")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateArticleRequest>,
    ) -> Result<Json<ArticleResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let article = self.article_service.create(&principal, body.0).await?;
        Ok(Json(article.into()))
    }

    /// List the authenticated author's own articles, optionally filtered by
    /// status
    #[oai(path = "/mine", method = "get", tag = "ArticleTags::Articles")]
    async fn list_mine(
        &self,
        auth: BearerAuth,
        status: Query<Option<String>>,
        limit: Query<Option<u64>>,
        offset: Query<Option<u64>>,
    ) -> Result<Json<ArticleListResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let status = match status.0 {
            Some(value) => Some(
                ArticleStatus::parse(&value)
                    .ok_or_else(|| ApiError::validation(format!("Unknown status '{value}'")))?,
            ),
            None => None,
        };
        let (articles, total) = self
            .article_service
            .list_own(
                &principal,
                status,
                limit.0.unwrap_or(50).min(200),
                offset.0.unwrap_or(0),
            )
            .await?;
        Ok(Json(ArticleListResponse {
            articles: articles.into_iter().map(Into::into).collect(),
            total,
        }))
    }

    /// Fetch one article by id
    #[oai(path = "/:id", method = "get", tag = "ArticleTags::Articles")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<ArticleResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let article = self.article_service.get(&principal, id.0).await?;
        Ok(Json(article.into()))
    }

    /// Apply a partial update to an article
    #[oai(path = "/:id", method = "patch", tag = "ArticleTags::Articles")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateArticleRequest>,
    ) -> Result<Json<ArticleResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let article = self
            .article_service
            .update(&principal, id.0, body.0)
            .await?;
        Ok(Json(article.into()))
    }

    /// Move an article to a new lifecycle status
    #[oai(path = "/:id/transition", method = "post", tag = "ArticleTags::Articles")]
    async fn transition(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<TransitionRequest>,
    ) -> Result<Json<ArticleResponse>, ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        let target = ArticleStatus::parse(&body.status)
            .ok_or_else(|| ApiError::validation(format!("Unknown status '{}'", body.status)))?;
        let article = self
            .article_service
            .transition(&principal, id.0, target)
            .await?;
        Ok(Json(article.into()))
    }

    /// Delete a draft article
    #[oai(path = "/:id", method = "delete", tag = "ArticleTags::Articles")]
    async fn delete(&self, auth: BearerAuth, id: Path<i32>) -> Result<(), ApiError> {
        let principal = self
            .auth_service
            .resolve_principal(Some(auth.token()))
            .await?;
        self.article_service.delete(&principal, id.0).await?;
        Ok(())
    }

    /// Read a published article by slug. Anonymous access is allowed; each
    /// read bumps the view counter.
    #[oai(path = "/public/:slug", method = "get", tag = "ArticleTags::Public")]
    async fn read_published(
        &self,
        #[oai(name = "Authorization")] authorization: Header<Option<String>>,
        slug: Path<String>,
    ) -> Result<Json<ArticleResponse>, ApiError> {
        // An invalid credential degrades to anonymous here instead of
        // failing the request, so the header is read raw rather than
        // through the security scheme.
        let _principal = self
            .auth_service
            .optional_principal(optional_token(authorization.0.as_deref()))
            .await?;

        let article = self.article_service.get_published_by_slug(&slug.0).await?;
        self.article_service.record_view(&article).await?;
        Ok(Json(article.into()))
    }

    /// Like a published article
    #[oai(path = "/public/:slug/like", method = "post", tag = "ArticleTags::Public")]
    async fn like_published(&self, slug: Path<String>) -> Result<(), ApiError> {
        let article = self.article_service.get_published_by_slug(&slug.0).await?;
        self.article_service.record_like(&article).await?;
        Ok(())
    }
}
