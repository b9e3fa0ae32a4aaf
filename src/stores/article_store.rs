use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::errors::DomainError;
use crate::types::db::article::{self, ArticleStatus};
use crate::types::db::{article_version, category};

/// Storage for articles and their version history.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    db: DatabaseConnection,
}

impl ArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new article. A foreign key failure surfaces as a validation
    /// error; the usual cause is an administrative token authoring without
    /// the bootstrap administrator account existing.
    pub async fn insert(
        &self,
        active: article::ActiveModel,
    ) -> Result<article::Model, DomainError> {
        active.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                DomainError::validation("Article author or category does not exist")
            } else {
                DomainError::database("insert article", e)
            }
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<article::Model>, DomainError> {
        article::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find article by id", e))
    }

    /// Slug lookup restricted to published articles. Unpublished articles are
    /// invisible through this path regardless of caller identity.
    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<article::Model>, DomainError> {
        article::Entity::find()
            .filter(article::Column::Slug.eq(slug))
            .filter(article::Column::Status.eq(ArticleStatus::Published))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::database("find published article by slug", e))
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let count = article::Entity::find()
            .filter(article::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::database("check slug", e))?;
        Ok(count > 0)
    }

    /// Whether an enabled category with this id exists.
    pub async fn category_exists(&self, id: i32) -> Result<bool, DomainError> {
        let count = category::Entity::find()
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::IsEnabled.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::database("check category", e))?;
        Ok(count > 0)
    }

    pub async fn list_by_author(
        &self,
        author_id: i32,
        status: Option<ArticleStatus>,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<article::Model>, u64), DomainError> {
        let mut query = article::Entity::find().filter(article::Column::AuthorId.eq(author_id));
        if let Some(status) = status {
            query = query.filter(article::Column::Status.eq(status));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::database("count articles by author", e))?;

        let articles = query
            .order_by_desc(article::Column::UpdatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("list articles by author", e))?;
        Ok((articles, total))
    }

    pub async fn update(
        &self,
        active: article::ActiveModel,
    ) -> Result<article::Model, DomainError> {
        active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::database("update article", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        article::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database("delete article", e))?;
        Ok(())
    }

    /// Append a version snapshot for an article. Version numbers are dense
    /// and start at 1.
    pub async fn append_version(
        &self,
        article: &article::Model,
        changed_by: Option<i32>,
        change_note: Option<String>,
    ) -> Result<article_version::Model, DomainError> {
        let next = self.next_version_number(article.id).await?;

        let snapshot = article_version::ActiveModel {
            article_id: Set(article.id),
            version_number: Set(next),
            headline: Set(article.headline.clone()),
            body: Set(article.body.clone()),
            changed_by: Set(changed_by),
            change_note: Set(change_note),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        snapshot
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::database("append article version", e))
    }

    async fn next_version_number(&self, article_id: i32) -> Result<i32, DomainError> {
        let count = article_version::Entity::find()
            .filter(article_version::Column::ArticleId.eq(article_id))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::database("count article versions", e))?;
        Ok(count as i32 + 1)
    }

    pub async fn versions_for_article(
        &self,
        article_id: i32,
    ) -> Result<Vec<article_version::Model>, DomainError> {
        article_version::Entity::find()
            .filter(article_version::Column::ArticleId.eq(article_id))
            .order_by_asc(article_version::Column::VersionNumber)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::database("list article versions", e))
    }

    pub async fn increment_view_count(&self, id: i32) -> Result<(), DomainError> {
        self.increment_counter(id, article::Column::ViewCount, "increment view count")
            .await
    }

    pub async fn increment_like_count(&self, id: i32) -> Result<(), DomainError> {
        self.increment_counter(id, article::Column::LikeCount, "increment like count")
            .await
    }

    pub async fn increment_comment_count(&self, id: i32) -> Result<(), DomainError> {
        self.increment_counter(id, article::Column::CommentCount, "increment comment count")
            .await
    }

    /// Single atomic UPDATE so concurrent increments are never lost.
    async fn increment_counter(
        &self,
        id: i32,
        column: article::Column,
        operation: &'static str,
    ) -> Result<(), DomainError> {
        let result = article::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(article::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::database(operation, e))?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Article"));
        }
        Ok(())
    }
}
