use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Editorial lifecycle status of an article.
///
/// Allowed transitions: draft -> pending, draft -> published (direct publish by
/// the author), pending -> published, pending -> draft (sent back for rework),
/// published <-> archived. Draft is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Pending => "pending",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(ArticleStatus::Draft),
            "pending" => Some(ArticleStatus::Pending),
            "published" => Some(ArticleStatus::Published),
            "archived" => Some(ArticleStatus::Archived),
            _ => None,
        }
    }

    /// Whether a transition from `self` to `target` is legal.
    pub fn can_transition_to(self, target: ArticleStatus) -> bool {
        use ArticleStatus::*;
        matches!(
            (self, target),
            (Draft, Pending)
                | (Draft, Published)
                | (Pending, Published)
                | (Pending, Draft)
                | (Published, Archived)
                | (Archived, Published)
        )
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub headline: String,
    pub sub_headline: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    #[sea_orm(unique)]
    pub slug: String,

    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub featured_image_alt: Option<String>,
    pub featured_image_credit: Option<String>,

    /// Nullable: set null by storage when the category is deleted.
    pub category_id: Option<i32>,
    /// Immutable after creation.
    pub author_id: i32,
    pub editor_id: Option<i32>,

    pub status: ArticleStatus,

    pub is_breaking: bool,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub is_opinion: bool,
    pub is_fact_checked: bool,

    pub language: String,
    pub location_tag: Option<String>,
    pub source_attribution: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub reading_time: i32,

    // Engagement counters, mutated only by dedicated increment operations
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,

    /// Set exactly once at the first transition into `published`.
    pub published_at: Option<i64>,
    pub scheduled_publish_at: Option<i64>,
    pub scheduled_unpublish_at: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
