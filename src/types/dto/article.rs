use poem_openapi::Object;

use crate::types::db::article;

/// Request body for article creation. The slug is derived from the headline
/// unless supplied explicitly.
#[derive(Object, Debug)]
pub struct CreateArticleRequest {
    pub headline: String,
    /// Optional explicit slug; normalized to the URL-safe form.
    pub slug: Option<String>,
    pub sub_headline: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: Option<i32>,

    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub featured_image_alt: Option<String>,
    pub featured_image_credit: Option<String>,

    pub is_breaking: Option<bool>,
    pub is_opinion: Option<bool>,

    pub language: Option<String>,
    pub location_tag: Option<String>,
    pub source_attribution: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub scheduled_publish_at: Option<i64>,
    pub scheduled_unpublish_at: Option<i64>,
}

/// Partial update of an article. Absent fields are left untouched.
#[derive(Object, Debug, Default)]
pub struct UpdateArticleRequest {
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<i32>,

    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub featured_image_alt: Option<String>,
    pub featured_image_credit: Option<String>,

    pub is_breaking: Option<bool>,
    pub is_pinned: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_opinion: Option<bool>,
    pub is_fact_checked: Option<bool>,

    pub language: Option<String>,
    pub location_tag: Option<String>,
    pub source_attribution: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub scheduled_publish_at: Option<i64>,
    pub scheduled_unpublish_at: Option<i64>,

    /// Optional note recorded on the version snapshot taken before the update
    pub change_note: Option<String>,
}

/// Request body for a lifecycle transition
#[derive(Object, Debug)]
pub struct TransitionRequest {
    /// Target status: draft, pending, published or archived
    pub status: String,
}

#[derive(Object, Debug)]
pub struct ArticleResponse {
    pub id: i32,
    pub headline: String,
    pub sub_headline: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub slug: String,

    pub featured_image_url: Option<String>,
    pub featured_image_caption: Option<String>,
    pub featured_image_alt: Option<String>,
    pub featured_image_credit: Option<String>,

    pub category_id: Option<i32>,
    pub author_id: i32,
    pub editor_id: Option<i32>,

    pub status: String,

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

    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,

    pub published_at: Option<i64>,
    pub scheduled_publish_at: Option<i64>,
    pub scheduled_unpublish_at: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

impl From<article::Model> for ArticleResponse {
    fn from(model: article::Model) -> Self {
        Self {
            id: model.id,
            headline: model.headline,
            sub_headline: model.sub_headline,
            summary: model.summary,
            body: model.body,
            slug: model.slug,
            featured_image_url: model.featured_image_url,
            featured_image_caption: model.featured_image_caption,
            featured_image_alt: model.featured_image_alt,
            featured_image_credit: model.featured_image_credit,
            category_id: model.category_id,
            author_id: model.author_id,
            editor_id: model.editor_id,
            status: model.status.to_string(),
            is_breaking: model.is_breaking,
            is_pinned: model.is_pinned,
            is_featured: model.is_featured,
            is_opinion: model.is_opinion,
            is_fact_checked: model.is_fact_checked,
            language: model.language,
            location_tag: model.location_tag,
            source_attribution: model.source_attribution,
            seo_title: model.seo_title,
            seo_description: model.seo_description,
            reading_time: model.reading_time,
            view_count: model.view_count,
            like_count: model.like_count,
            comment_count: model.comment_count,
            published_at: model.published_at,
            scheduled_publish_at: model.scheduled_publish_at,
            scheduled_unpublish_at: model.scheduled_unpublish_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: u64,
}
