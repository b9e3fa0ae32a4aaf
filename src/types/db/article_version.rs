use sea_orm::entity::prelude::*;

/// Immutable snapshot of an article's headline/body taken before a content
/// change. Append-only; never updated or deleted by normal flows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "article_versions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub article_id: i32,
    pub version_number: i32,
    pub headline: String,
    pub body: String,
    pub changed_by: Option<i32>,
    pub change_note: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
