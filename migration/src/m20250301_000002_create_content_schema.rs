use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .col(ColumnDef::new(Categories::IsEnabled).boolean().not_null().default(true))
                    .col(ColumnDef::new(Categories::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Categories::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create articles table
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::Headline).string().not_null())
                    .col(ColumnDef::new(Articles::SubHeadline).string().null())
                    .col(ColumnDef::new(Articles::Summary).text().null())
                    .col(ColumnDef::new(Articles::Body).text().not_null())
                    .col(ColumnDef::new(Articles::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Articles::FeaturedImageUrl).string().null())
                    .col(ColumnDef::new(Articles::FeaturedImageCaption).text().null())
                    .col(ColumnDef::new(Articles::FeaturedImageAlt).text().null())
                    .col(ColumnDef::new(Articles::FeaturedImageCredit).string().null())
                    .col(ColumnDef::new(Articles::CategoryId).integer().null())
                    .col(ColumnDef::new(Articles::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Articles::EditorId).integer().null())
                    .col(ColumnDef::new(Articles::Status).string_len(20).not_null().default("draft"))
                    .col(ColumnDef::new(Articles::IsBreaking).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::IsPinned).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::IsFeatured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::IsOpinion).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::IsFactChecked).boolean().not_null().default(false))
                    .col(ColumnDef::new(Articles::Language).string_len(10).not_null().default("en"))
                    .col(ColumnDef::new(Articles::LocationTag).string().null())
                    .col(ColumnDef::new(Articles::SourceAttribution).text().null())
                    .col(ColumnDef::new(Articles::SeoTitle).string().null())
                    .col(ColumnDef::new(Articles::SeoDescription).text().null())
                    .col(ColumnDef::new(Articles::ReadingTime).integer().not_null().default(1))
                    .col(ColumnDef::new(Articles::ViewCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Articles::LikeCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Articles::CommentCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Articles::PublishedAt).big_integer().null())
                    .col(ColumnDef::new(Articles::ScheduledPublishAt).big_integer().null())
                    .col(ColumnDef::new(Articles::ScheduledUnpublishAt).big_integer().null())
                    .col(ColumnDef::new(Articles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Articles::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_category_id")
                            .from(Articles::Table, Articles::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_author_id")
                            .from(Articles::Table, Articles::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_editor_id")
                            .from(Articles::Table, Articles::EditorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_status")
                    .table(Articles::Table)
                    .col(Articles::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_author_id")
                    .table(Articles::Table)
                    .col(Articles::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_published_at")
                    .table(Articles::Table)
                    .col(Articles::PublishedAt)
                    .to_owned(),
            )
            .await?;

        // Create article_versions table (append-only edit history)
        manager
            .create_table(
                Table::create()
                    .table(ArticleVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArticleVersions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ArticleVersions::ArticleId).integer().not_null())
                    .col(ColumnDef::new(ArticleVersions::VersionNumber).integer().not_null())
                    .col(ColumnDef::new(ArticleVersions::Headline).string().not_null())
                    .col(ColumnDef::new(ArticleVersions::Body).text().not_null())
                    .col(ColumnDef::new(ArticleVersions::ChangedBy).integer().null())
                    .col(ColumnDef::new(ArticleVersions::ChangeNote).text().null())
                    .col(ColumnDef::new(ArticleVersions::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_versions_article_id")
                            .from(ArticleVersions::Table, ArticleVersions::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_versions_changed_by")
                            .from(ArticleVersions::Table, ArticleVersions::ChangedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_article_versions_article_id")
                    .table(ArticleVersions::Table)
                    .col(ArticleVersions::ArticleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleVersions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    IsEnabled,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Headline,
    SubHeadline,
    Summary,
    Body,
    Slug,
    FeaturedImageUrl,
    FeaturedImageCaption,
    FeaturedImageAlt,
    FeaturedImageCredit,
    CategoryId,
    AuthorId,
    EditorId,
    Status,
    IsBreaking,
    IsPinned,
    IsFeatured,
    IsOpinion,
    IsFactChecked,
    Language,
    LocationTag,
    SourceAttribution,
    SeoTitle,
    SeoDescription,
    ReadingTime,
    ViewCount,
    LikeCount,
    CommentCount,
    PublishedAt,
    ScheduledPublishAt,
    ScheduledUnpublishAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ArticleVersions {
    Table,
    Id,
    ArticleId,
    VersionNumber,
    Headline,
    Body,
    ChangedBy,
    ChangeNote,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
