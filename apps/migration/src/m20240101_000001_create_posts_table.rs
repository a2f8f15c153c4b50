//! Migration: Create the posts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Posts::Slug)
                            .string_len(191)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Posts::Content).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Posts::Language)
                            .string_len(10)
                            .not_null()
                            .default("en"),
                    )
                    .col(
                        ColumnDef::new(Posts::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings filter on status and language before paginating
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_status_language")
                    .table(Posts::Table)
                    .col(Posts::Status)
                    .col(Posts::Language)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created_at")
                    .table(Posts::Table)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Status,
    Language,
    Featured,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
}
