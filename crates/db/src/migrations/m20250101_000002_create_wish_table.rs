//! Create wish table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wish::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Wish::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Wish::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Wish::Description).text().not_null())
                    .col(ColumnDef::new(Wish::Job).string_len(32).not_null())
                    .col(ColumnDef::new(Wish::Submitter).string_len(100).not_null())
                    .col(ColumnDef::new(Wish::SubmitterId).string_len(32))
                    .col(
                        ColumnDef::new(Wish::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Wish::Likes)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Wish::Likes).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Wish::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Wish::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wish_submitter")
                            .from(Wish::Table, Wish::SubmitterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (status, created_at) - default listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_status_created_at")
                    .table(Wish::Table)
                    .col(Wish::Status)
                    .col(Wish::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: submitter_id (for "my wishes")
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_submitter_id")
                    .table(Wish::Table)
                    .col(Wish::SubmitterId)
                    .to_owned(),
            )
            .await?;

        // Index: job (for department filtering)
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_job")
                    .table(Wish::Table)
                    .col(Wish::Job)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wish::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Wish {
    Table,
    Id,
    Title,
    Description,
    Job,
    Submitter,
    SubmitterId,
    Status,
    Likes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
