//! Create wish_like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishLike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WishLike::WishId).string_len(32).not_null())
                    .col(ColumnDef::new(WishLike::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(WishLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wish_like_wish")
                            .from(WishLike::Table, WishLike::WishId)
                            .to(Wish::Table, Wish::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wish_like_user")
                            .from(WishLike::Table, WishLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (wish_id, user_id) - one like per user per wish
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_like_wish_user")
                    .table(WishLike::Table)
                    .col(WishLike::WishId)
                    .col(WishLike::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's likes)
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_like_user_id")
                    .table(WishLike::Table)
                    .col(WishLike::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishLike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WishLike {
    Table,
    Id,
    WishId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Wish {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
