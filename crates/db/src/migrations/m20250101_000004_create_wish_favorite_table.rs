//! Create wish_favorite table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishFavorite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishFavorite::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WishFavorite::WishId).string_len(32).not_null())
                    .col(ColumnDef::new(WishFavorite::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(WishFavorite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wish_favorite_wish")
                            .from(WishFavorite::Table, WishFavorite::WishId)
                            .to(Wish::Table, Wish::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wish_favorite_user")
                            .from(WishFavorite::Table, WishFavorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (wish_id, user_id) - one favorite per user per wish
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_favorite_wish_user")
                    .table(WishFavorite::Table)
                    .col(WishFavorite::WishId)
                    .col(WishFavorite::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's favorites)
        manager
            .create_index(
                Index::create()
                    .name("idx_wish_favorite_user_id")
                    .table(WishFavorite::Table)
                    .col(WishFavorite::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishFavorite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WishFavorite {
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
