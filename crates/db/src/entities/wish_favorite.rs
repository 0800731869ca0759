//! Wish favorite entity.

use sea_orm::entity::prelude::*;

/// Favorite (bookmark) membership. Never touches the wish like counter.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wish_favorite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Wish that was favorited.
    pub wish_id: String,

    /// User who favorited the wish.
    pub user_id: String,

    /// When the favorite was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::wish::Entity",
        from = "Column::WishId",
        to = "super::wish::Column::Id",
        on_delete = "Cascade"
    )]
    Wish,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::wish::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wish.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
