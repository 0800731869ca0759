//! Wish entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::job::Job;

/// Wish lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum WishStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl WishStatus {
    /// Lowercase name as stored and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wish")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(indexed)]
    pub job: Job,

    /// Submitter display name
    pub submitter: String,

    /// Owner. NULL = anonymous submission, only admins may mutate it.
    #[sea_orm(nullable, indexed)]
    pub submitter_id: Option<String>,

    #[sea_orm(indexed)]
    pub status: WishStatus,

    /// Like count (denormalized from `wish_like`)
    #[sea_orm(default_value = 0)]
    pub likes: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SubmitterId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Submitter,

    #[sea_orm(has_many = "super::wish_like::Entity")]
    Likes,

    #[sea_orm(has_many = "super::wish_favorite::Entity")]
    Favorites,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submitter.def()
    }
}

impl Related<super::wish_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::wish_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
