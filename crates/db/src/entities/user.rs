//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::job::Job;

/// Account role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Login email (stored lowercased)
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 PHC string. Never leaves the service layer.
    #[serde(skip_serializing)]
    pub password: String,

    pub role: Role,

    #[sea_orm(nullable)]
    pub job: Option<Job>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Whether this user holds admin rights.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wish::Entity")]
    Wishes,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::wish::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wishes.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
