//! Department tag shared by users and wishes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job function a wish is filed under (closed set of eight).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum Job {
    #[sea_orm(string_value = "development")]
    Development,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "operations")]
    Operations,
    #[sea_orm(string_value = "administration")]
    Administration,
    #[sea_orm(string_value = "testing")]
    Testing,
    #[sea_orm(string_value = "hr")]
    Hr,
    #[sea_orm(string_value = "finance")]
    Finance,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_job_wire_format() {
        assert_eq!(serde_json::to_string(&Job::Hr).unwrap(), "\"hr\"");
        assert_eq!(
            serde_json::from_str::<Job>("\"development\"").unwrap(),
            Job::Development
        );
        assert!(serde_json::from_str::<Job>("\"marketing\"").is_err());
    }

    #[test]
    fn test_job_is_closed_set() {
        assert_eq!(Job::iter().count(), 8);
    }
}
