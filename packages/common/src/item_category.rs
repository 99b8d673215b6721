#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a listed food item. Only these two values are accepted at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Prepared meals, short shelf life.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cooked"))]
    Cooked,
    /// Sealed or packaged goods.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "packed"))]
    Packed,
}

impl ItemCategory {
    pub const ALL: &'static [ItemCategory] = &[Self::Cooked, Self::Packed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cooked => "cooked",
            Self::Packed => "packed",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid category string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid item category '{invalid}'. Valid values: cooked, packed")]
pub struct ParseCategoryError {
    invalid: String,
}

impl FromStr for ItemCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooked" => Ok(Self::Cooked),
            "packed" => Ok(Self::Packed),
            _ => Err(ParseCategoryError {
                invalid: s.to_string(),
            }),
        }
    }
}
