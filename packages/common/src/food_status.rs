#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a food item during the donation lifecycle.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum FoodStatus {
    /// Listed by a donor, open for any volunteer to claim.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "available"))]
    Available,
    /// Claimed by a volunteer, waiting for pickup.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "reserved"))]
    Reserved,
    /// Physically collected by the reserving volunteer.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "picked"))]
    Picked,
    /// Handed over at the delivery address.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "delivered"))]
    Delivered,
    /// Expiry time passed while still available.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "expired"))]
    Expired,
}

impl FoodStatus {
    /// Returns true if no further transition can leave this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Expired)
    }

    /// Returns true if `next` is a legal transition out of this status.
    ///
    /// `Reserved -> Available` (unreserve) is the only backward edge.
    pub fn can_transition_to(&self, next: FoodStatus) -> bool {
        matches!(
            (self, next),
            (Self::Available, Self::Reserved)
                | (Self::Available, Self::Expired)
                | (Self::Reserved, Self::Picked)
                | (Self::Reserved, Self::Available)
                | (Self::Picked, Self::Delivered)
        )
    }

    /// All possible status values.
    pub const ALL: &'static [FoodStatus] = &[
        Self::Available,
        Self::Reserved,
        Self::Picked,
        Self::Delivered,
        Self::Expired,
    ];

    /// Returns the string representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Picked => "picked",
            Self::Delivered => "delivered",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for FoodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for FoodStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            FoodStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for FoodStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "picked" => Ok(Self::Picked),
            "delivered" => Ok(Self::Delivered),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
