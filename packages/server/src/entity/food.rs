use common::{FoodStatus, GeoPoint, ItemCategory};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub donor_id: i32,
    #[sea_orm(belongs_to, from = "donor_id", to = "id")]
    pub donor: HasOne<super::user::Entity>,

    pub food_name: String,
    pub quantity: String,
    pub food_type: String,
    pub item_category: ItemCategory,

    pub expiry_time: DateTimeUtc,
    #[sea_orm(column_type = "JsonBinary")]
    pub location: GeoPoint,
    pub address: String,
    pub is_same_as_location: bool,
    /// Opaque base64 blob, passed through untouched.
    pub image: String,

    /// Single source of truth for the lifecycle position. Every transition
    /// is a conditional update filtered on the expected current value.
    pub status: FoodStatus,

    /// Set while reserved/picked; kept on delivered items for history.
    /// Cleared only by unreserve.
    pub reserved_by: Option<i32>,
    pub reserved_at: Option<DateTimeUtc>,
    pub picked_at: Option<DateTimeUtc>,
    pub delivered_at: Option<DateTimeUtc>,

    pub delivery_address: Option<String>,
    pub delivery_image: Option<String>,
    pub delivery_notes: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
