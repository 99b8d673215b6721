use chrono::{DateTime, Utc};
use common::{FoodStatus, GeoPoint, ItemCategory};
use serde::{Deserialize, Serialize};

use crate::entity::food;
use crate::error::AppError;

use super::shared::require_non_empty;

/// Request body for listing a new food item.
///
/// `itemCategory` is a closed enum, so anything outside {cooked, packed} is
/// rejected before the handler runs.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFoodRequest {
    #[schema(example = "Vegetable biryani")]
    pub food_name: String,
    #[schema(example = "5 boxes")]
    pub quantity: String,
    #[schema(example = "veg")]
    pub food_type: String,
    pub item_category: ItemCategory,
    /// Must be in the future for the listing to be useful; not enforced.
    pub expiry_time: DateTime<Utc>,
    pub location: GeoPoint,
    pub address: String,
    pub is_same_as_location: bool,
    /// Opaque base64 image blob.
    pub image: String,
}

pub fn validate_add_food(payload: &AddFoodRequest) -> Result<(), AppError> {
    require_non_empty(&payload.food_name, "foodName")?;
    require_non_empty(&payload.quantity, "quantity")?;
    require_non_empty(&payload.food_type, "foodType")?;
    require_non_empty(&payload.address, "address")?;
    require_non_empty(&payload.image, "image")?;
    if !payload.location.is_valid() {
        return Err(AppError::Validation("location is required".into()));
    }
    Ok(())
}

/// Request body for editing a listing. PATCH semantics: absent fields are
/// untouched. Only this subset is editable; category in particular is fixed
/// at creation.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFoodRequest {
    pub food_name: Option<String>,
    pub quantity: Option<String>,
    pub expiry_time: Option<DateTime<Utc>>,
    pub address: Option<String>,
}

impl UpdateFoodRequest {
    pub fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.quantity.is_none()
            && self.expiry_time.is_none()
            && self.address.is_none()
    }
}

pub fn validate_update_food(payload: &UpdateFoodRequest) -> Result<(), AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("No fields to update".into()));
    }
    Ok(())
}

/// Request body for completing a delivery.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliverRequest {
    pub delivery_address: String,
    /// Opaque base64 proof-of-delivery photo.
    pub delivery_image: String,
    pub delivery_notes: Option<String>,
}

pub fn validate_deliver(payload: &DeliverRequest) -> Result<(), AppError> {
    require_non_empty(&payload.delivery_address, "deliveryAddress")?;
    require_non_empty(&payload.delivery_image, "deliveryImage")?;
    Ok(())
}

/// Donor's view of one of their own listings.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyFoodItem {
    pub id: i32,
    pub food_name: String,
    pub quantity: String,
    pub food_type: String,
    pub item_category: ItemCategory,
    pub expiry_time: DateTime<Utc>,
    pub status: FoodStatus,
    pub address: String,
    pub image: String,
    pub is_same_as_location: bool,
}

impl From<food::Model> for MyFoodItem {
    fn from(m: food::Model) -> Self {
        Self {
            id: m.id,
            food_name: m.food_name,
            quantity: m.quantity,
            food_type: m.food_type,
            item_category: m.item_category,
            expiry_time: m.expiry_time,
            status: m.status,
            address: m.address,
            image: m.image,
            is_same_as_location: m.is_same_as_location,
        }
    }
}

/// Volunteer-facing view of a claimable listing.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFoodItem {
    pub id: i32,
    pub food_name: String,
    pub quantity: String,
    pub food_type: String,
    pub item_category: ItemCategory,
    pub expiry_time: DateTime<Utc>,
    pub address: String,
    pub location: GeoPoint,
    pub image: String,
}

impl From<food::Model> for AvailableFoodItem {
    fn from(m: food::Model) -> Self {
        Self {
            id: m.id,
            food_name: m.food_name,
            quantity: m.quantity,
            food_type: m.food_type,
            item_category: m.item_category,
            expiry_time: m.expiry_time,
            address: m.address,
            location: m.location,
            image: m.image,
        }
    }
}

/// Volunteer's cart entry: a reserved or picked item with its claim timestamps.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i32,
    pub food_name: String,
    pub quantity: String,
    pub food_type: String,
    pub item_category: ItemCategory,
    pub expiry_time: DateTime<Utc>,
    pub status: FoodStatus,
    pub address: String,
    pub location: GeoPoint,
    pub image: String,
    pub reserved_at: Option<DateTime<Utc>>,
    pub picked_at: Option<DateTime<Utc>>,
}

impl From<food::Model> for CartItem {
    fn from(m: food::Model) -> Self {
        Self {
            id: m.id,
            food_name: m.food_name,
            quantity: m.quantity,
            food_type: m.food_type,
            item_category: m.item_category,
            expiry_time: m.expiry_time,
            status: m.status,
            address: m.address,
            location: m.location,
            image: m.image,
            reserved_at: m.reserved_at,
            picked_at: m.picked_at,
        }
    }
}

/// A completed delivery in the volunteer's history.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub id: i32,
    pub food_name: String,
    pub quantity: String,
    pub item_category: ItemCategory,
    pub delivery_address: Option<String>,
    pub delivery_image: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl From<food::Model> for DeliveryItem {
    fn from(m: food::Model) -> Self {
        Self {
            id: m.id,
            food_name: m.food_name,
            quantity: m.quantity,
            item_category: m.item_category,
            delivery_address: m.delivery_address,
            delivery_image: m.delivery_image,
            delivered_at: m.delivered_at,
        }
    }
}
