pub mod food_status;
pub mod geo;
pub mod item_category;
pub mod role;

pub use food_status::FoodStatus;
pub use geo::GeoPoint;
pub use item_category::ItemCategory;
pub use role::Role;
