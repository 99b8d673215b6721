use common::{GeoPoint, Role};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 hash. Never logged, never serialized into a response model.
    pub password: String,
    pub phone: String,
    pub role: Role,
    pub address: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub location: GeoPoint,

    /// +10 per completed delivery. Never decremented.
    pub karma_points: i32,
    /// +1 per completed delivery. Never decremented.
    pub deliveries_completed: i32,

    pub is_active: bool,

    #[sea_orm(has_many)]
    pub donations: HasMany<super::food::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
