use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::food;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Sweeper scan and available-food listing:
    // SELECT ... FROM food WHERE status = ? AND expiry_time <= ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_food_status_expiry")
        .table(food::Entity)
        .col(food::Column::Status)
        .col(food::Column::ExpiryTime)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_food_status_expiry exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_food_status_expiry: {}", e);
        }
    }

    // Donor dashboard listing:
    // SELECT ... FROM food WHERE donor_id = ? ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_food_donor_created")
        .table(food::Entity)
        .col(food::Column::DonorId)
        .col(food::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_food_donor_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_food_donor_created: {}", e);
        }
    }

    // Volunteer cart and delivery history:
    // SELECT ... FROM food WHERE reserved_by = ? AND status IN (...)
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_food_reserved_by_status")
        .table(food::Entity)
        .col(food::Column::ReservedBy)
        .col(food::Column::Status)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_food_reserved_by_status exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_food_reserved_by_status: {}", e);
        }
    }

    Ok(())
}
