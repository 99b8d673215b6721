use std::time::Duration;

use chrono::Utc;
use common::FoodStatus;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::SweeperConfig;
use crate::entity::food;

/// Run the expiry sweeper as a background task until the token is cancelled.
///
/// Purely periodic, no jitter. A failed tick is logged and the next tick
/// retries; the underlying bulk update is atomic, so no item is ever left
/// half-transitioned.
pub async fn run_expiry_sweeper(
    db: DatabaseConnection,
    config: SweeperConfig,
    shutdown: CancellationToken,
) {
    let scan_interval = Duration::from_secs(config.scan_interval_secs);

    info!(
        scan_interval_secs = config.scan_interval_secs,
        "Starting expiry sweeper"
    );

    let mut interval = tokio::time::interval(scan_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match expire_stale_food(&db).await {
                    Ok(0) => {}
                    Ok(expired) => info!(expired, "Expired stale food listings"),
                    Err(e) => error!(error = %e, "Expiry sweep failed"),
                }
            }
            _ = shutdown.cancelled() => {
                info!("Expiry sweeper stopped");
                return;
            }
        }
    }
}

/// Transition every available item whose expiry time has passed to `expired`.
///
/// One bulk conditional update; idempotent because the status filter
/// excludes items already expired.
pub async fn expire_stale_food(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let result = food::Entity::update_many()
        .col_expr(food::Column::Status, Expr::value(FoodStatus::Expired))
        .filter(food::Column::Status.eq(FoodStatus::Available))
        .filter(food::Column::ExpiryTime.lte(Utc::now()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
