use axum::Json;
use axum::extract::State;
use common::{FoodStatus, Role};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{food, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::stats::*;
use crate::state::AppState;

async fn find_user(db: &DatabaseConnection, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

#[utoipa::path(
    get,
    path = "/api/food/donor-stats",
    tag = "Stats",
    operation_id = "donorStats",
    summary = "Donor dashboard counters",
    description = "Counts of the calling donor's listings: total, delivered, expired.",
    responses(
        (status = 200, description = "Donor counters", body = DonorStats),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(donor_id = auth_user.user_id))]
pub async fn donor_stats(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DonorStats>, AppError> {
    auth_user.require_role(Role::Donor)?;

    let own = food::Entity::find().filter(food::Column::DonorId.eq(auth_user.user_id));

    let total = own.clone().count(&state.db).await?;
    let delivered = own
        .clone()
        .filter(food::Column::Status.eq(FoodStatus::Delivered))
        .count(&state.db)
        .await?;
    let expired = own
        .filter(food::Column::Status.eq(FoodStatus::Expired))
        .count(&state.db)
        .await?;

    Ok(Json(DonorStats {
        total,
        delivered,
        expired,
    }))
}

#[utoipa::path(
    get,
    path = "/api/food/donor/profile",
    tag = "Stats",
    operation_id = "donorProfile",
    summary = "Calling donor's profile",
    responses(
        (status = 200, description = "Donor profile", body = DonorProfile),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(donor_id = auth_user.user_id))]
pub async fn donor_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DonorProfile>, AppError> {
    auth_user.require_role(Role::Donor)?;

    let donor = find_user(&state.db, auth_user.user_id).await?;

    Ok(Json(DonorProfile {
        name: donor.name,
        email: donor.email,
        phone: donor.phone,
        karma_points: donor.karma_points,
        deliveries_completed: donor.deliveries_completed,
        created_at: donor.created_at,
    }))
}

#[utoipa::path(
    get,
    path = "/api/food/volunteer/profile",
    tag = "Stats",
    operation_id = "volunteerProfile",
    summary = "Calling volunteer's profile with karma counters",
    responses(
        (status = 200, description = "Volunteer profile", body = VolunteerProfile),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id))]
pub async fn volunteer_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<VolunteerProfile>, AppError> {
    auth_user.require_role(Role::Volunteer)?;

    let volunteer = find_user(&state.db, auth_user.user_id).await?;

    Ok(Json(VolunteerProfile {
        name: volunteer.name,
        email: volunteer.email,
        karma_points: volunteer.karma_points,
        deliveries_completed: volunteer.deliveries_completed,
        created_at: volunteer.created_at,
    }))
}

#[utoipa::path(
    get,
    path = "/api/food/platform/stats",
    tag = "Stats",
    operation_id = "platformStats",
    summary = "Platform-wide counters",
    description = "Open to any authenticated user regardless of role.",
    responses(
        (status = 200, description = "Platform counters", body = PlatformStats),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn platform_stats(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PlatformStats>, AppError> {
    let total_posted = food::Entity::find().count(&state.db).await?;
    let total_delivered = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Delivered))
        .count(&state.db)
        .await?;
    let total_expired = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Expired))
        .count(&state.db)
        .await?;

    Ok(Json(PlatformStats {
        total_posted,
        total_delivered,
        total_expired,
    }))
}

#[utoipa::path(
    get,
    path = "/api/food/public/stats",
    tag = "Public",
    operation_id = "publicStats",
    summary = "Landing-page counters",
    description = "Unauthenticated. Food counters plus user counts by role.",
    responses(
        (status = 200, description = "Public counters", body = PublicStats),
    ),
)]
#[instrument(skip(state))]
pub async fn public_stats(State(state): State<AppState>) -> Result<Json<PublicStats>, AppError> {
    let total_posted = food::Entity::find().count(&state.db).await?;
    let total_delivered = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Delivered))
        .count(&state.db)
        .await?;
    let total_expired = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Expired))
        .count(&state.db)
        .await?;
    let donors = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Donor))
        .count(&state.db)
        .await?;
    let volunteers = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Volunteer))
        .count(&state.db)
        .await?;

    Ok(Json(PublicStats {
        total_posted,
        total_delivered,
        total_expired,
        donors,
        volunteers,
    }))
}

#[utoipa::path(
    get,
    path = "/api/food/public/donors",
    tag = "Public",
    operation_id = "publicDonors",
    summary = "Recently joined donors",
    description = "Unauthenticated. The 20 most recent donors, name and join date only.",
    responses(
        (status = 200, description = "Recent donors", body = [RecentDonor]),
    ),
)]
#[instrument(skip(state))]
pub async fn public_donors(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentDonor>>, AppError> {
    let donors = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Donor))
        .order_by_desc(user::Column::CreatedAt)
        .limit(20)
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Name)
        .column(user::Column::CreatedAt)
        .into_model::<RecentDonor>()
        .all(&state.db)
        .await?;

    Ok(Json(donors))
}

#[utoipa::path(
    get,
    path = "/api/food/public/deliveries",
    tag = "Public",
    operation_id = "publicDeliveries",
    summary = "Recently completed deliveries",
    description = "Unauthenticated. The 10 most recent deliveries for the public showcase.",
    responses(
        (status = 200, description = "Recent deliveries", body = [PublicDelivery]),
    ),
)]
#[instrument(skip(state))]
pub async fn public_deliveries(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicDelivery>>, AppError> {
    let deliveries = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Delivered))
        .order_by_desc(food::Column::DeliveredAt)
        .limit(10)
        .select_only()
        .column(food::Column::Id)
        .column(food::Column::FoodName)
        .column(food::Column::DeliveryImage)
        .column(food::Column::DeliveryAddress)
        .column(food::Column::DeliveredAt)
        .into_model::<PublicDelivery>()
        .all(&state.db)
        .await?;

    Ok(Json(deliveries))
}

#[utoipa::path(
    get,
    path = "/api/food/public/volunteers",
    tag = "Public",
    operation_id = "publicVolunteers",
    summary = "Volunteer roster",
    description = "Unauthenticated. All volunteers, id and name only.",
    responses(
        (status = 200, description = "Volunteers", body = [PublicVolunteer]),
    ),
)]
#[instrument(skip(state))]
pub async fn public_volunteers(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicVolunteer>>, AppError> {
    let volunteers = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Volunteer))
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Name)
        .into_model::<PublicVolunteer>()
        .all(&state.db)
        .await?;

    Ok(Json(volunteers))
}
