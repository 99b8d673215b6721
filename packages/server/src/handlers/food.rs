use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{FoodStatus, Role};
use sea_orm::*;
use tracing::instrument;

use crate::entity::food;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::lifecycle::LifecycleEngine;
use crate::models::food::*;
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/food/my-foods",
    tag = "Food",
    operation_id = "myFoods",
    summary = "List the calling donor's food items",
    description = "Returns all items listed by the authenticated donor, newest first.",
    responses(
        (status = 200, description = "Donor's food items", body = [MyFoodItem]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(donor_id = auth_user.user_id))]
pub async fn my_foods(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MyFoodItem>>, AppError> {
    auth_user.require_role(Role::Donor)?;

    let items = food::Entity::find()
        .filter(food::Column::DonorId.eq(auth_user.user_id))
        .order_by_desc(food::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(MyFoodItem::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/food/add",
    tag = "Food",
    operation_id = "addFood",
    summary = "List a new food item",
    description = "Creates a new listing in `available` status. Donor only. All fields are required; `itemCategory` must be `cooked` or `packed`.",
    request_body = AddFoodRequest,
    responses(
        (status = 201, description = "Item added", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(donor_id = auth_user.user_id))]
pub async fn add_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddFoodRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_food(&payload)?;

    LifecycleEngine::new(&state.db)
        .create(auth_user.user_id, auth_user.role, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Item added successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/food/update/{id}",
    tag = "Food",
    operation_id = "updateFood",
    summary = "Edit an owned listing",
    description = "Partial merge of `foodName`, `quantity`, `expiryTime`, `address`. Fails once the item has been picked or delivered; a payload with no recognized fields is a validation error.",
    params(("id" = i32, Path, description = "Food item ID")),
    request_body = UpdateFoodRequest,
    responses(
        (status = 200, description = "Item updated", body = MessageResponse),
        (status = 400, description = "Validation error or state conflict", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(donor_id = auth_user.user_id, id))]
pub async fn update_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateFoodRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_update_food(&payload)?;

    LifecycleEngine::new(&state.db)
        .edit(auth_user.user_id, auth_user.role, id, payload)
        .await?;

    Ok(Json(MessageResponse::new("Food updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/food/delete/{id}",
    tag = "Food",
    operation_id = "deleteFood",
    summary = "Delete an owned listing",
    description = "Purges the record. Fails once the item has been picked or delivered.",
    params(("id" = i32, Path, description = "Food item ID")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "State conflict (STATE_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(donor_id = auth_user.user_id, id))]
pub async fn delete_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    LifecycleEngine::new(&state.db)
        .delete(auth_user.user_id, auth_user.role, id)
        .await?;

    Ok(Json(MessageResponse::new("Food deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/food/available",
    tag = "Food",
    operation_id = "availableFood",
    summary = "List claimable food items",
    description = "All items currently in `available` status, soonest expiry first. Open to volunteers and donors.",
    responses(
        (status = 200, description = "Available items", body = [AvailableFoodItem]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn available_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AvailableFoodItem>>, AppError> {
    auth_user.require_any_role(&[Role::Volunteer, Role::Donor])?;

    let items = food::Entity::find()
        .filter(food::Column::Status.eq(FoodStatus::Available))
        .order_by_asc(food::Column::ExpiryTime)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(AvailableFoodItem::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/food/reserve/{id}",
    tag = "Lifecycle",
    operation_id = "reserveFood",
    summary = "Reserve an available item",
    description = "Atomically claims the item for the calling volunteer. Exactly one of any number of concurrent reservers wins; the rest receive STATE_CONFLICT.",
    params(("id" = i32, Path, description = "Food item ID")),
    responses(
        (status = 200, description = "Reserved", body = MessageResponse),
        (status = 400, description = "Already reserved or unavailable (STATE_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id, id))]
pub async fn reserve_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    LifecycleEngine::new(&state.db)
        .reserve(auth_user.user_id, auth_user.role, id)
        .await?;

    Ok(Json(MessageResponse::new("Food reserved successfully")))
}

#[utoipa::path(
    post,
    path = "/api/food/pick/{id}",
    tag = "Lifecycle",
    operation_id = "pickFood",
    summary = "Mark a reserved item as picked up",
    description = "Only the volunteer holding the reservation can pick the item.",
    params(("id" = i32, Path, description = "Food item ID")),
    responses(
        (status = 200, description = "Picked", body = MessageResponse),
        (status = 400, description = "Not reserved by the caller (STATE_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id, id))]
pub async fn pick_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    LifecycleEngine::new(&state.db)
        .pick(auth_user.user_id, auth_user.role, id)
        .await?;

    Ok(Json(MessageResponse::new("Picked successfully")))
}

#[utoipa::path(
    post,
    path = "/api/food/unreserve/{id}",
    tag = "Lifecycle",
    operation_id = "unreserveFood",
    summary = "Release a reservation",
    description = "Returns a reserved item to the available pool and clears the reservation fields. Only legal before pickup.",
    params(("id" = i32, Path, description = "Food item ID")),
    responses(
        (status = 200, description = "Reservation released", body = MessageResponse),
        (status = 400, description = "Not reserved by the caller (STATE_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id, id))]
pub async fn unreserve_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    LifecycleEngine::new(&state.db)
        .unreserve(auth_user.user_id, auth_user.role, id)
        .await?;

    Ok(Json(MessageResponse::new("Removed from cart")))
}

#[utoipa::path(
    post,
    path = "/api/food/deliver/{id}",
    tag = "Lifecycle",
    operation_id = "deliverFood",
    summary = "Complete a delivery",
    description = "Transitions a picked item to `delivered`, records the delivery metadata, and credits the volunteer 10 karma points in the same transaction.",
    params(("id" = i32, Path, description = "Food item ID")),
    request_body = DeliverRequest,
    responses(
        (status = 200, description = "Delivered", body = MessageResponse),
        (status = 400, description = "Validation error or not picked by the caller", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(volunteer_id = auth_user.user_id, id))]
pub async fn deliver_food(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<DeliverRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_deliver(&payload)?;

    LifecycleEngine::new(&state.db)
        .deliver(auth_user.user_id, auth_user.role, id, payload)
        .await?;

    Ok(Json(MessageResponse::new("Delivered successfully. +10 Karma!")))
}

#[utoipa::path(
    get,
    path = "/api/food/my-cart",
    tag = "Food",
    operation_id = "myCart",
    summary = "List the calling volunteer's claimed items",
    description = "Reserved and picked items held by the authenticated volunteer, newest reservation first.",
    responses(
        (status = 200, description = "Cart contents", body = [CartItem]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id))]
pub async fn my_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartItem>>, AppError> {
    auth_user.require_role(Role::Volunteer)?;

    let items = food::Entity::find()
        .filter(food::Column::ReservedBy.eq(auth_user.user_id))
        .filter(food::Column::Status.is_in([FoodStatus::Reserved, FoodStatus::Picked]))
        .order_by_desc(food::Column::ReservedAt)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(CartItem::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/food/volunteer/deliveries",
    tag = "Food",
    operation_id = "volunteerDeliveries",
    summary = "List the calling volunteer's completed deliveries",
    description = "Delivered items attributed to the authenticated volunteer, newest first.",
    responses(
        (status = 200, description = "Delivery history", body = [DeliveryItem]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (ACCESS_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(volunteer_id = auth_user.user_id))]
pub async fn volunteer_deliveries(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryItem>>, AppError> {
    auth_user.require_role(Role::Volunteer)?;

    let items = food::Entity::find()
        .filter(food::Column::ReservedBy.eq(auth_user.user_id))
        .filter(food::Column::Status.eq(FoodStatus::Delivered))
        .order_by_desc(food::Column::DeliveredAt)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(DeliveryItem::from).collect()))
}
