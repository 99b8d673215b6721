use chrono::Utc;
use common::{FoodStatus, Role};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use crate::entity::{food, user};
use crate::error::AppError;
use crate::models::food::{AddFoodRequest, DeliverRequest, UpdateFoodRequest};

/// Karma awarded to the delivering volunteer per completed delivery.
pub const KARMA_PER_DELIVERY: i32 = 10;

/// The food lifecycle state machine.
///
/// Every mutating operation takes `(caller_id, caller_role)` explicitly and
/// checks the role before touching the store. Guarded transitions are single
/// conditional updates carrying the full guard in their filter; a
/// `rows_affected` of zero means the item was not in the expected state --
/// whether because of a concurrent caller or stale client data is
/// indistinguishable, and both surface as `StateConflict`.
pub struct LifecycleEngine<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> LifecycleEngine<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// List a new item. Initial status is always `available`.
    pub async fn create(
        &self,
        caller_id: i32,
        caller_role: Role,
        payload: AddFoodRequest,
    ) -> Result<food::Model, AppError> {
        if caller_role != Role::Donor {
            return Err(AppError::AccessDenied);
        }

        let item = food::ActiveModel {
            donor_id: Set(caller_id),
            food_name: Set(payload.food_name),
            quantity: Set(payload.quantity),
            food_type: Set(payload.food_type),
            item_category: Set(payload.item_category),
            expiry_time: Set(payload.expiry_time),
            location: Set(payload.location),
            address: Set(payload.address),
            is_same_as_location: Set(payload.is_same_as_location),
            image: Set(payload.image),
            status: Set(FoodStatus::Available),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = item.insert(self.conn).await?;
        debug!(food_id = model.id, donor_id = caller_id, "Food listed");
        Ok(model)
    }

    /// Claim an available item for the calling volunteer.
    ///
    /// Two concurrent reserves race at the store; the filter on
    /// `status == available` guarantees exactly one wins.
    pub async fn reserve(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
    ) -> Result<(), AppError> {
        if caller_role != Role::Volunteer {
            return Err(AppError::AccessDenied);
        }

        let result = food::Entity::update_many()
            .col_expr(food::Column::Status, Expr::value(FoodStatus::Reserved))
            .col_expr(food::Column::ReservedBy, Expr::value(Some(caller_id)))
            .col_expr(food::Column::ReservedAt, Expr::value(Some(Utc::now())))
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::Status.eq(FoodStatus::Available))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict(
                "Food already reserved or unavailable".into(),
            ));
        }

        debug!(food_id, volunteer_id = caller_id, "Food reserved");
        Ok(())
    }

    /// Mark a reserved item as physically collected by its reserving volunteer.
    pub async fn pick(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
    ) -> Result<(), AppError> {
        if caller_role != Role::Volunteer {
            return Err(AppError::AccessDenied);
        }

        let result = food::Entity::update_many()
            .col_expr(food::Column::Status, Expr::value(FoodStatus::Picked))
            .col_expr(food::Column::PickedAt, Expr::value(Some(Utc::now())))
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::Status.eq(FoodStatus::Reserved))
            .filter(food::Column::ReservedBy.eq(caller_id))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict("Pick failed".into()));
        }

        debug!(food_id, volunteer_id = caller_id, "Food picked up");
        Ok(())
    }

    /// Release a reservation, returning the item to the available pool.
    ///
    /// The only backward transition in the machine; clears the reservation
    /// fields so a different volunteer can claim the item afresh.
    pub async fn unreserve(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
    ) -> Result<(), AppError> {
        if caller_role != Role::Volunteer {
            return Err(AppError::AccessDenied);
        }

        let result = food::Entity::update_many()
            .col_expr(food::Column::Status, Expr::value(FoodStatus::Available))
            .col_expr(food::Column::ReservedBy, Expr::value(Option::<i32>::None))
            .col_expr(
                food::Column::ReservedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::Status.eq(FoodStatus::Reserved))
            .filter(food::Column::ReservedBy.eq(caller_id))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict("Unable to remove from cart".into()));
        }

        debug!(food_id, volunteer_id = caller_id, "Reservation released");
        Ok(())
    }

    /// Complete a delivery and credit the volunteer's karma.
    ///
    /// The item transition and the counter increments commit in one
    /// transaction, so an item can never end up delivered without its
    /// volunteer being credited.
    pub async fn deliver(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
        payload: DeliverRequest,
    ) -> Result<(), AppError> {
        if caller_role != Role::Volunteer {
            return Err(AppError::AccessDenied);
        }

        let txn = self.conn.begin().await?;

        let result = food::Entity::update_many()
            .col_expr(food::Column::Status, Expr::value(FoodStatus::Delivered))
            .col_expr(
                food::Column::DeliveryAddress,
                Expr::value(Some(payload.delivery_address)),
            )
            .col_expr(
                food::Column::DeliveryImage,
                Expr::value(Some(payload.delivery_image)),
            )
            .col_expr(
                food::Column::DeliveryNotes,
                Expr::value(Some(payload.delivery_notes.unwrap_or_default())),
            )
            .col_expr(food::Column::DeliveredAt, Expr::value(Some(Utc::now())))
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::Status.eq(FoodStatus::Picked))
            .filter(food::Column::ReservedBy.eq(caller_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::StateConflict("Delivery failed".into()));
        }

        user::Entity::update_many()
            .col_expr(
                user::Column::KarmaPoints,
                Expr::col(user::Column::KarmaPoints).add(KARMA_PER_DELIVERY),
            )
            .col_expr(
                user::Column::DeliveriesCompleted,
                Expr::col(user::Column::DeliveriesCompleted).add(1),
            )
            .filter(user::Column::Id.eq(caller_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        debug!(food_id, volunteer_id = caller_id, "Food delivered");
        Ok(())
    }

    /// Partially update an owned listing that has not yet been picked up.
    ///
    /// Returns `NotFound` when the item doesn't exist or belongs to another
    /// donor; the status guard rides in the update filter so a concurrent
    /// pickup between the ownership read and the write still loses cleanly.
    pub async fn edit(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
        payload: UpdateFoodRequest,
    ) -> Result<(), AppError> {
        if caller_role != Role::Donor {
            return Err(AppError::AccessDenied);
        }

        self.find_owned(caller_id, food_id).await?;

        let mut update = food::Entity::update_many()
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::DonorId.eq(caller_id))
            .filter(food::Column::Status.is_not_in([FoodStatus::Picked, FoodStatus::Delivered]));

        if let Some(food_name) = payload.food_name {
            update = update.col_expr(food::Column::FoodName, Expr::value(food_name));
        }
        if let Some(quantity) = payload.quantity {
            update = update.col_expr(food::Column::Quantity, Expr::value(quantity));
        }
        if let Some(expiry_time) = payload.expiry_time {
            update = update.col_expr(food::Column::ExpiryTime, Expr::value(expiry_time));
        }
        if let Some(address) = payload.address {
            update = update.col_expr(food::Column::Address, Expr::value(address));
        }

        let result = update.exec(self.conn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict(
                "Cannot edit picked or delivered food".into(),
            ));
        }

        debug!(food_id, donor_id = caller_id, "Food updated");
        Ok(())
    }

    /// Purge an owned listing that has not yet been picked up.
    pub async fn delete(
        &self,
        caller_id: i32,
        caller_role: Role,
        food_id: i32,
    ) -> Result<(), AppError> {
        if caller_role != Role::Donor {
            return Err(AppError::AccessDenied);
        }

        self.find_owned(caller_id, food_id).await?;

        let result = food::Entity::delete_many()
            .filter(food::Column::Id.eq(food_id))
            .filter(food::Column::DonorId.eq(caller_id))
            .filter(food::Column::Status.is_not_in([FoodStatus::Picked, FoodStatus::Delivered]))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict(
                "Cannot delete picked or delivered food".into(),
            ));
        }

        debug!(food_id, donor_id = caller_id, "Food deleted");
        Ok(())
    }

    async fn find_owned(&self, caller_id: i32, food_id: i32) -> Result<food::Model, AppError> {
        food::Entity::find_by_id(food_id)
            .filter(food::Column::DonorId.eq(caller_id))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Food not found".into()))
    }
}
