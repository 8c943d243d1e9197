use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::booking::BookingCreateRequest,
    models::booking::{BOOKING_CANCELLED, BOOKING_CONFIRMED, Booking},
};

pub async fn insert_booking<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: BookingCreateRequest,
) -> Res<Booking> {
    sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (event_id, user_id, quantity, total_cents, reference)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.event_id)
    .bind(data.user_id)
    .bind(data.quantity)
    .bind(data.total_cents)
    .bind(data.reference)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_booking_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    booking_id: Uuid,
) -> Res<Option<Booking>> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(booking_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn list_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Booking>> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Flips a booking to cancelled only while it is still confirmed.
/// Returns `None` when the row is gone or already cancelled, so two
/// concurrent cancels cannot both free seats.
pub async fn cancel_if_confirmed<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    booking_id: Uuid,
) -> Res<Option<Booking>> {
    sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET status = $2, updated_at = now()
        WHERE id = $1 AND status = $3
        RETURNING *
        "#,
    )
    .bind(booking_id)
    .bind(BOOKING_CANCELLED)
    .bind(BOOKING_CONFIRMED)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
