use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    misc,
};
use db::{dtos::booking::BookingCreateRequest, models::booking::Booking};
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::access;

/// Books seats on a published event. The event row is locked for the
/// duration of the transaction so two bookings cannot both claim the
/// last seats.
pub async fn create_booking(
    pool: &PgPool,
    claims: &JwtClaims,
    event_id: Uuid,
    quantity: i32,
) -> Res<Booking> {
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "Quantity must be positive".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let event = db::event::lock_event(&mut *tx, event_id)
        .await?
        .filter(|event| event.is_published)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if event.seats_remaining() < quantity {
        return Err(AppError::Conflict(format!(
            "Only {} seats left",
            event.seats_remaining()
        )));
    }

    db::event::add_booked_seats(&mut *tx, event_id, quantity).await?;

    let booking = db::booking::insert_booking(
        &mut *tx,
        BookingCreateRequest {
            event_id,
            user_id: claims.user_id,
            quantity,
            total_cents: booking_total(event.price_cents, quantity),
            reference: booking_reference(),
        },
    )
    .await?;

    tx.commit().await?;

    log::info!(
        "booking {} confirmed: {} x event {}",
        booking.reference,
        quantity,
        event_id
    );

    Ok(booking)
}

pub async fn list_own_bookings(pool: &PgPool, user_id: Uuid) -> Res<Vec<Booking>> {
    db::booking::list_by_user(pool, user_id).await
}

/// Cancels a booking and frees its seats in the same transaction.
/// Owners may cancel their own bookings; admins may cancel any.
pub async fn cancel_booking(pool: &PgPool, claims: &JwtClaims, booking_id: Uuid) -> Res<Booking> {
    let booking = db::booking::get_booking_by_id(pool, booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != claims.user_id && !access::is_admin(claims) {
        return Err(AppError::Forbidden(
            "Only the booking owner may cancel it".to_string(),
        ));
    }

    // the conditional UPDATE is the authoritative cancelled check, so a
    // second cancel racing this one finds no confirmed row and gets 400
    let mut tx = pool.begin().await?;
    let cancelled = db::booking::cancel_if_confirmed(&mut *tx, booking_id).await?;
    let booking = require_cancelled_row(cancelled)?;
    db::event::add_booked_seats(&mut *tx, booking.event_id, -booking.quantity).await?;
    tx.commit().await?;

    Ok(booking)
}

fn require_cancelled_row(row: Option<Booking>) -> Res<Booking> {
    row.ok_or_else(|| {
        AppError::BadRequest("Booking is already cancelled".to_string())
    })
}

fn booking_total(price_cents: i64, quantity: i32) -> i64 {
    price_cents * quantity as i64
}

fn booking_reference() -> String {
    format!("BK-{}", misc::random_hex(4).to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use db::models::booking::{BOOKING_CANCELLED, BOOKING_CONFIRMED};

    fn cancelled_booking() -> Booking {
        Booking {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            quantity: 2,
            status: BOOKING_CANCELLED.to_string(),
            total_cents: 5000,
            reference: "BK-DEADBEEF".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cancelling_twice_is_a_bad_request() {
        // no confirmed row left to flip
        assert!(matches!(
            require_cancelled_row(None),
            Err(AppError::BadRequest(_))
        ));

        let flipped = require_cancelled_row(Some(cancelled_booking())).unwrap();
        assert_eq!(flipped.status, BOOKING_CANCELLED);
    }

    #[test]
    fn total_scales_with_quantity() {
        assert_eq!(booking_total(2500, 4), 10_000);
        assert_eq!(booking_total(0, 10), 0);
    }

    #[test]
    fn reference_has_expected_shape() {
        let reference = booking_reference();
        assert!(reference.starts_with("BK-"));
        assert_eq!(reference.len(), 11);
        assert!(
            reference[3..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn confirmed_is_the_initial_status() {
        // guards against a silent rename in the model constants
        assert_eq!(BOOKING_CONFIRMED, "confirmed");
        assert_eq!(BOOKING_CANCELLED, "cancelled");
    }
}
