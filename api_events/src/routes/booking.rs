use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::booking::CreateBookingRequest, services};

/// Books seats on a published event.
///
/// # Output
/// - Success: the confirmed booking with its reference code, 201
/// - Error: 404 unknown or unpublished event, 400 non-positive
///   quantity, 409 when the remaining capacity is insufficient
#[post("")]
async fn post_booking(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateBookingRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let booking =
        services::booking::create_booking(pg_pool, &claims, req.event_id, req.quantity).await?;
    Success::created(booking)
}

/// The caller's bookings, newest first.
#[get("")]
async fn get_bookings(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let bookings = services::booking::list_own_bookings(pg_pool, claims.user_id).await?;
    Success::ok(bookings)
}

/// Cancels a booking and frees its seats.
#[delete("/{id}")]
async fn delete_booking(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let booking = services::booking::cancel_booking(pg_pool, &claims, path.into_inner()).await?;
    Success::ok(booking)
}
