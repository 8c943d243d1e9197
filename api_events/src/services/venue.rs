use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    misc::Role,
};
use db::{
    dtos::venue::{VenueCreateRequest, VenueUpdateRequest},
    models::venue::Venue,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::venue::{CreateVenueRequest, UpdateVenueRequest},
    services::access,
};

pub async fn list_venues(pool: &PgPool, claims: &JwtClaims) -> Res<Vec<Venue>> {
    access::require_role(claims, &[Role::Organizer, Role::Admin])?;
    db::venue::list_venues(pool).await
}

pub async fn create_venue(
    pool: &PgPool,
    claims: &JwtClaims,
    req: CreateVenueRequest,
) -> Res<Venue> {
    access::require_role(claims, &[Role::Admin])?;

    if req.capacity <= 0 {
        return Err(AppError::BadRequest(
            "Capacity must be positive".to_string(),
        ));
    }

    db::venue::insert_venue(
        pool,
        VenueCreateRequest {
            name: req.name,
            address: req.address,
            city: req.city,
            capacity: req.capacity,
        },
    )
    .await
}

pub async fn update_venue(
    pool: &PgPool,
    claims: &JwtClaims,
    venue_id: Uuid,
    req: UpdateVenueRequest,
) -> Res<Venue> {
    access::require_role(claims, &[Role::Admin])?;

    if db::venue::get_venue_by_id(pool, venue_id).await?.is_none() {
        return Err(AppError::NotFound("Venue not found".to_string()));
    }
    if matches!(req.capacity, Some(capacity) if capacity <= 0) {
        return Err(AppError::BadRequest(
            "Capacity must be positive".to_string(),
        ));
    }

    db::venue::update_venue(
        pool,
        venue_id,
        VenueUpdateRequest {
            name: req.name,
            address: req.address,
            city: req.city,
            capacity: req.capacity,
        },
    )
    .await
}

/// Deletion is blocked while any event still references the venue.
pub async fn delete_venue(pool: &PgPool, claims: &JwtClaims, venue_id: Uuid) -> Res<()> {
    access::require_role(claims, &[Role::Admin])?;

    if db::venue::get_venue_by_id(pool, venue_id).await?.is_none() {
        return Err(AppError::NotFound("Venue not found".to_string()));
    }
    if db::venue::is_referenced(pool, venue_id).await? {
        return Err(AppError::Conflict(
            "Venue is referenced by events and cannot be deleted".to_string(),
        ));
    }

    db::venue::delete_venue(pool, venue_id).await?;
    Ok(())
}
