use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    misc::Role,
};
use db::{
    dtos::event::{EventCreateRequest, EventFilter, EventUpdateRequest},
    models::event::Event,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::event::{CreateEventRequest, EventQuery, UpdateEventRequest},
    services::access,
};

pub async fn list_published(pool: &PgPool, query: EventQuery) -> Res<Vec<Event>> {
    db::event::list_published(
        pool,
        EventFilter {
            search: query.search,
            category: query.category,
            city: query.city,
        },
    )
    .await
}

/// Public detail view. Unpublished events are indistinguishable from
/// missing ones.
pub async fn get_published_event(pool: &PgPool, event_id: Uuid) -> Res<Event> {
    db::event::get_event_by_id(pool, event_id)
        .await?
        .filter(|event| event.is_published)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}

pub async fn create_event(
    pool: &PgPool,
    claims: &JwtClaims,
    req: CreateEventRequest,
) -> Res<Event> {
    access::require_role(claims, &[Role::Organizer, Role::Admin])?;
    validate_schedule(req.starts_at, req.ends_at)?;
    validate_capacity(req.capacity)?;

    if db::venue::get_venue_by_id(pool, req.venue_id).await?.is_none() {
        return Err(AppError::BadRequest("Venue does not exist".to_string()));
    }

    db::event::insert_event(
        pool,
        EventCreateRequest {
            title: req.title,
            description: req.description,
            venue_id: req.venue_id,
            category: req.category,
            tags: req.tags,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            price_cents: req.price_cents,
            capacity: req.capacity,
            organizer_id: claims.user_id,
        },
    )
    .await
}

pub async fn update_event(
    pool: &PgPool,
    claims: &JwtClaims,
    event_id: Uuid,
    req: UpdateEventRequest,
) -> Res<Event> {
    let event = get_owned_event(pool, claims, event_id).await?;

    if let (Some(starts_at), Some(ends_at)) = (
        req.starts_at.or(Some(event.starts_at)),
        req.ends_at.or(Some(event.ends_at)),
    ) {
        validate_schedule(starts_at, ends_at)?;
    }
    if let Some(capacity) = req.capacity {
        validate_capacity(capacity)?;
        if capacity < event.seats_booked {
            return Err(AppError::BadRequest(
                "Capacity cannot drop below seats already booked".to_string(),
            ));
        }
    }
    if let Some(venue_id) = req.venue_id {
        if db::venue::get_venue_by_id(pool, venue_id).await?.is_none() {
            return Err(AppError::BadRequest("Venue does not exist".to_string()));
        }
    }

    db::event::update_event(
        pool,
        event_id,
        EventUpdateRequest {
            title: req.title,
            description: req.description,
            venue_id: req.venue_id,
            category: req.category,
            tags: req.tags,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            price_cents: req.price_cents,
            capacity: req.capacity,
        },
    )
    .await
}

pub async fn set_published(
    pool: &PgPool,
    claims: &JwtClaims,
    event_id: Uuid,
    published: bool,
) -> Res<Event> {
    get_owned_event(pool, claims, event_id).await?;
    db::event::set_published(pool, event_id, published).await
}

/// Deleting is blocked once bookings exist; unpublish instead.
pub async fn delete_event(pool: &PgPool, claims: &JwtClaims, event_id: Uuid) -> Res<()> {
    get_owned_event(pool, claims, event_id).await?;

    if db::event::has_bookings(pool, event_id).await? {
        return Err(AppError::Conflict(
            "Event has bookings and cannot be deleted".to_string(),
        ));
    }

    db::event::delete_event(pool, event_id).await?;
    Ok(())
}

/// Loads an event and checks the caller may manage it: its organizer,
/// or any admin.
async fn get_owned_event(pool: &PgPool, claims: &JwtClaims, event_id: Uuid) -> Res<Event> {
    access::require_role(claims, &[Role::Organizer, Role::Admin])?;

    let event = db::event::get_event_by_id(pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if event.organizer_id != claims.user_id && !access::is_admin(claims) {
        return Err(AppError::Forbidden(
            "Only the organizer may manage this event".to_string(),
        ));
    }

    Ok(event)
}

fn validate_schedule(
    starts_at: chrono::DateTime<chrono::Utc>,
    ends_at: chrono::DateTime<chrono::Utc>,
) -> Res<()> {
    if ends_at <= starts_at {
        return Err(AppError::BadRequest(
            "Event must end after it starts".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Res<()> {
    if capacity <= 0 {
        return Err(AppError::BadRequest(
            "Capacity must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn schedule_must_be_forward() {
        let now = Utc::now();
        assert!(validate_schedule(now, now + Duration::hours(2)).is_ok());
        assert!(validate_schedule(now, now).is_err());
        assert!(validate_schedule(now, now - Duration::hours(1)).is_err());
    }

    #[test]
    fn capacity_must_be_positive() {
        assert!(validate_capacity(100).is_ok());
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(-5).is_err());
    }
}
