use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::event::{EventCreateRequest, EventFilter, EventUpdateRequest},
    models::event::Event,
};

pub async fn list_published<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    filter: EventFilter,
) -> Res<Vec<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT e.*
        FROM events e
        JOIN venues v ON v.id = e.venue_id
        WHERE e.is_published
          AND ($1::text IS NULL
               OR e.title ILIKE '%' || $1 || '%'
               OR e.description ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR e.category = $2)
          AND ($3::text IS NULL OR v.city ILIKE $3)
        ORDER BY e.starts_at
        "#,
    )
    .bind(filter.search)
    .bind(filter.category)
    .bind(filter.city)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_event_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
) -> Res<Option<Event>> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Loads an event row under `FOR UPDATE` so seat accounting in the
/// surrounding transaction cannot race a concurrent booking.
pub async fn lock_event<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
) -> Res<Option<Event>> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
        .bind(event_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_event<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: EventCreateRequest,
) -> Res<Event> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events
            (title, description, venue_id, category, tags, starts_at, ends_at,
             price_cents, capacity, organizer_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(data.title)
    .bind(data.description)
    .bind(data.venue_id)
    .bind(data.category)
    .bind(data.tags)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(data.price_cents)
    .bind(data.capacity)
    .bind(data.organizer_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_event<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
    data: EventUpdateRequest,
) -> Res<Event> {
    sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            venue_id = COALESCE($4, venue_id),
            category = COALESCE($5, category),
            tags = COALESCE($6, tags),
            starts_at = COALESCE($7, starts_at),
            ends_at = COALESCE($8, ends_at),
            price_cents = COALESCE($9, price_cents),
            capacity = COALESCE($10, capacity),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(data.title)
    .bind(data.description)
    .bind(data.venue_id)
    .bind(data.category)
    .bind(data.tags)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(data.price_cents)
    .bind(data.capacity)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_published<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
    published: bool,
) -> Res<Event> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET is_published = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(event_id)
    .bind(published)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_event<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn add_booked_seats<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
    delta: i32,
) -> Res<()> {
    sqlx::query("UPDATE events SET seats_booked = seats_booked + $2, updated_at = now() WHERE id = $1")
        .bind(event_id)
        .bind(delta)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn has_bookings<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    event_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bookings WHERE event_id = $1)")
        .bind(event_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
