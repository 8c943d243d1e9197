use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::venue::{VenueCreateRequest, VenueUpdateRequest},
    models::venue::Venue,
};

pub async fn list_venues<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Venue>> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_venue_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    venue_id: Uuid,
) -> Res<Option<Venue>> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
        .bind(venue_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_venue<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: VenueCreateRequest,
) -> Res<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        INSERT INTO venues (name, address, city, capacity)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.address)
    .bind(data.city)
    .bind(data.capacity)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_venue<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    venue_id: Uuid,
    data: VenueUpdateRequest,
) -> Res<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        UPDATE venues
        SET name = COALESCE($2, name),
            address = COALESCE($3, address),
            city = COALESCE($4, city),
            capacity = COALESCE($5, capacity),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(venue_id)
    .bind(data.name)
    .bind(data.address)
    .bind(data.city)
    .bind(data.capacity)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_venue<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    venue_id: Uuid,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM venues WHERE id = $1")
        .bind(venue_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn is_referenced<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    venue_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE venue_id = $1)")
        .bind(venue_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
