use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::refresh_token::RefreshToken;

pub async fn insert_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Res<RefreshToken> {
    sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    token: &str,
) -> Res<Option<RefreshToken>> {
    sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_by_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    token: &str,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Revokes every outstanding refresh token for a user.
/// Called after a password reset.
pub async fn delete_all_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
