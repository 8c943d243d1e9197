use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::{ProfileUpdateRequest, UserUpsertRequest},
    models::user::User,
};

pub async fn exists_active_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND is_active)",
    )
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Creates a fresh inactive registration, or overwrites the pending one
/// if the email already exists. The `DO UPDATE` is guarded so an active
/// account is never clobbered; `None` means the email is taken.
pub async fn upsert_inactive_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserUpsertRequest,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, first_name, last_name, otp_hash, otp_expires_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO UPDATE SET
            password_hash = EXCLUDED.password_hash,
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            otp_hash = EXCLUDED.otp_hash,
            otp_expires_at = EXCLUDED.otp_expires_at,
            updated_at = now()
        WHERE NOT users.is_active
        RETURNING *
        "#,
    )
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.otp_hash)
    .bind(data.otp_expires_at)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_otp<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    otp_hash: &str,
    otp_expires_at: chrono::DateTime<chrono::Utc>,
) -> Res<()> {
    sqlx::query("UPDATE users SET otp_hash = $2, otp_expires_at = $3, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(otp_hash)
        .bind(otp_expires_at)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn activate_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET is_active = TRUE, otp_hash = NULL, otp_expires_at = NULL, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Stores a new password hash and clears the consumed reset code.
pub async fn update_password<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    password_hash: &str,
) -> Res<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $2, otp_hash = NULL, otp_expires_at = NULL, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn update_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: ProfileUpdateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            profile_image_url = COALESCE($4, profile_image_url),
            language = COALESCE($5, language),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.profile_image_url)
    .bind(data.language)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
