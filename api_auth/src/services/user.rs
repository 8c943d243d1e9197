use chrono::{Duration, Utc};
use common::{
    error::{AppError, Res},
    misc,
};
use db::{dtos::user::{ProfileUpdateRequest, UserUpsertRequest}, models::user::User};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::auth::RegisterRequest, services::auth};

pub async fn exists_active_user_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    db::user::exists_active_user_by_email(pool, email).await
}

pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Res<Option<User>> {
    db::user::get_user_by_email(pool, email).await
}

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Creates an inactive registration (or overwrites a pending one) with a
/// hashed password and a fresh hashed OTP. Returns the user together with
/// the plain code for email dispatch.
pub async fn register_user(
    pool: &PgPool,
    req: &RegisterRequest,
    otp_ttl_minutes: i64,
) -> Res<(User, String)> {
    let password_hash = auth::hash_secret(&req.password)?;
    let code = misc::generate_otp();
    let otp_hash = auth::hash_secret(&code)?;

    let user = db::user::upsert_inactive_user(
        pool,
        UserUpsertRequest {
            email: req.email.clone(),
            password_hash,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            otp_hash,
            otp_expires_at: Utc::now() + Duration::minutes(otp_ttl_minutes),
        },
    )
    .await?;

    Ok((require_registration_slot(user)?, code))
}

/// The guarded upsert returns no row when the email already belongs to an
/// active account, even if that account activated after the caller's
/// duplicate check. Map that to the same 409 the pre-check gives.
fn require_registration_slot(user: Option<User>) -> Res<User> {
    user.ok_or_else(|| {
        AppError::Conflict("An account with this email already exists".to_string())
    })
}

pub async fn activate_user(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::activate_user(pool, user_id).await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    data: ProfileUpdateRequest,
) -> Res<User> {
    // confirm the row still exists so a stale token maps to 404, not 500
    get_user_by_id(pool, user_id).await?;
    db::user::update_profile(pool, user_id, data).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_over_an_active_account_is_a_conflict() {
        assert!(matches!(
            require_registration_slot(None),
            Err(AppError::Conflict(_))
        ));

        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "user".to_string(),
            is_active: false,
            otp_hash: Some("hashed-otp".to_string()),
            otp_expires_at: Some(Utc::now()),
            profile_image_url: None,
            language: "en".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            require_registration_slot(Some(user)).unwrap().email,
            "a@b.com"
        );
    }
}
