use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt::{self, ClaimsSpec},
    misc,
};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Hashes a password or one-time code with argon2.
pub fn hash_secret(secret: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash secret: {}", e)))
}

pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Authenticates an existing user by email and password.
/// Unknown email, inactive account and wrong password all map to 401
/// so the response does not leak which one failed.
pub async fn authenticate_user(pool: &PgPool, email: &str, password: &str) -> Res<User> {
    let user = db::user::get_user_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized(
            "Account has not been activated".to_string(),
        ));
    }

    if !verify_secret(password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(user)
}

/// Checks a submitted one-time code against the user's pending OTP.
pub fn check_otp(user: &User, submitted: &str) -> Res<()> {
    let (otp_hash, expires_at) = match (&user.otp_hash, user.otp_expires_at) {
        (Some(hash), Some(expires_at)) => (hash, expires_at),
        _ => {
            return Err(AppError::BadRequest(
                "No verification code was requested".to_string(),
            ));
        }
    };

    if expires_at < Utc::now() {
        return Err(AppError::BadRequest(
            "Verification code has expired".to_string(),
        ));
    }

    if !verify_secret(submitted, otp_hash) {
        return Err(AppError::BadRequest(
            "Invalid verification code".to_string(),
        ));
    }

    Ok(())
}

/// Issues a fresh one-time code for the user and stores its hash.
/// The plain code is returned for email dispatch only.
pub async fn issue_otp(pool: &PgPool, user_id: Uuid, ttl_minutes: i64) -> Res<String> {
    let code = misc::generate_otp();
    let otp_hash = hash_secret(&code)?;
    let expires_at = Utc::now() + Duration::minutes(ttl_minutes);
    db::user::set_otp(pool, user_id, &otp_hash, expires_at).await?;
    Ok(code)
}

/// Stores a new password hash, clears the consumed reset code and
/// revokes every outstanding refresh token for the user.
pub async fn reset_password(pool: &PgPool, user_id: Uuid, new_password: &str) -> Res<()> {
    let password_hash = hash_secret(new_password)?;
    db::user::update_password(pool, user_id, &password_hash).await?;
    db::refresh_token::delete_all_for_user(pool, user_id).await?;
    Ok(())
}

/// Issues a signed access token plus a persisted opaque refresh token.
pub async fn issue_token_pair(pool: &PgPool, user: &User, config: &Config) -> Res<(String, String)> {
    let access_token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        },
        &config.jwt_config,
    )?;

    let refresh_token = misc::random_hex(40);
    let expires_at = Utc::now() + Duration::days(config.jwt_config.refresh_ttl_days);
    db::refresh_token::insert_token(pool, user.id, &refresh_token, expires_at).await?;

    Ok((access_token, refresh_token))
}

/// Exchanges a stored refresh token for a new pair. Single-use: the old
/// row is deleted and the replacement inserted in one transaction, so a
/// failed rotation never leaves the user tokenless.
pub async fn rotate_refresh_token(
    pool: &PgPool,
    token: &str,
    config: &Config,
) -> Res<(String, String)> {
    let stored = db::refresh_token::get_by_token(pool, token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if stored.expires_at < Utc::now() {
        db::refresh_token::delete_by_token(pool, token).await?;
        return Err(AppError::Unauthorized(
            "Refresh token has expired".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let deleted = db::refresh_token::delete_by_token(&mut *tx, token).await?;
    token_was_consumed(deleted)?;

    let user = db::user::get_user_by_id(&mut *tx, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let new_refresh_token = misc::random_hex(40);
    let expires_at = Utc::now() + Duration::days(config.jwt_config.refresh_ttl_days);
    db::refresh_token::insert_token(&mut *tx, user.id, &new_refresh_token, expires_at).await?;

    tx.commit().await?;

    log::debug!("rotated refresh token for user {}", user.id);

    let access_token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        },
        &config.jwt_config,
    )?;

    Ok((access_token, new_refresh_token))
}

/// The rotation's DELETE must consume the presented row. Zero rows means
/// a concurrent request already exchanged this token; treating that as a
/// fresh 401 keeps refresh tokens single-use under load.
fn token_was_consumed(deleted_rows: u64) -> Res<()> {
    if deleted_rows == 0 {
        return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_otp(otp_hash: Option<String>, expires_at: Option<chrono::DateTime<Utc>>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "unused".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "user".to_string(),
            is_active: false,
            otp_hash,
            otp_expires_at: expires_at,
            profile_image_url: None,
            language: "en".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn hash_and_verify_round_trips() {
        let hash = hash_secret("Aa1!aaaa").unwrap();
        assert!(verify_secret("Aa1!aaaa", &hash));
        assert!(!verify_secret("Aa1!aaab", &hash));
    }

    #[test]
    fn verify_tolerates_garbage_hashes() {
        assert!(!verify_secret("anything", "not-a-phc-string"));
    }

    #[test]
    fn check_otp_accepts_matching_unexpired_code() {
        let hash = hash_secret("123456").unwrap();
        let user = user_with_otp(Some(hash), Some(Utc::now() + Duration::minutes(30)));
        assert!(check_otp(&user, "123456").is_ok());
    }

    #[test]
    fn check_otp_rejects_expired_code() {
        let hash = hash_secret("123456").unwrap();
        let user = user_with_otp(Some(hash), Some(Utc::now() - Duration::minutes(1)));
        assert!(matches!(
            check_otp(&user, "123456"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn check_otp_rejects_mismatched_code() {
        let hash = hash_secret("123456").unwrap();
        let user = user_with_otp(Some(hash), Some(Utc::now() + Duration::minutes(30)));
        assert!(matches!(
            check_otp(&user, "654321"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rotation_rejects_an_already_consumed_token() {
        assert!(matches!(
            token_was_consumed(0),
            Err(AppError::Unauthorized(_))
        ));
        assert!(token_was_consumed(1).is_ok());
    }

    #[test]
    fn check_otp_rejects_when_none_pending() {
        let user = user_with_otp(None, None);
        assert!(matches!(
            check_otp(&user, "123456"),
            Err(AppError::BadRequest(_))
        ));
    }
}
