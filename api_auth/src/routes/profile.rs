use std::sync::Arc;

use actix_web::{Responder, get, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use db::dtos::user::ProfileUpdateRequest;
use sqlx::PgPool;

use crate::{
    dtos::user::{UpdateProfileRequest, UserResponse},
    services,
};

/// Retrieves the current authenticated user's profile.
///
/// # Output
/// - Success: sanitized user object
/// - Error: 401 without a valid token, 404 if the user row is gone
#[get("")]
async fn get_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::user::get_user_by_id(pg_pool, claims.user_id).await?;
    Success::ok(UserResponse::from(user))
}

/// Updates name, profile image and language for the current user.
/// Omitted fields keep their current value.
#[put("")]
async fn put_me(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpdateProfileRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();

    let user = services::user::update_profile(
        pg_pool,
        claims.user_id,
        ProfileUpdateRequest {
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image_url: req.profile_image_url,
            language: req.language,
        },
    )
    .await?;

    Success::ok(UserResponse::from(user))
}
