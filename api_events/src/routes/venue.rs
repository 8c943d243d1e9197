use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::venue::{CreateVenueRequest, UpdateVenueRequest},
    services,
};

#[get("")]
async fn get_venues(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let venues = services::venue::list_venues(pg_pool, &claims).await?;
    Success::ok(venues)
}

/// Creates a venue. Admin only.
#[post("")]
async fn post_venue(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateVenueRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let venue = services::venue::create_venue(pg_pool, &claims, req.into_inner()).await?;
    Success::created(venue)
}

#[put("/{id}")]
async fn put_venue(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateVenueRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let venue =
        services::venue::update_venue(pg_pool, &claims, path.into_inner(), req.into_inner())
            .await?;
    Success::ok(venue)
}

/// Deletes a venue no event references. 409 while referenced.
#[delete("/{id}")]
async fn delete_venue(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::venue::delete_venue(pg_pool, &claims, path.into_inner()).await?;
    Success::no_content()
}
