use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::event::{CreateEventRequest, EventQuery, PublishRequest, UpdateEventRequest},
    services,
};

/// Lists published events, optionally filtered by `search`, `category`
/// and `city` query parameters.
#[get("")]
async fn get_events(
    query: web::Query<EventQuery>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let events = services::event::list_published(pg_pool, query.into_inner()).await?;
    Success::ok(events)
}

/// Public event detail. Unpublished events return 404.
#[get("/{id}")]
async fn get_event(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let event = services::event::get_published_event(pg_pool, path.into_inner()).await?;
    Success::ok(event)
}

/// Creates an event. Organizer or admin role required; events start out
/// unpublished.
#[post("")]
async fn post_event(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateEventRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let event = services::event::create_event(pg_pool, &claims, req.into_inner()).await?;
    Success::created(event)
}

/// Updates an event. Only its organizer or an admin may do so.
#[put("/{id}")]
async fn put_event(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateEventRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let event =
        services::event::update_event(pg_pool, &claims, path.into_inner(), req.into_inner())
            .await?;
    Success::ok(event)
}

/// Publishes or unpublishes an event.
#[post("/{id}/publish")]
async fn post_publish(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    req: web::Json<PublishRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let event =
        services::event::set_published(pg_pool, &claims, path.into_inner(), req.published).await?;
    Success::ok(event)
}

/// Deletes an event without bookings. 409 once bookings exist.
#[delete("/{id}")]
async fn delete_event(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::event::delete_event(pg_pool, &claims, path.into_inner()).await?;
    Success::no_content()
}
