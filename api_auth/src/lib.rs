use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod auth;
    pub mod profile;
}
pub mod middleware {
    pub mod auth;
}

pub mod dtos {
    pub mod auth;
    pub mod user;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
    pub(crate) mod validation;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_verify_otp)
        .service(routes::auth::post_login)
        .service(routes::auth::post_forgot_password)
        .service(routes::auth::post_reset_password)
        .service(routes::auth::post_refresh_token)
}

pub fn mount_profile() -> actix_web::Scope {
    web::scope("/me")
        .service(routes::profile::get_me)
        .service(routes::profile::put_me)
}

/// Rejects requests whose bearer token was absent or failed validation
/// in the extraction middleware.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
