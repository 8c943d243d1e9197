use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use mailer::{EmailClient, EmailVerifier};
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, TokenPairResponse, VerifyOtpRequest,
};
use crate::services;
use crate::services::validation;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload containing registration information (email, password, names)
///
/// # Output
/// - Success: `{message, otp_sent}` after the activation code is emailed
/// - Error: 400 for a weak password or undeliverable email,
///   409 if an active account already uses the email
///
/// An existing **inactive** registration is overwritten and a fresh code
/// is sent, so an abandoned signup never blocks the address.
#[post("/register")]
async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    email_client: web::Data<Arc<EmailClient>>,
    verifier: web::Data<Arc<EmailVerifier>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    validation::validate_name("first_name", &req.first_name)?;
    validation::validate_name("last_name", &req.last_name)?;
    validation::validate_password_strength(&req.password)?;
    verifier.check_deliverable(&req.email).await?;

    if services::user::exists_active_user_by_email(pg_pool, &req.email).await? {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let (user, code) =
        services::user::register_user(pg_pool, &req.into_inner(), config.otp_ttl_minutes).await?;

    email_client
        .send_activation_code(&user.email, &user.first_name, &code, config.otp_ttl_minutes)
        .await?;

    Success::ok(RegisterResponse {
        message: "Registration successful. Check your email for the verification code."
            .to_string(),
        otp_sent: true,
    })
}

/// Activates an account with the emailed one-time code and signs the
/// user in.
///
/// # Output
/// - Success: `{user, access_token, refresh_token}`
/// - Error: 404 for an unknown email, 400 for a missing, expired or
///   mismatched code
#[post("/verify-otp")]
async fn post_verify_otp(
    req: web::Json<VerifyOtpRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let user = services::user::get_user_by_email(pg_pool, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    services::auth::check_otp(&user, &req.otp)?;

    let user = services::user::activate_user(pg_pool, user.id).await?;
    let (access_token, refresh_token) =
        services::auth::issue_token_pair(pg_pool, &user, &config).await?;

    Success::ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// Authenticates a user with email and password.
///
/// # Output
/// - Success: `{user, access_token, refresh_token}`
/// - Error: 401 for an unknown email, inactive account or wrong password
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let user =
        services::auth::authenticate_user(pg_pool, &login_data.email, &login_data.password).await?;
    let (access_token, refresh_token) =
        services::auth::issue_token_pair(pg_pool, &user, &config).await?;

    Success::ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// Starts the password reset flow by emailing a one-time code.
/// Works for inactive accounts too.
#[post("/forgot-password")]
async fn post_forgot_password(
    req: web::Json<ForgotPasswordRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    email_client: web::Data<Arc<EmailClient>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let user = services::user::get_user_by_email(pg_pool, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let code = services::auth::issue_otp(pg_pool, user.id, config.otp_ttl_minutes).await?;
    email_client
        .send_password_reset_code(&user.email, &user.first_name, &code, config.otp_ttl_minutes)
        .await?;

    Success::ok(MessageResponse {
        message: "Password reset code sent. Check your email.".to_string(),
    })
}

/// Completes the password reset flow. Requires the emailed code.
/// All outstanding refresh tokens are revoked on success.
#[post("/reset-password")]
async fn post_reset_password(
    req: web::Json<ResetPasswordRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let user = services::user::get_user_by_email(pg_pool, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    services::auth::check_otp(&user, &req.otp)?;
    validation::validate_password_strength(&req.new_password)?;

    services::auth::reset_password(pg_pool, user.id, &req.new_password).await?;

    Success::ok(MessageResponse {
        message: "Password has been reset. You can now log in.".to_string(),
    })
}

/// Exchanges a refresh token for a new token pair. Tokens are single
/// use; presenting the same token twice fails with 401.
#[post("/refresh-token")]
async fn post_refresh_token(
    req: web::Json<RefreshTokenRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let (access_token, refresh_token) =
        services::auth::rotate_refresh_token(pg_pool, &req.refresh_token, &config).await?;

    Success::ok(TokenPairResponse {
        access_token,
        refresh_token,
    })
}
