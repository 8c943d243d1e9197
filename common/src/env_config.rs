use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: database connection details,
/// JWT and OTP settings, server host and port, number of worker threads,
/// CORS settings, logging preferences and the outbound email client.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// How long an emailed one-time code stays valid, in minutes.
    pub otp_ttl_minutes: i64,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Configuration for the transactional email provider.
    pub email: EmailConfig,
}

#[derive(Clone, Debug)]
/// Credentials and addressing for the HTTP transactional email API.
pub struct EmailConfig {
    /// Endpoint of the email provider's send API.
    pub api_url: String,
    /// Bearer token for the email provider.
    pub api_key: String,
    /// Address outgoing mail is sent from.
    pub from_address: String,
    /// Display name outgoing mail is sent from.
    pub from_name: String,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication and the
/// server-side refresh tokens exchanged for new pairs.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for access tokens in minutes.
    pub access_ttl_minutes: i64,
    /// The expiration time for refresh tokens in days.
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// - `JWT_SECRET`: Required. The secret key for JWT signing.
    /// - `JWT_ACCESS_TTL_MINUTES`: Optional. Defaults to 60 minutes.
    /// - `JWT_REFRESH_TTL_DAYS`: Optional. Defaults to 7 days.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or if a TTL is set but cannot be
    /// parsed as a valid number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_ttl_minutes: env::var("JWT_ACCESS_TTL_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("JWT_ACCESS_TTL_MINUTES must be a valid number"),
            refresh_ttl_days: env::var("JWT_REFRESH_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("JWT_REFRESH_TTL_DAYS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT signing (via `JwtConfig::from_env()`)
    /// - `EMAIL_API_KEY`: Bearer token for the transactional email provider
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `OTP_TTL_MINUTES`: One-time code validity window (default: 30)
    /// - `EMAIL_API_URL`, `EMAIL_FROM_ADDRESS`, `EMAIL_FROM_NAME`
    ///
    /// # Panics
    ///
    /// Panics if required environment variables are missing or if numeric
    /// values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            otp_ttl_minutes: env::var("OTP_TTL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("OTP_TTL_MINUTES must be a valid number"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            email: EmailConfig {
                api_url: env::var("EMAIL_API_URL")
                    .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
                api_key: env::var("EMAIL_API_KEY").expect("EMAIL_API_KEY must be set"),
                from_address: env::var("EMAIL_FROM_ADDRESS")
                    .unwrap_or_else(|_| "no-reply@bookly.events".to_string()),
                from_name: env::var("EMAIL_FROM_NAME")
                    .unwrap_or_else(|_| "Bookly".to_string()),
            },
        })
    }
}
