use chrono::{DateTime, Utc};

/// Payload for creating (or overwriting an inactive) registration.
#[derive(Debug)]
pub struct UserUpsertRequest {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub otp_hash: String,
    pub otp_expires_at: DateTime<Utc>,
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub language: Option<String>,
}
