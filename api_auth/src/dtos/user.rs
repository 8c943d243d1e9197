use chrono::{DateTime, Utc};
use db::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-facing view of a user. The password hash and OTP fields are
/// simply not part of this type, so they can never serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub profile_image_url: Option<String>,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
            profile_image_url: user.profile_image_url,
            language: user.language,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_never_carries_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "user".to_string(),
            is_active: true,
            otp_hash: Some("hashed-otp".to_string()),
            otp_expires_at: Some(Utc::now()),
            profile_image_url: None,
            language: "en".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("otp_hash"));
        assert!(!object.contains_key("otp_expires_at"));
        assert_eq!(object["email"], "a@b.com");
    }
}
