use common::{
    env_config::EmailConfig,
    error::{AppError, Res},
};

/// Thin client for the transactional email provider's HTTP API.
/// Bodies are plain text; template wiring is out of scope.
pub struct EmailClient {
    http: reqwest::Client,
    config: EmailConfig,
}

impl EmailClient {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Sends the 6-digit activation code issued on registration.
    pub async fn send_activation_code(
        &self,
        to: &str,
        first_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Res<()> {
        let body = format!(
            "Hi {},\n\nYour Bookly activation code is {}.\n\nIt expires in {} minutes. If you did not create an account, you can ignore this email.",
            first_name, code, ttl_minutes
        );
        self.send(to, "Activate your Bookly account", &body).await
    }

    /// Sends the 6-digit code issued by the forgot-password flow.
    pub async fn send_password_reset_code(
        &self,
        to: &str,
        first_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Res<()> {
        let body = format!(
            "Hi {},\n\nYour Bookly password reset code is {}.\n\nIt expires in {} minutes. If you did not request a reset, you can ignore this email.",
            first_name, code, ttl_minutes
        );
        self.send(to, "Reset your Bookly password", &body).await
    }

    async fn send(&self, to: &str, subject: &str, text: &str) -> Res<()> {
        let payload = serde_json::json!({
            "from": format!("{} <{}>", self.config.from_name, self.config.from_address),
            "to": [to],
            "subject": subject,
            "text": text,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach email provider: {}", e)))?;

        if response.status().is_success() {
            log::debug!("email \"{}\" dispatched to {}", subject, to);
            Ok(())
        } else {
            Err(AppError::Internal(format!(
                "Email provider returned error status: {}",
                response.status()
            )))
        }
    }
}
