use std::sync::OnceLock;

use common::error::{AppError, Res};
use hickory_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
};
use regex::Regex;

/// Checks that an address is plausibly deliverable before we burn an OTP
/// email on it: syntax first, then an MX lookup on the domain.
pub struct EmailVerifier {
    resolver: TokioAsyncResolver,
}

/// Syntax check only, no network access.
pub fn validate_syntax(email: &str) -> Res<()> {
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    if email.len() > 254 {
        return Err(AppError::BadRequest(
            "Email must be at most 254 characters long".to_string(),
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }

    Ok(())
}

impl EmailVerifier {
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }

    /// Full plausibility check: syntax plus at least one MX record
    /// on the domain.
    pub async fn check_deliverable(&self, email: &str) -> Res<()> {
        validate_syntax(email)?;

        // validate_syntax guarantees the '@' is present
        let domain = email.rsplit('@').next().unwrap_or_default();

        let lookup = self
            .resolver
            .mx_lookup(domain)
            .await
            .map_err(|_| {
                AppError::BadRequest(format!("Email domain {} cannot receive mail", domain))
            })?;

        if lookup.iter().next().is_none() {
            return Err(AppError::BadRequest(format!(
                "Email domain {} has no MX records",
                domain
            )));
        }

        Ok(())
    }
}

impl Default for EmailVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_syntax("a@b.com").is_ok());
        assert!(validate_syntax("first.last+tag@sub.example.co.uk").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "no-at-sign", "@missing-local.com", "user@", "user@nodot", "user @a.com"] {
            assert!(validate_syntax(email).is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn rejects_oversized_addresses() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(validate_syntax(&email).is_err());
    }

    #[tokio::test]
    async fn deliverability_check_fails_fast_on_bad_syntax() {
        // rejected before any DNS traffic
        let verifier = EmailVerifier::new();
        assert!(verifier.check_deliverable("not-an-address").await.is_err());
    }
}
