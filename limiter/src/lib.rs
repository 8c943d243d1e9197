use middleware::{credential::CredentialLimiter, global::GlobalLimiter};

pub mod middleware {
    pub mod credential;
    pub mod global;
}

pub fn global_middleware(permits_per_second: u32) -> GlobalLimiter {
    GlobalLimiter::new(permits_per_second)
}

/// Per-client damping for the credential endpoints (login, register,
/// OTP verification), keyed by peer address.
pub fn credential_middleware(permits_per_minute: u32) -> CredentialLimiter {
    CredentialLimiter::new(permits_per_minute)
}
