use rand::{Rng, RngCore, rngs::OsRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Organizer,
    Admin,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "organizer" => Some(Role::Organizer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => "user".to_string(),
            Role::Organizer => "organizer".to_string(),
            Role::Admin => "admin".to_string(),
        }
    }
}

/// Generates `num_bytes` of OS randomness, hex-encoded.
/// Used for refresh tokens and booking references.
pub fn random_hex(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Generates a 6-digit one-time code, zero-padded.
pub fn generate_otp() -> String {
    format!("{:06}", OsRng.gen_range(0..1_000_000u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn random_hex_has_expected_length() {
        let token = random_hex(40);
        assert_eq!(token.len(), 80);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn random_hex_does_not_repeat() {
        assert_ne!(random_hex(40), random_hex(40));
    }

    #[test]
    fn role_round_trips() {
        for role in [Role::User, Role::Organizer, Role::Admin] {
            assert_eq!(Role::from_str(&role.to_string()), Some(role));
        }
        assert_eq!(Role::from_str("superuser"), None);
    }
}
