use common::error::{AppError, Res};

/// Password policy applied on register and reset.
pub fn validate_password_strength(password: &str) -> Res<()> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AppError::BadRequest(
            "Password must be at most 128 characters long".to_string(),
        ));
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;

    for c in password.chars() {
        if c.is_ascii_uppercase() {
            has_upper = true;
        } else if c.is_ascii_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        }
    }

    if !has_upper || !has_lower || !has_digit {
        return Err(AppError::BadRequest(
            "Password must contain an uppercase letter, a lowercase letter and a digit"
                .to_string(),
        ));
    }

    Ok(())
}

pub fn validate_name(field: &str, value: &str) -> Res<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    if value.len() > 64 {
        return Err(AppError::BadRequest(format!(
            "{} must be at most 64 characters long",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_policy_compliant_passwords() {
        assert!(validate_password_strength("Aa1!aaaa").is_ok());
        assert!(validate_password_strength("Sup3rSecret").is_ok());
    }

    #[test]
    fn rejects_weak_passwords() {
        for password in ["", "short1A", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            assert!(
                validate_password_strength(password).is_err(),
                "accepted {:?}",
                password
            );
        }
    }

    #[test]
    fn rejects_blank_names() {
        assert!(validate_name("first_name", "  ").is_err());
        assert!(validate_name("first_name", "Ada").is_ok());
    }
}
