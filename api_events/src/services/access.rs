use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    misc::Role,
};

/// Parses the role claim and checks it against the allowed set.
pub fn require_role(claims: &JwtClaims, allowed: &[Role]) -> Res<Role> {
    let role = Role::from_str(&claims.role)
        .ok_or_else(|| AppError::Forbidden("Unknown role".to_string()))?;

    if allowed.contains(&role) {
        Ok(role)
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions".to_string(),
        ))
    }
}

pub fn is_admin(claims: &JwtClaims) -> bool {
    Role::from_str(&claims.role) == Some(Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(role: &str) -> JwtClaims {
        JwtClaims {
            user_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            role: role.to_string(),
            exp: 0,
        }
    }

    #[test]
    fn allows_listed_roles_only() {
        let organizer = claims("organizer");
        assert!(require_role(&organizer, &[Role::Organizer, Role::Admin]).is_ok());

        let user = claims("user");
        assert!(matches!(
            require_role(&user, &[Role::Organizer, Role::Admin]),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn rejects_unknown_roles() {
        let bogus = claims("root");
        assert!(require_role(&bogus, &[Role::Admin]).is_err());
        assert!(!is_admin(&bogus));
    }
}
