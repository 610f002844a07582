//! Form checks shared by the registration page and the server.

use crate::keys::validate_key;

/// Minimum password length accepted by the identity provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Normalised registration input.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validate the registration form, returning the first problem as a message.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<Registration, String> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if validate_key(username).is_err() {
        return Err("Username cannot contain . $ # [ ] or /".to_string());
    }
    if email.is_empty() || !email.contains('@') {
        return Err("Please enter a valid email".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }

    Ok(Registration {
        username: username.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Validate the sign-in form.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    Ok((email, password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration_is_normalised() {
        let r = validate_registration(" ada ", " Ada@Example.com ", "secret1").unwrap();
        assert_eq!(r.username, "ada");
        assert_eq!(r.email, "ada@example.com");
        assert_eq!(r.password, "secret1");
    }

    #[test]
    fn test_registration_errors() {
        assert_eq!(
            validate_registration("", "a@b.c", "secret1").unwrap_err(),
            "Username is required"
        );
        assert!(validate_registration("a.b", "a@b.c", "secret1").is_err());
        assert_eq!(
            validate_registration("ada", "nope", "secret1").unwrap_err(),
            "Please enter a valid email"
        );
        assert_eq!(
            validate_registration("ada", "a@b.c", "123").unwrap_err(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("a@b.c", "").is_err());
        assert_eq!(
            validate_login(" A@B.c ", "pw").unwrap(),
            ("a@b.c".to_string(), "pw".to_string())
        );
    }
}
