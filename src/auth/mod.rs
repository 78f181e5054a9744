pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::Caller;
pub use middleware::{authenticate, AuthMiddleware};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenKeys};

/// Payload of `POST /api/auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name; any non-blank text up to 100 characters.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Login key for the account. Must be a valid email address.
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Payload of `POST /api/auth/login`.
///
/// Deliberately carries no format rules: a malformed email simply matches no
/// account and gets the same answer as a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body of a successful signup or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// Bearer token for the `Authorization` header of later requests.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank_name = SignupRequest {
            name: "".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(blank_name.validate().is_err());

        let invalid_email = SignupRequest {
            name: "Ada".to_string(),
            email: "adaexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let short_password = SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let parsed: Result<LoginRequest, _> =
            serde_json::from_str(r#"{"email": "ada@example.com"}"#);
        assert!(parsed.is_err());

        let parsed: LoginRequest =
            serde_json::from_str(r#"{"email": "not-an-email", "password": "x"}"#).unwrap();
        assert_eq!(parsed.email, "not-an-email");
    }
}
