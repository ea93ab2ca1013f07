use lazy_regex::regex_is_match;

use crate::{models::auth::LoginRequest, Error, Result};

pub struct LoginValidator;

impl LoginValidator {
    /// Checks the login form before anything is sent. The email is trimmed;
    /// the password is passed through untouched.
    pub fn validate(email: &str, password: &str) -> Result<LoginRequest> {
        let email = email.trim();
        if !regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email) {
            return Err(Error::ValidationError {
                field: "email",
                reason: "INVALID_EMAIL",
            });
        }

        if password.is_empty() {
            return Err(Error::ValidationError {
                field: "password",
                reason: "PASSWORD_REQUIRED",
            });
        }

        Ok(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
