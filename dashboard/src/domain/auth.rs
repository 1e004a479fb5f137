//! Authentication primitives: validated credentials and session payloads.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the auth gateway.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::user::User;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not look like an address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials sent to the auth gateway.
///
/// ## Invariants
/// - `email` is trimmed, non-empty, and contains an `@`.
/// - `password` is non-empty but keeps caller-provided whitespace so
///   credential comparisons are not surprised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if !normalized.contains('@') {
            return Err(LoginValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the upstream login call.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as provided by the operator.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Bearer and refresh tokens issued by the backend on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    /// Bearer token attached to every upstream request.
    pub token: String,
    /// Refresh token stored alongside it.
    pub refresh_token: String,
}

/// Everything the gateway keeps for an authenticated operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Server-confirmed account record.
    pub user: User,
    /// Tokens for the upstream API.
    pub tokens: AuthTokens,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for credential validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("not-an-address", "pw", LoginValidationError::InvalidEmail)]
    #[case("admin@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn valid_credentials_trim_the_email() {
        let creds = LoginCredentials::try_from_parts("  admin@example.com  ", "secret")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "admin@example.com");
        assert_eq!(creds.password(), "secret");
    }
}
