//! Authentication primitives: login credentials and password digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a store. Passwords
//! in flight are wrapped in [`Zeroizing`] so they are wiped on drop; at rest
//! only an Argon2id digest in PHC string format is ever held.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use zeroize::Zeroizing;

use super::{DomainError, DomainResult};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was empty.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authenticator.
///
/// ## Invariants
/// - Neither field is empty. The username is compared case-sensitively and
///   is deliberately not trimmed or normalised, so credential comparisons
///   see exactly what the visitor typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username exactly as submitted.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password exactly as submitted.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// One-way, salted password digest stored on the administrator record.
///
/// The PHC string embeds the algorithm, parameters, and salt, so a digest is
/// self-describing and verification never needs out-of-band state. Plaintext
/// never round-trips through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plaintext password with Argon2id and a fresh random salt.
    pub fn generate(password: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| DomainError::internal(format!("password hashing failed: {err}")))?;
        Ok(Self(hash.to_string()))
    }

    /// Reconstruct a digest from its stored PHC string.
    #[must_use]
    pub fn from_phc_string(phc: String) -> Self {
        Self(phc)
    }

    /// Verify a plaintext candidate against this digest.
    ///
    /// Returns `Ok(false)` for a mismatched password; other failures (for
    /// example a corrupt stored hash) surface as internal errors.
    pub fn verify(&self, password: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(&self.0)
            .map_err(|err| DomainError::internal(format!("stored password hash invalid: {err}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(DomainError::internal(format!(
                "password verification failed: {err}"
            ))),
        }
    }

    /// The PHC string for persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret", LoginValidationError::EmptyUsername)]
    #[case("", "", LoginValidationError::EmptyUsername)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    fn empty_fields_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("empty field should fail validation");
        assert_eq!(err, expected);
    }

    #[test]
    fn credentials_are_kept_verbatim() {
        let creds = LoginCredentials::try_from_parts(" User ", " pass ").expect("valid shape");
        assert_eq!(creds.username(), " User ");
        assert_eq!(creds.password(), " pass ");
    }

    #[test]
    fn digest_round_trip_verifies() {
        let digest = PasswordDigest::generate("testpassword").expect("hashing succeeds");
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(digest.verify("testpassword").expect("verify succeeds"));
        assert!(!digest.verify("wrong").expect("verify succeeds"));
    }

    #[test]
    fn corrupt_digest_is_an_internal_error() {
        let digest = PasswordDigest::from_phc_string("not-a-phc-string".to_owned());
        let err = digest.verify("anything").expect_err("should fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}
