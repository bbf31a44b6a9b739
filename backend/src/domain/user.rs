//! The single administrative user and its validated inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::auth::PasswordDigest;

/// Stable user identifier assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The administrator record.
///
/// The deployment holds at most one user; login and settings always operate
/// on the first row. The core never deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Name shown on rendered pages, at most 20 characters.
    pub display_name: String,
    /// Login name, compared case-sensitively. Empty until the `admin`
    /// command claims the account.
    pub username: String,
    /// Argon2id digest of the password; plaintext is never stored. Absent
    /// until credentials are set, in which case login fails closed.
    pub password_hash: Option<PasswordDigest>,
}

/// True iff the display name is non-empty and at most 20 characters.
#[must_use]
pub fn display_name_is_valid(name: &str) -> bool {
    !name.is_empty() && name.chars().count() <= 20
}

/// Validation failure for the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayNameValidationError {
    /// Name empty or longer than 20 characters.
    InvalidName,
}

impl fmt::Display for DisplayNameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "display name must be 1-20 characters"),
        }
    }
}

impl std::error::Error for DisplayNameValidationError {}

/// Validated display name from the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Construct from the raw `name` form field.
    pub fn try_new(name: &str) -> Result<Self, DisplayNameValidationError> {
        if !display_name_is_valid(name) {
            return Err(DisplayNameValidationError::InvalidName);
        }
        Ok(Self(name.to_owned()))
    }

    /// The validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input for creating the administrator (bootstrap paths only).
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Initial display name.
    pub display_name: String,
    /// Login name; empty when seeding without credentials.
    pub username: String,
    /// Pre-hashed password digest, when credentials are known at creation.
    pub password_hash: Option<PasswordDigest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Grey Li", true)]
    #[case("", false)]
    fn display_name_bounds(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(display_name_is_valid(name), expected);
    }

    #[test]
    fn display_name_boundary_is_twenty_characters() {
        let at_limit = "n".repeat(20);
        let over_limit = "n".repeat(21);
        assert!(DisplayName::try_new(&at_limit).is_ok());
        assert_eq!(
            DisplayName::try_new(&over_limit),
            Err(DisplayNameValidationError::InvalidName)
        );
    }
}
