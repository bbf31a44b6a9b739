//! Movie entity and validated draft input.
//!
//! The field predicates here are the single source of truth for form
//! validation: a [`MovieDraft`] cannot be constructed from invalid input, so
//! every movie that reaches a store already satisfies the constraints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable movie identifier assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A watchlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Stable identifier.
    pub id: MovieId,
    /// Title, 1-60 characters.
    pub title: String,
    /// Release year, exactly four characters, kept as text.
    pub year: String,
}

/// True iff the title is non-empty and at most 60 characters.
#[must_use]
pub fn title_is_valid(title: &str) -> bool {
    !title.is_empty() && title.chars().count() <= 60
}

/// True iff the year is exactly four characters.
///
/// This counts characters rather than checking a numeric range: any
/// four-character token passes, matching the deployed behaviour.
#[must_use]
pub fn year_is_valid(year: &str) -> bool {
    year.chars().count() == 4
}

/// Validation failure for movie form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieValidationError {
    /// Title empty or longer than 60 characters.
    InvalidTitle,
    /// Year not exactly four characters.
    InvalidYear,
}

impl fmt::Display for MovieValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must be 1-60 characters"),
            Self::InvalidYear => write!(f, "year must be exactly 4 characters"),
        }
    }
}

impl std::error::Error for MovieValidationError {}

/// Validated movie form input, used for both create and edit.
///
/// ## Invariants
/// - `title` satisfies [`title_is_valid`], `year` satisfies
///   [`year_is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    title: String,
    year: String,
}

impl MovieDraft {
    /// Construct a draft from raw form fields, validating every field.
    pub fn try_from_parts(title: &str, year: &str) -> Result<Self, MovieValidationError> {
        if !title_is_valid(title) {
            return Err(MovieValidationError::InvalidTitle);
        }
        if !year_is_valid(year) {
            return Err(MovieValidationError::InvalidYear);
        }
        Ok(Self {
            title: title.to_owned(),
            year: year.to_owned(),
        })
    }

    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Validated year.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Leon", true)]
    #[case("", false)]
    #[case("a", true)]
    fn title_length_bounds(#[case] title: &str, #[case] expected: bool) {
        assert_eq!(title_is_valid(title), expected);
    }

    #[test]
    fn title_boundary_is_sixty_characters() {
        let at_limit = "x".repeat(60);
        let over_limit = "x".repeat(61);
        assert!(title_is_valid(&at_limit));
        assert!(!title_is_valid(&over_limit));
    }

    #[rstest]
    #[case("1988", true)]
    #[case("19XX", true)] // character count, not a numeric check
    #[case("", false)]
    #[case("123", false)]
    #[case("20233", false)]
    fn year_must_be_four_characters(#[case] year: &str, #[case] expected: bool) {
        assert_eq!(year_is_valid(year), expected);
    }

    #[test]
    fn draft_rejects_first_invalid_field() {
        assert_eq!(
            MovieDraft::try_from_parts("", "1988"),
            Err(MovieValidationError::InvalidTitle)
        );
        assert_eq!(
            MovieDraft::try_from_parts("Leon", "94"),
            Err(MovieValidationError::InvalidYear)
        );
    }

    #[test]
    fn draft_preserves_fields() {
        let draft = MovieDraft::try_from_parts("Mahjong", "1996").expect("valid input");
        assert_eq!(draft.title(), "Mahjong");
        assert_eq!(draft.year(), "1996");
    }
}
