//! Transport-agnostic core: entities, validation, credentials, and ports.

pub mod auth;
pub mod error;
pub mod movie;
pub mod ports;
pub mod user;

pub use auth::{LoginCredentials, LoginValidationError, PasswordDigest};
pub use error::{DomainError, DomainResult, ErrorCode};
pub use movie::{Movie, MovieDraft, MovieId, MovieValidationError};
pub use user::{DisplayName, DisplayNameValidationError, User, UserDraft, UserId};
