//! Store ports consumed by handlers and CLI commands.
//!
//! A deliberately narrow repository surface: get, add, update, delete, with
//! each call an atomic read-modify-write against the backing store. Handlers
//! depend on these traits via `Arc<dyn ...>` so tests can swap the adapter.

use super::{
    DisplayName, DomainResult, Movie, MovieDraft, MovieId, PasswordDigest, User, UserDraft, UserId,
};

/// Persistence port for watchlist entries.
pub trait MovieStore: Send + Sync {
    /// All movies in store iteration order.
    fn list(&self) -> DomainResult<Vec<Movie>>;

    /// Look up a movie by id.
    fn get(&self, id: MovieId) -> DomainResult<Option<Movie>>;

    /// Persist a new movie and return it with its assigned id.
    fn add(&self, draft: &MovieDraft) -> DomainResult<Movie>;

    /// Overwrite title/year of an existing movie.
    ///
    /// Returns `false` when no movie with `id` exists; nothing is written in
    /// that case.
    fn update(&self, id: MovieId, draft: &MovieDraft) -> DomainResult<bool>;

    /// Remove a movie. Returns `false` when no movie with `id` exists.
    fn delete(&self, id: MovieId) -> DomainResult<bool>;
}

/// Persistence port for the administrator record.
pub trait UserStore: Send + Sync {
    /// The single administrator, if one has been bootstrapped.
    fn admin(&self) -> DomainResult<Option<User>>;

    /// Look up a user by id (session rehydration).
    fn get(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Create the administrator record.
    fn create(&self, draft: &UserDraft) -> DomainResult<User>;

    /// Update the administrator's display name.
    fn set_display_name(&self, id: UserId, name: &DisplayName) -> DomainResult<()>;

    /// Replace the administrator's login name and password digest.
    fn set_credentials(
        &self,
        id: UserId,
        username: &str,
        digest: &PasswordDigest,
    ) -> DomainResult<()>;
}
