//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting, reading, or clearing the
//! authenticated user id.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), DomainError> {
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, DomainError> {
        self.0
            .get::<UserId>(USER_ID_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))
    }

    /// Drop the authenticated identity while keeping the rest of the
    /// session intact, so a queued notification still reaches the next
    /// render.
    pub fn clear_user(&self) {
        let _ = self.0.remove(USER_ID_KEY);
    }

    /// Require an authenticated user id.
    pub fn require_user_id(&self) -> Result<UserId, DomainError> {
        self.user_id()?
            .ok_or_else(|| DomainError::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
