//! One-shot notification queue carried inside the session cookie.
//!
//! Controllers push outcome messages ("Item created.", "Invalid input.")
//! before redirecting; the next rendered page drains the queue and the
//! messages are gone. Because the queue lives in the visitor's own cookie,
//! concurrent visitors can never observe each other's notifications.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::DomainError;

pub(crate) const FLASH_KEY: &str = "_flashes";

/// The notification strings the handlers queue. Kept in one place so tests
/// and handlers cannot drift apart.
pub mod notices {
    pub const LOGIN_SUCCESS: &str = "Login success.";
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
    pub const INVALID_INPUT: &str = "Invalid input.";
    pub const GOODBYE: &str = "Goodbye.";
    pub const ITEM_CREATED: &str = "Item created.";
    pub const ITEM_UPDATED: &str = "Item updated.";
    pub const ITEM_DELETED: &str = "Item deleted.";
    pub const SETTINGS_UPDATED: &str = "Settings updated.";
}

/// Per-visitor one-shot message channel.
#[derive(Clone)]
pub struct Notifications(Session);

impl Notifications {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a message for the next rendered page.
    pub fn push(&self, message: &str) -> Result<(), DomainError> {
        let mut queued = self.peek()?;
        queued.push(message.to_owned());
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| DomainError::internal(format!("failed to queue message: {error}")))
    }

    /// Drain every queued message, leaving the queue empty.
    pub fn take(&self) -> Result<Vec<String>, DomainError> {
        match self.0.remove_as::<Vec<String>>(FLASH_KEY) {
            Some(Ok(messages)) => Ok(messages),
            Some(Err(raw)) => {
                warn!(%raw, "dropping undecodable notification queue");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    fn peek(&self) -> Result<Vec<String>, DomainError> {
        Ok(self
            .0
            .get::<Vec<String>>(FLASH_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read messages: {error}")))?
            .unwrap_or_default())
    }
}

impl FromRequest for Notifications {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Notifications::new) })
    }
}
