//! Login and logout handlers.
//!
//! The login flow is a small state machine: empty fields flash
//! "Invalid input." and return to the form; a credential mismatch flashes
//! "Invalid username or password." and returns to the form; success binds
//! the administrator's id to the session and lands on the index. Logout is
//! guarded upstream, so by the time it runs a session always exists.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::UserStore;
use crate::domain::{DomainResult, LoginCredentials, User};
use crate::inbound::http::flash::{notices, Notifications};
use crate::inbound::http::pages::{render_login, PageContext};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, see_other, ApiResult};

/// Form fields consumed by `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Check credentials against the single administrator record.
///
/// Returns `Ok(None)` whenever login must fail closed: no administrator
/// bootstrapped yet, a username mismatch, unset credentials, or a digest
/// mismatch. The caller cannot distinguish these cases, and must not.
pub fn authenticate(
    users: &dyn UserStore,
    credentials: &LoginCredentials,
) -> DomainResult<Option<User>> {
    let Some(user) = users.admin()? else {
        return Ok(None);
    };
    if user.username != credentials.username() {
        return Ok(None);
    }
    let Some(digest) = &user.password_hash else {
        return Ok(None);
    };
    if digest.verify(credentials.password())? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// `GET /login` — the login form.
pub async fn login_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
) -> ApiResult<HttpResponse> {
    let ctx = PageContext::build(&state, &session, &queue)?;
    Ok(html(render_login(&ctx)))
}

/// `POST /login` — credential check and session establishment.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.username, &form.password) else {
        queue.push(notices::INVALID_INPUT)?;
        return Ok(see_other("/login"));
    };

    match authenticate(state.users.as_ref(), &credentials)? {
        Some(user) => {
            session.persist_user(user.id)?;
            queue.push(notices::LOGIN_SUCCESS)?;
            info!(user_id = %user.id, "administrator logged in");
            Ok(see_other("/"))
        }
        None => {
            queue.push(notices::INVALID_CREDENTIALS)?;
            Ok(see_other("/login"))
        }
    }
}

/// `GET /logout` — guarded; destroys the session identity.
pub async fn logout(session: SessionContext, queue: Notifications) -> ApiResult<HttpResponse> {
    session.clear_user();
    queue.push(notices::GOODBYE)?;
    info!("administrator logged out");
    Ok(see_other("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::PasswordDigest;
    use crate::outbound::persistence::{open_db_in_memory, SqliteStore};

    fn seeded_users() -> Arc<SqliteStore> {
        let store = Arc::new(SqliteStore::new(
            open_db_in_memory().expect("in-memory database opens"),
        ));
        let user = UserStore::create(
            store.as_ref(),
            &crate::domain::UserDraft {
                display_name: "Admin".to_owned(),
                username: String::new(),
                password_hash: None,
            },
        )
        .expect("create succeeds");
        let digest = PasswordDigest::generate("testpassword").expect("hashing");
        store
            .set_credentials(user.id, "testuser", &digest)
            .expect("credentials set");
        store
    }

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid shape")
    }

    #[test]
    fn correct_credentials_return_the_administrator() {
        let users = seeded_users();
        let user = authenticate(users.as_ref(), &creds("testuser", "testpassword"))
            .expect("store reachable")
            .expect("credentials accepted");
        assert_eq!(user.username, "testuser");
    }

    #[test]
    fn wrong_password_fails_closed() {
        let users = seeded_users();
        let outcome = authenticate(users.as_ref(), &creds("testuser", "wrong"))
            .expect("store reachable");
        assert!(outcome.is_none());
    }

    #[test]
    fn username_comparison_is_case_sensitive() {
        let users = seeded_users();
        let outcome = authenticate(users.as_ref(), &creds("TestUser", "testpassword"))
            .expect("store reachable");
        assert!(outcome.is_none());
    }

    #[test]
    fn missing_administrator_fails_closed() {
        let users = Arc::new(SqliteStore::new(
            open_db_in_memory().expect("in-memory database opens"),
        ));
        let outcome = authenticate(users.as_ref(), &creds("testuser", "testpassword"))
            .expect("store reachable");
        assert!(outcome.is_none());
    }

    #[test]
    fn unclaimed_account_fails_closed() {
        let users = Arc::new(SqliteStore::new(
            open_db_in_memory().expect("in-memory database opens"),
        ));
        UserStore::create(
            users.as_ref(),
            &crate::domain::UserDraft {
                display_name: "Grey Li".to_owned(),
                username: String::new(),
                password_hash: None,
            },
        )
        .expect("create succeeds");

        // An empty submitted username is rejected before authenticate runs,
        // so probe with the only value that could match the seeded row.
        let outcome =
            authenticate(users.as_ref(), &creds("testuser", "x")).expect("store reachable");
        assert!(outcome.is_none());
    }
}
