//! Movie CRUD handlers.
//!
//! Create, edit, and delete share one shape: validate, mutate, queue a
//! notification, redirect. Validation failures return to the originating
//! form; a missing movie id is a transport-level 404 that bypasses the
//! notification channel entirely.
//!
//! `POST /` is the one mutating route not behind [`RequireLogin`]: an
//! unauthenticated create is silently redirected to the index instead of
//! being diverted to `/login`. The asymmetry is deliberate; see the
//! end-to-end test naming it.
//!
//! [`RequireLogin`]: crate::inbound::http::guard::RequireLogin

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::{DomainError, MovieDraft, MovieId};
use crate::inbound::http::flash::{notices, Notifications};
use crate::inbound::http::pages::{render_edit, render_index, PageContext};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, see_other, ApiResult};

/// Form fields consumed by the create and edit forms.
#[derive(Debug, Deserialize)]
pub struct MovieForm {
    title: String,
    year: String,
}

fn no_such_movie(id: MovieId) -> DomainError {
    DomainError::not_found(format!("no movie with id {id}"))
}

/// `GET /` — the public index listing every movie.
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
) -> ApiResult<HttpResponse> {
    let movies = state.movies.list()?;
    let ctx = PageContext::build(&state, &session, &queue)?;
    Ok(html(render_index(&ctx, &movies)))
}

/// `POST /` — create a movie.
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
    form: web::Form<MovieForm>,
) -> ApiResult<HttpResponse> {
    // Unauthenticated create: silent redirect home, no notification.
    if session.user_id()?.is_none() {
        return Ok(see_other("/"));
    }

    match MovieDraft::try_from_parts(&form.title, &form.year) {
        Ok(draft) => {
            let movie = state.movies.add(&draft)?;
            queue.push(notices::ITEM_CREATED)?;
            info!(movie_id = %movie.id, "movie created");
            Ok(see_other("/"))
        }
        Err(_) => {
            queue.push(notices::INVALID_INPUT)?;
            Ok(see_other("/"))
        }
    }
}

/// `GET /movie/edit/{id}` — guarded; the edit form for an existing movie.
pub async fn edit_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = MovieId(path.into_inner());
    let movie = state.movies.get(id)?.ok_or_else(|| no_such_movie(id))?;
    let ctx = PageContext::build(&state, &session, &queue)?;
    Ok(html(render_edit(&ctx, &movie)))
}

/// `POST /movie/edit/{id}` — guarded; overwrite title and year.
pub async fn edit(
    state: web::Data<HttpState>,
    queue: Notifications,
    path: web::Path<i64>,
    form: web::Form<MovieForm>,
) -> ApiResult<HttpResponse> {
    let id = MovieId(path.into_inner());
    // A stale id is a 404 regardless of payload validity.
    if state.movies.get(id)?.is_none() {
        return Err(no_such_movie(id));
    }

    match MovieDraft::try_from_parts(&form.title, &form.year) {
        Ok(draft) => {
            if !state.movies.update(id, &draft)? {
                return Err(no_such_movie(id));
            }
            queue.push(notices::ITEM_UPDATED)?;
            info!(movie_id = %id, "movie updated");
            Ok(see_other("/"))
        }
        Err(_) => {
            queue.push(notices::INVALID_INPUT)?;
            Ok(see_other(&format!("/movie/edit/{id}")))
        }
    }
}

/// `POST /movie/delete/{id}` — guarded; not idempotent, a second delete of
/// the same id is a 404.
pub async fn delete(
    state: web::Data<HttpState>,
    queue: Notifications,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = MovieId(path.into_inner());
    if !state.movies.delete(id)? {
        return Err(no_such_movie(id));
    }
    queue.push(notices::ITEM_DELETED)?;
    info!(movie_id = %id, "movie deleted");
    Ok(see_other("/"))
}
