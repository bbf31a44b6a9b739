//! Display-name settings handlers. Same validate/mutate/notify/redirect
//! shape as the movie handlers, against the administrator record.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::{DisplayName, DomainError};
use crate::inbound::http::flash::{notices, Notifications};
use crate::inbound::http::pages::{render_settings, PageContext};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{html, see_other, ApiResult};

/// Form field consumed by `POST /settings`.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    name: String,
}

/// `GET /settings` — guarded; the settings form.
pub async fn settings_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    queue: Notifications,
) -> ApiResult<HttpResponse> {
    let ctx = PageContext::build(&state, &session, &queue)?;
    Ok(html(render_settings(&ctx)))
}

/// `POST /settings` — guarded; update the administrator's display name.
pub async fn update_settings(
    state: web::Data<HttpState>,
    queue: Notifications,
    form: web::Form<SettingsForm>,
) -> ApiResult<HttpResponse> {
    let Ok(name) = DisplayName::try_new(&form.name) else {
        queue.push(notices::INVALID_INPUT)?;
        return Ok(see_other("/settings"));
    };

    let user = state
        .users
        .admin()?
        .ok_or_else(|| DomainError::internal("no administrator record to update"))?;
    state.users.set_display_name(user.id, &name)?;
    queue.push(notices::SETTINGS_UPDATED)?;
    info!(user_id = %user.id, "display name updated");
    Ok(see_other("/"))
}
