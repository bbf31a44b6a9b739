//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse, HttpServer};

use crate::inbound::http::guard::RequireLogin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, movies, pages, settings};

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(actix_web::http::header::ContentType::html())
        .body(pages::render_not_found())
}

/// Assemble the application: session middleware over every route, the
/// [`RequireLogin`] guard composed onto each guarded resource, and a 404
/// fallback for unknown paths.
pub fn build_app(
    state: web::Data<HttpState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(session)
        .service(
            web::resource("/")
                .route(web::get().to(movies::index))
                .route(web::post().to(movies::create)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/logout")
                .wrap(RequireLogin)
                .route(web::get().to(auth::logout)),
        )
        .service(
            web::resource("/movie/edit/{id}")
                .wrap(RequireLogin)
                .route(web::get().to(movies::edit_page))
                .route(web::post().to(movies::edit)),
        )
        .service(
            web::resource("/movie/delete/{id}")
                .wrap(RequireLogin)
                .route(web::post().to(movies::delete)),
        )
        .service(
            web::resource("/settings")
                .wrap(RequireLogin)
                .route(web::get().to(settings::settings_page))
                .route(web::post().to(settings::update_settings)),
        )
        .default_service(web::route().to(not_found))
}

/// Bind and run the HTTP server until shutdown.
pub async fn run(config: ServerConfig, state: HttpState) -> std::io::Result<()> {
    let state = web::Data::new(state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    HttpServer::new(move || {
        build_app(
            state.clone(),
            session_middleware(key.clone(), cookie_secure, same_site),
        )
    })
    .bind(bind_addr)?
    .run()
    .await
}
