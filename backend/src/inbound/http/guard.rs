//! Capability gate protecting mutating and administrative routes.
//!
//! [`RequireLogin`] wraps a guarded route and consults the session before the
//! inner handler runs: without an authenticated user id the request is
//! diverted to the login entry point with no side effects; with one it
//! proceeds unchanged. The guard reads the session and nothing else — input
//! validation stays in the handlers.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::domain::UserId;
use crate::inbound::http::session::USER_ID_KEY;

/// Middleware factory diverting unauthenticated requests to `/login`.
#[derive(Clone)]
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireLogin`].
pub struct RequireLoginMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = req.get_session();
        // A tampered or unreadable session counts as unauthenticated.
        let authenticated = matches!(session.get::<UserId>(USER_ID_KEY), Ok(Some(_)));

        if authenticated {
            let fut = self.service.call(req);
            Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
        } else {
            let (request, _payload) = req.into_parts();
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish()
                .map_into_right_body();
            Box::pin(ready(Ok(ServiceResponse::new(request, response))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use crate::domain::DomainError;
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::test_session_middleware;

    fn guarded_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login-as",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(UserId(1))?;
                    Ok::<_, DomainError>(HttpResponse::Ok())
                }),
            )
            .service(
                web::resource("/guarded")
                    .wrap(RequireLogin)
                    .route(web::get().to(|| async { HttpResponse::Ok().body("through") })),
            )
    }

    #[actix_web::test]
    async fn unauthenticated_requests_divert_to_login() {
        let app = test::init_service(guarded_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/guarded").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .expect("redirect target set"),
            "/login"
        );
    }

    #[actix_web::test]
    async fn authenticated_requests_pass_through() {
        let app = test::init_service(guarded_app()).await;
        let login_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/login-as").to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/guarded")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "through");
    }
}
