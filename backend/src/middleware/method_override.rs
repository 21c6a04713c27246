//! `_method` override so HTML forms can issue PUT, PATCH and DELETE.
//!
//! A `POST /campgrounds/{id}?_method=DELETE` is routed exactly like a
//! `DELETE /campgrounds/{id}`. Only POST requests are rewritten, and only to
//! those three methods.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};
use tracing::debug;
use url::form_urlencoded;

/// Query parameter naming the intended method.
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

/// Middleware applying `_method` overrides before routing.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::MethodOverride;
///
/// let app = App::new().wrap(MethodOverride);
/// ```
#[derive(Clone)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let method = (req.method() == Method::POST)
            .then(|| requested_method(req.query_string()))
            .flatten();
        if let Some(method) = method {
            debug!(%method, path = req.path(), "applying method override");
            req.head_mut().method = method;
        }
        self.service.call(req)
    }
}

fn requested_method(query: &str) -> Option<Method> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == METHOD_OVERRIDE_PARAM)
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpRequest, HttpResponse, web};
    use rstest::rstest;

    #[rstest]
    #[case("_method=DELETE", Some(Method::DELETE))]
    #[case("_method=put", Some(Method::PUT))]
    #[case("x=1&_method=Patch", Some(Method::PATCH))]
    #[case("_method=GET", None)]
    #[case("_method=", None)]
    #[case("", None)]
    fn parses_supported_overrides(#[case] query: &str, #[case] expected: Option<Method>) {
        assert_eq!(requested_method(query), expected);
    }

    async fn echo(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(req.method().to_string())
    }

    #[rstest]
    #[case(actix_test::TestRequest::post().uri("/thing?_method=DELETE"), "DELETE")]
    #[case(actix_test::TestRequest::post().uri("/thing"), "POST")]
    #[case(actix_test::TestRequest::get().uri("/thing?_method=DELETE"), "GET")]
    #[actix_web::test]
    async fn only_post_requests_are_rewritten(
        #[case] request: actix_test::TestRequest,
        #[case] expected: &str,
    ) {
        let app = actix_test::init_service(
            App::new()
                .wrap(MethodOverride)
                .route("/thing", web::to(echo)),
        )
        .await;

        let res = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(actix_test::read_body(res).await, expected);
    }
}
