use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{Instrument, debug, error, info_span, warn};
use uuid::Uuid;

use crate::{
    application::{error::ErrorReport, header::HeaderMode, theme::THEME_STORAGE_KEY},
    domain::theme::ThemePreference,
};

/// Per-request fields attached to every log line of the request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    /// `light`, `dark`, `unset` or `invalid`, as read from the theme cookie.
    pub theme: &'static str,
    pub header_mode: HeaderMode,
}

impl RequestContext {
    fn from_request(request: &Request<Body>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            theme: theme_cookie_state(request.headers()),
            header_mode: HeaderMode::for_path(request.uri().path()),
        }
    }
}

/// How the theme cookie on a request resolves, without touching the store.
pub fn theme_cookie_state(headers: &HeaderMap) -> &'static str {
    let jar = CookieJar::from_headers(headers);
    match jar.get(THEME_STORAGE_KEY) {
        None => "unset",
        Some(cookie) => cookie
            .value()
            .parse::<ThemePreference>()
            .map_or("invalid", ThemePreference::as_str),
    }
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext::from_request(&request);
    let span = info_span!(
        target: "folio::http",
        "request",
        request_id = %ctx.request_id,
        method = %request.method(),
        path = %request.uri().path(),
        theme = ctx.theme,
        header = ctx.header_mode.as_attribute(),
    );
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).instrument(span).await;
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let (request_id, theme) = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| (ctx.request_id.clone(), ctx.theme))
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if !(status.is_client_error() || status.is_server_error()) {
        debug!(
            target = "folio::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            elapsed_ms = elapsed_ms,
            theme = theme,
            request_id = request_id,
            "page served",
        );
        return response;
    }

    let (source, messages) = match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => (report.source, report.messages),
        None => ("unknown", Vec::new()),
    };
    let detail = messages
        .first()
        .cloned()
        .unwrap_or_else(|| "no diagnostic available".to_string());

    if status.is_server_error() {
        error!(
            target = "folio::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            chain = ?messages,
            theme = theme,
            request_id = request_id,
            "request failed",
        );
    } else {
        warn!(
            target = "folio::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            theme = theme,
            request_id = request_id,
            "client request error",
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, header::COOKIE};

    use super::*;

    fn with_cookie(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn theme_cookie_state_reports_the_stored_preference() {
        assert_eq!(theme_cookie_state(&HeaderMap::new()), "unset");
        assert_eq!(theme_cookie_state(&with_cookie("theme=dark")), "dark");
        assert_eq!(
            theme_cookie_state(&with_cookie("session=1; theme=light")),
            "light"
        );
        assert_eq!(theme_cookie_state(&with_cookie("theme=neon")), "invalid");
    }

    #[test]
    fn request_context_derives_the_header_mode_from_the_path() {
        let request = Request::builder()
            .uri("/blog/hello")
            .header(COOKIE, "theme=dark")
            .body(Body::empty())
            .expect("request");
        let ctx = RequestContext::from_request(&request);

        assert_eq!(ctx.theme, "dark");
        assert_eq!(ctx.header_mode, HeaderMode::Inner);
        assert!(!ctx.request_id.is_empty());
    }
}
