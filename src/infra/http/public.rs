use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{
        HeaderMap, HeaderName, StatusCode, Uri,
        header::{HOST, REFERER},
    },
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{
    application::{error::HttpError, site::SiteService, view_state::ViewState},
    domain::{navigation, theme::ThemePreference},
    infra::assets,
    presentation::views::{
        ArticleTemplate, BlogTemplate, IndexTemplate, LayoutChrome, render_not_found_response,
        render_template_response,
    },
};

use super::{
    middleware::{log_responses, set_request_context},
    preferences::CookiePreferenceStore,
};

const THEME_PATH: &str = "/theme";
/// Stands in for a missing `Host` header; never a real site.
const FALLBACK_HOST: &str = "folio.invalid";

#[derive(Clone)]
pub struct HttpState {
    pub site: Arc<SiteService>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(article_detail))
        .route(THEME_PATH, get(set_theme).post(toggle_theme))
        .route("/static/public/{*path}", get(assets::serve_public))
        .fallback(fallback_router)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeQuery {
    set: Option<String>,
}

fn page_chrome(state: &HttpState, jar: CookieJar, path: &str) -> LayoutChrome {
    let chrome = state.site.chrome();
    let view_state = chrome.view_state(CookiePreferenceStore::new(jar), path);
    chrome.layout(path, &view_state)
}

async fn index(State(state): State<HttpState>, jar: CookieJar) -> Response {
    let chrome = page_chrome(&state, jar, navigation::HOME_PATH);
    let view = state.site.home(chrome);
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn blog_index(State(state): State<HttpState>, jar: CookieJar) -> Response {
    let chrome = page_chrome(&state, jar, navigation::BLOG_INDEX_PATH);
    let view = state.site.blog_index(chrome);
    render_template_response(BlogTemplate { view }, StatusCode::OK)
}

async fn article_detail(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    uri: Uri,
    jar: CookieJar,
) -> Response {
    let chrome = page_chrome(&state, jar, uri.path());

    match state.site.article(&slug, chrome.clone()) {
        Ok(view) => render_template_response(ArticleTemplate { view }, StatusCode::OK),
        Err(err) if err.is_not_found() => render_not_found_response(chrome),
        Err(err) => err.into_response(),
    }
}

async fn toggle_theme(
    State(state): State<HttpState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let mut view_state = theme_state(&state, jar);
    let theme = view_state.toggle_theme();
    debug!(target = "folio::theme", theme = theme.as_str(), "theme toggled");

    let jar = view_state.into_store().into_jar();
    (jar, Redirect::to(&redirect_target(&headers))).into_response()
}

async fn set_theme(
    State(state): State<HttpState>,
    Query(query): Query<ThemeQuery>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let Some(raw) = query.set else {
        return HttpError::new(
            "infra::http::public::set_theme",
            StatusCode::BAD_REQUEST,
            "Missing theme",
            "query parameter `set` is required",
        )
        .into_response();
    };

    let theme = match raw.parse::<ThemePreference>() {
        Ok(theme) => theme,
        Err(err) => {
            return HttpError::from_error(
                "infra::http::public::set_theme",
                StatusCode::BAD_REQUEST,
                "Unknown theme",
                &err,
            )
            .into_response();
        }
    };

    let mut view_state = theme_state(&state, jar);
    view_state.set_theme(theme);
    debug!(target = "folio::theme", theme = theme.as_str(), "theme set");

    let jar = view_state.into_store().into_jar();
    (jar, Redirect::to(&redirect_target(&headers))).into_response()
}

fn theme_state(state: &HttpState, jar: CookieJar) -> ViewState<CookiePreferenceStore> {
    state
        .site
        .chrome()
        .view_state(CookiePreferenceStore::new(jar), THEME_PATH)
}

async fn fallback_router(State(state): State<HttpState>, uri: Uri, jar: CookieJar) -> Response {
    let chrome = page_chrome(&state, jar, uri.path());
    render_not_found_response(chrome)
}

/// Where to send the client after a theme change: the referring page when it
/// belongs to this site, the home page otherwise.
///
/// Relative referers are resolved against the request host the way a browser
/// would, so `//host`, `/\host` and embedded tabs cannot leave the site.
fn redirect_target(headers: &HeaderMap) -> String {
    let home = navigation::HOME_PATH.to_string();
    let Some(referer) = header_str(headers, REFERER) else {
        return home;
    };

    let host = header_str(headers, HOST).unwrap_or(FALLBACK_HOST);
    let Ok(base) = Url::parse(&format!("http://{host}/")) else {
        return home;
    };
    let Ok(url) = base.join(referer) else {
        return home;
    };

    if !matches!(url.scheme(), "http" | "https") || authority(&url) != authority(&base) {
        return home;
    }

    let path = url.path();
    if path == THEME_PATH || path.starts_with("//") {
        return home;
    }

    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
