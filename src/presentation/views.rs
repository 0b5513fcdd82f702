use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

/// Render a page to a string; shared by the HTTP surface and the static export.
pub fn render_page<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_page",
            "Template rendering failed",
            err,
        )
    })
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    render_page(template).map(Html).map_err(HttpError::from)
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome.with_title(content.title), content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone, Debug)]
pub struct FooterView {
    pub links: Vec<NavigationLinkView>,
    pub copy: String,
}

#[derive(Clone, Debug)]
pub struct BrandView {
    pub title: String,
    pub author: String,
    /// Shown inside the avatar.
    pub initials: String,
    pub description: String,
}

/// Attributes rendered onto `<html>`.
#[derive(Clone, Debug)]
pub struct RootView {
    pub class: String,
    pub style: String,
}

#[derive(Clone, Debug)]
pub struct ThemeToggleView {
    pub is_dark: bool,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct HeaderView {
    pub is_home: bool,
    /// `data-header-mode` value read by the browser binding.
    pub mode: &'static str,
}

#[derive(Clone, Debug)]
pub struct LayoutChrome {
    pub title: String,
    pub brand: BrandView,
    pub root: RootView,
    pub header: HeaderView,
    pub theme: ThemeToggleView,
    pub navigation: NavigationView,
    pub footer: FooterView,
}

impl LayoutChrome {
    /// Prefix the document title with the page title.
    pub fn with_title(self, page_title: &str) -> Self {
        let title = if page_title.is_empty() {
            self.brand.title.clone()
        } else {
            format!("{page_title} - {}", self.brand.title)
        };
        Self { title, ..self }
    }
}

#[derive(Clone, Debug)]
pub struct LayoutContext<T> {
    pub title: String,
    pub brand: BrandView,
    pub root: RootView,
    pub header: HeaderView,
    pub theme: ThemeToggleView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            title: chrome.title,
            brand: chrome.brand,
            root: chrome.root,
            header: chrome.header,
            theme: chrome.theme,
            navigation: chrome.navigation,
            footer: chrome.footer,
            content,
        }
    }
}

/// Display label plus the date-only value for `<time datetime>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeView {
    pub datetime: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleCard {
    pub title: String,
    pub href: String,
    pub time: TimeView,
    pub description: String,
    pub cta: String,
}

pub struct HomeContext {
    pub intro: String,
    pub articles: Vec<ArticleCard>,
    pub has_more: bool,
    pub blog_href: String,
}

pub struct BlogIndexContext {
    pub heading: String,
    pub articles: Vec<ArticleCard>,
    pub has_results: bool,
}

pub struct ArticleDetailContext {
    pub title: String,
    pub description: String,
    pub time: TimeView,
    pub body_html: Option<String>,
    pub back_href: String,
}

pub struct ErrorPageView {
    pub code: u16,
    pub title: &'static str,
    pub message: &'static str,
    pub home_href: &'static str,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            code: 404,
            title: "Page not found",
            message: "Sorry, we couldn't find the page you're looking for.",
            home_href: "/",
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeContext>,
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub view: LayoutContext<BlogIndexContext>,
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub view: LayoutContext<ArticleDetailContext>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
