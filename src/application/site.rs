//! Page contexts for the public site.

use std::sync::Arc;

use crate::domain::{error::DomainError, navigation};
use crate::presentation::views::{
    ArticleDetailContext, BlogIndexContext, HomeContext, LayoutChrome, LayoutContext,
};

use super::cards::{article_card, article_href, time_view};
use super::catalog::ContentCatalog;
use super::chrome::ChromeService;
use super::error::AppError;
use super::render::render_markdown;

const BLOG_HEADING: &str = "Writing";

#[derive(Clone)]
pub struct SiteService {
    catalog: Arc<ContentCatalog>,
    chrome: ChromeService,
    home_latest: usize,
}

impl SiteService {
    pub fn new(catalog: Arc<ContentCatalog>, chrome: ChromeService, home_latest: usize) -> Self {
        Self {
            catalog,
            chrome,
            home_latest,
        }
    }

    pub fn chrome(&self) -> &ChromeService {
        &self.chrome
    }

    pub fn home(&self, chrome: LayoutChrome) -> LayoutContext<HomeContext> {
        let articles = self
            .catalog
            .latest(self.home_latest)
            .iter()
            .map(|article| article_card(article, navigation::ARTICLE_PREFIX))
            .collect::<Vec<_>>();

        let content = HomeContext {
            intro: self.chrome.profile().description.clone(),
            has_more: self.catalog.len() > articles.len(),
            articles,
            blog_href: navigation::BLOG_INDEX_PATH.to_string(),
        };
        LayoutContext::new(chrome.with_title(""), content)
    }

    pub fn blog_index(&self, chrome: LayoutChrome) -> LayoutContext<BlogIndexContext> {
        let articles = self
            .catalog
            .articles()
            .iter()
            .map(|article| article_card(article, navigation::ARTICLE_PREFIX))
            .collect::<Vec<_>>();

        let content = BlogIndexContext {
            heading: BLOG_HEADING.to_string(),
            has_results: !articles.is_empty(),
            articles,
        };
        LayoutContext::new(chrome.with_title("Blog"), content)
    }

    pub fn article(
        &self,
        slug: &str,
        chrome: LayoutChrome,
    ) -> Result<LayoutContext<ArticleDetailContext>, AppError> {
        let article = self
            .catalog
            .find(slug)
            .ok_or_else(|| DomainError::not_found("article"))?;

        let body_html = article
            .body
            .as_deref()
            .map(render_markdown)
            .transpose()
            .map_err(|err| AppError::unexpected(format!("article `{slug}`: {err}")))?;

        let content = ArticleDetailContext {
            title: article.title.clone(),
            description: article.description.clone(),
            time: time_view(article.date),
            body_html,
            back_href: navigation::BLOG_INDEX_PATH.to_string(),
        };
        Ok(LayoutContext::new(chrome.with_title(&article.title), content))
    }

    /// Every public page path, for the static export.
    pub fn page_paths(&self) -> Vec<String> {
        let mut paths = vec![
            navigation::HOME_PATH.to_string(),
            navigation::BLOG_INDEX_PATH.to_string(),
        ];
        paths.extend(
            self.catalog
                .articles()
                .iter()
                .map(|article| article_href(navigation::ARTICLE_PREFIX, article.slug.as_str())),
        );
        paths
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::application::chrome::SiteProfile;
    use crate::application::header::HeaderGeometry;
    use crate::application::theme::MemoryPreferenceStore;
    use crate::domain::articles::{Article, Slug};

    fn site(count: usize) -> SiteService {
        let articles = (1..=count)
            .map(|day| {
                let slug = format!("post-{day}");
                Article::new(
                    format!("Post {day}"),
                    "desc",
                    date!(2024 - 03 - 01)
                        .replace_day(day as u8)
                        .expect("valid day"),
                    Slug::new(slug).expect("slug"),
                )
                .expect("article")
                .with_body("Hello **world**")
            })
            .collect();
        let catalog = ContentCatalog::from_articles(articles).expect("catalog");
        let chrome = ChromeService::new(
            SiteProfile {
                title: "Folio".to_string(),
                author: "Author".to_string(),
                description: "Intro".to_string(),
            },
            HeaderGeometry {
                avatar_offset: 52.0,
                header_height: 64.0,
            },
        );
        SiteService::new(Arc::new(catalog), chrome, 4)
    }

    fn chrome_for(site: &SiteService, path: &str) -> LayoutChrome {
        let state = site.chrome().view_state(MemoryPreferenceStore::new(), path);
        site.chrome().layout(path, &state)
    }

    #[test]
    fn home_lists_latest_articles() {
        let site = site(6);
        let view = site.home(chrome_for(&site, "/"));

        assert_eq!(view.content.articles.len(), 4);
        assert_eq!(view.content.articles[0].href, "/blog/post-6");
        assert!(view.content.has_more);
        assert_eq!(view.title, "Folio");
    }

    #[test]
    fn blog_index_lists_everything() {
        let site = site(2);
        let view = site.blog_index(chrome_for(&site, "/blog"));

        assert!(view.content.has_results);
        assert_eq!(view.content.articles.len(), 2);
        assert_eq!(view.title, "Blog - Folio");
    }

    #[test]
    fn article_renders_body_and_date() {
        let site = site(5);
        let view = site
            .article("post-5", chrome_for(&site, "/blog/post-5"))
            .expect("article");

        assert_eq!(view.content.time.label, "March 5, 2024");
        assert_eq!(view.content.time.datetime, "2024-03-05");
        assert!(
            view.content
                .body_html
                .as_deref()
                .expect("body")
                .contains("<strong>world</strong>")
        );
    }

    #[test]
    fn unknown_article_is_not_found() {
        let site = site(1);
        let err = site
            .article("missing", chrome_for(&site, "/blog/missing"))
            .err()
            .expect("missing article");
        assert!(err.is_not_found());
    }

    #[test]
    fn page_paths_cover_every_article() {
        let site = site(2);
        assert_eq!(
            site.page_paths(),
            vec!["/", "/blog", "/blog/post-2", "/blog/post-1"]
        );
    }
}
