//! Static export: every public page written as `index.html` under its path.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    application::{error::AppError, site::SiteService, theme::MemoryPreferenceStore},
    domain::navigation,
    presentation::views::{
        ArticleTemplate, BlogTemplate, ErrorPageView, ErrorTemplate, IndexTemplate, LayoutChrome,
        LayoutContext, TemplateRenderError, render_page,
    },
};

use super::{
    assets::{PUBLIC_ASSET_PREFIX, public_assets},
    error::InfraError,
};

const NOT_FOUND_FILE: &str = "404.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub out_dir: PathBuf,
    pub pages: usize,
}

/// Render the whole site into `out_dir`, creating it when missing.
pub async fn export_site(site: &SiteService, out_dir: &Path) -> Result<ExportReport, AppError> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(InfraError::from)?;

    let mut pages = 0;
    for path in site.page_paths() {
        let html = render_path(site, &path)?;
        write_page(out_dir, &page_file(&path), html).await?;
        pages += 1;
    }

    let chrome = static_chrome(site, &format!("/{NOT_FOUND_FILE}"));
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome.with_title(content.title), content);
    let html = render_page(ErrorTemplate { view }).map_err(render_error)?;
    write_page(out_dir, Path::new(NOT_FOUND_FILE), html).await?;

    let assets_dir = out_dir.join(PUBLIC_ASSET_PREFIX.trim_start_matches('/'));
    tokio::fs::create_dir_all(&assets_dir)
        .await
        .map_err(InfraError::from)?;
    public_assets()
        .extract(&assets_dir)
        .map_err(InfraError::from)?;

    info!(
        target = "folio::export",
        out_dir = %out_dir.display(),
        pages,
        "static export written"
    );

    Ok(ExportReport {
        out_dir: out_dir.to_path_buf(),
        pages,
    })
}

fn render_path(site: &SiteService, path: &str) -> Result<String, AppError> {
    let chrome = static_chrome(site, path);

    if path == navigation::HOME_PATH {
        return render_page(IndexTemplate {
            view: site.home(chrome),
        })
        .map_err(render_error);
    }

    if path == navigation::BLOG_INDEX_PATH {
        return render_page(BlogTemplate {
            view: site.blog_index(chrome),
        })
        .map_err(render_error);
    }

    let slug = path
        .rsplit('/')
        .next()
        .ok_or_else(|| AppError::unexpected(format!("page path `{path}` has no slug")))?;
    let view = site.article(slug, chrome)?;
    render_page(ArticleTemplate { view }).map_err(render_error)
}

/// Pages are exported with the default theme; no preference exists at build time.
fn static_chrome(site: &SiteService, path: &str) -> LayoutChrome {
    let chrome = site.chrome();
    let view_state = chrome.view_state(MemoryPreferenceStore::new(), path);
    chrome.layout(path, &view_state)
}

fn page_file(path: &str) -> PathBuf {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(trimmed).join("index.html")
    }
}

async fn write_page(out_dir: &Path, relative: &Path, html: String) -> Result<(), AppError> {
    let target = out_dir.join(relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(InfraError::from)?;
    }
    tokio::fs::write(&target, html)
        .await
        .map_err(InfraError::from)?;
    debug!(target = "folio::export", file = %target.display(), "page written");
    Ok(())
}

fn render_error(err: TemplateRenderError) -> AppError {
    AppError::unexpected(format!("{err}: {}", err.error))
}
