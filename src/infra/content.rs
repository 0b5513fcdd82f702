//! Loads the article manifest into a [`ContentCatalog`].
//!
//! The manifest is a TOML document with one `[[articles]]` table per entry:
//!
//! ```toml
//! [[articles]]
//! title = "Crafting a design system"
//! description = "Notes from building one."
//! date = 2024-03-05
//! slug = "crafting-a-design-system"
//! body = """
//! Markdown goes here.
//! """
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use toml::Value;
use tracing::info;

use crate::{
    application::catalog::ContentCatalog,
    domain::{
        articles::{Article, Slug, parse_content_date},
        error::DomainError,
    },
};

use super::error::InfraError;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("article #{index}: {source}")]
    Article {
        index: usize,
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Catalog(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    articles: Vec<ManifestArticle>,
}

#[derive(Debug, Deserialize)]
struct ManifestArticle {
    title: String,
    #[serde(default)]
    description: String,
    date: Value,
    slug: String,
    #[serde(default)]
    body: Option<String>,
}

impl ManifestArticle {
    fn into_article(self) -> Result<Article, DomainError> {
        let date = parse_content_date(&manifest_date(&self.date)?)?;
        let slug = Slug::new(self.slug)?;
        let article = Article::new(self.title, self.description, date, slug)?;
        Ok(match self.body {
            Some(body) if !body.trim().is_empty() => article.with_body(body),
            _ => article,
        })
    }
}

/// Native TOML dates keep only their calendar part; strings go through the
/// regular content date parser.
fn manifest_date(value: &Value) -> Result<String, DomainError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Datetime(datetime) => datetime
            .date
            .map(|date| format!("{:04}-{:02}-{:02}", date.year, date.month, date.day))
            .ok_or_else(|| DomainError::validation(format!("`{datetime}` has no calendar date"))),
        other => Err(DomainError::validation(format!(
            "date must be a TOML date or string, found {}",
            other.type_str()
        ))),
    }
}

/// Parse a manifest document.
pub fn parse_manifest(source: &str) -> Result<ContentCatalog, ManifestError> {
    let manifest: Manifest = toml::from_str(source)?;

    let articles = manifest
        .articles
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_article()
                .map_err(|source| ManifestError::Article { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContentCatalog::from_articles(articles)?)
}

/// Read and parse the manifest at `path`.
pub async fn load_catalog(path: &Path) -> Result<ContentCatalog, InfraError> {
    let source = tokio::fs::read_to_string(path).await.map_err(|err| {
        InfraError::content(format!("failed to read `{}`: {err}", path.display()))
    })?;

    let catalog = parse_manifest(&source)
        .map_err(|err| InfraError::content(format!("`{}`: {err}", path.display())))?;

    info!(
        target = "folio::content",
        manifest = %path.display(),
        articles = catalog.len(),
        "content catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    const MANIFEST: &str = r#"
[[articles]]
title = "Older"
description = "First post."
date = 2023-11-02
slug = "older"

[[articles]]
title = "Newer"
description = "Second post."
date = "2024-03-05T22:30:00-05:00"
slug = "newer"
body = "Hello *world*."
"#;

    #[test]
    fn parses_articles_newest_first() {
        let catalog = parse_manifest(MANIFEST).expect("manifest parses");

        let slugs = catalog
            .articles()
            .iter()
            .map(|article| article.slug.as_str())
            .collect::<Vec<_>>();
        assert_eq!(slugs, vec!["newer", "older"]);

        let newer = catalog.find("newer").expect("newer present");
        assert_eq!(newer.date, date!(2024 - 03 - 05));
        assert_eq!(newer.body.as_deref(), Some("Hello *world*."));
        assert!(catalog.find("older").expect("older present").body.is_none());
    }

    #[test]
    fn native_datetime_keeps_calendar_date() {
        let source = r#"
[[articles]]
title = "Timed"
date = 2024-03-05T23:59:00Z
slug = "timed"
"#;
        let catalog = parse_manifest(source).expect("manifest parses");
        assert_eq!(
            catalog.find("timed").expect("present").date,
            date!(2024 - 03 - 05)
        );
    }

    #[test]
    fn empty_manifest_yields_empty_catalog() {
        let catalog = parse_manifest("").expect("empty manifest parses");
        assert!(catalog.is_empty());
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let source = r#"
[[articles]]
title = "One"
date = 2024-01-01
slug = "same"

[[articles]]
title = "Two"
date = 2024-01-02
slug = "same"
"#;
        let err = parse_manifest(source).expect_err("duplicates rejected");
        assert!(matches!(err, ManifestError::Catalog(DomainError::Validation { .. })));
    }

    #[test]
    fn rejects_invalid_slug_with_position() {
        let source = r#"
[[articles]]
title = "Bad"
date = 2024-01-01
slug = "Not A Slug"
"#;
        let err = parse_manifest(source).expect_err("invalid slug rejected");
        assert!(matches!(err, ManifestError::Article { index: 0, .. }));
    }

    #[test]
    fn rejects_time_only_dates() {
        let source = r#"
[[articles]]
title = "Clock"
date = 10:30:00
slug = "clock"
"#;
        assert!(parse_manifest(source).is_err());
    }

    #[tokio::test]
    async fn missing_manifest_is_a_content_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_catalog(&dir.path().join("absent.toml"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, InfraError::Content { .. }));
    }
}
