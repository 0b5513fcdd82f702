//! Pre-resolved article records, newest first.

use std::collections::HashMap;

use crate::domain::{articles::Article, error::DomainError};

#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    articles: Vec<Article>,
    by_slug: HashMap<String, usize>,
}

impl ContentCatalog {
    /// Build a catalog, rejecting duplicate slugs.
    pub fn from_articles(mut articles: Vec<Article>) -> Result<Self, DomainError> {
        articles.sort_by(|lhs, rhs| {
            rhs.date
                .cmp(&lhs.date)
                .then_with(|| lhs.slug.cmp(&rhs.slug))
        });

        let mut by_slug = HashMap::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            if by_slug
                .insert(article.slug.as_str().to_string(), index)
                .is_some()
            {
                return Err(DomainError::validation(format!(
                    "duplicate article slug `{}`",
                    article.slug
                )));
            }
        }

        Ok(Self { articles, by_slug })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn latest(&self, count: usize) -> &[Article] {
        &self.articles[..count.min(self.articles.len())]
    }

    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.by_slug.get(slug).map(|index| &self.articles[*index])
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
