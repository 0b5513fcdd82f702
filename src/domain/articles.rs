//! Articles as produced by the content source.
//!
//! Records are immutable once built; the UI layer only reads them. Dates are
//! calendar dates: anything carrying a time of day is normalised to the date
//! in its own offset before it reaches an [`Article`].

use std::fmt;

use slug::slugify;
use time::{
    Date, OffsetDateTime,
    format_description::{FormatItem, well_known::Rfc3339},
    macros::format_description,
};

use super::error::DomainError;

/// `March 5, 2024`
pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
/// `2024-03-05`
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

/// URL-safe identifier of an article, unique within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("slug must not be empty"));
        }
        if slugify(&value) != value {
            return Err(DomainError::validation(format!(
                "slug `{value}` must contain only lowercase letters, digits and single dashes"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub date: Date,
    pub slug: Slug,
    /// Markdown source of the article body, when the content source ships one.
    pub body: Option<String>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: Date,
        slug: Slug,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "article `{slug}` has an empty title"
            )));
        }

        Ok(Self {
            title,
            description: description.into(),
            date,
            slug,
            body: None,
        })
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..self
        }
    }
}

/// Parse a content date: either `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_content_date(value: &str) -> Result<Date, DomainError> {
    let trimmed = value.trim();
    if let Ok(date) = Date::parse(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }

    OffsetDateTime::parse(trimmed, &Rfc3339)
        .map(|timestamp| timestamp.date())
        .map_err(|err| DomainError::validation(format!("invalid date `{trimmed}`: {err}")))
}

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}
