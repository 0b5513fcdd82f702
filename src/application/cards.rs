//! Article cards and the single date formatter every page uses.

use time::Date;

use crate::domain::articles::{Article, format_human_date, format_iso_date};
use crate::presentation::views::{ArticleCard, TimeView};

pub const CARD_CTA: &str = "Read article";

/// `/<prefix>/<slug>`; an empty prefix yields `/<slug>`.
pub fn article_href(prefix: &str, slug: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("/{slug}")
    } else {
        format!("/{prefix}/{slug}")
    }
}

/// Locale-fixed display label with a date-only machine-readable value.
pub fn time_view(date: Date) -> TimeView {
    TimeView {
        datetime: format_iso_date(date),
        label: format_human_date(date),
    }
}

pub fn article_card(article: &Article, prefix: &str) -> ArticleCard {
    ArticleCard {
        title: article.title.clone(),
        href: article_href(prefix, article.slug.as_str()),
        time: time_view(article.date),
        description: article.description.clone(),
        cta: CARD_CTA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::domain::articles::Slug;

    fn article() -> Article {
        Article::new(
            "Crafting a scroll-aware header",
            "How the avatar shrinks into place.",
            date!(2024 - 03 - 05),
            Slug::new("scroll-aware-header").expect("slug"),
        )
        .expect("article")
    }

    #[test]
    fn card_links_under_prefix() {
        let card = article_card(&article(), "blog");
        assert_eq!(card.href, "/blog/scroll-aware-header");
        assert_eq!(card.title, "Crafting a scroll-aware header");
        assert_eq!(card.description, "How the avatar shrinks into place.");
        assert_eq!(card.cta, "Read article");
    }

    #[test]
    fn card_dates_use_long_label_and_date_only_attribute() {
        let card = article_card(&article(), "blog");
        assert_eq!(card.time.label, "March 5, 2024");
        assert_eq!(card.time.datetime, "2024-03-05");
        assert_eq!(card.time, time_view(date!(2024 - 03 - 05)));
    }

    #[test]
    fn href_tolerates_slashes_in_prefix() {
        assert_eq!(article_href("/blog/", "post"), "/blog/post");
        assert_eq!(article_href("", "post"), "/post");
    }
}
