/// A single link of the site navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: &'static str,
}

/// Primary navigation, in display order. Shared by header and footer.
pub const PRIMARY_NAVIGATION: &[NavEntry] = &[
    NavEntry {
        label: "Home",
        href: "/",
    },
    NavEntry {
        label: "Blog",
        href: "/blog",
    },
];

pub fn primary() -> &'static [NavEntry] {
    PRIMARY_NAVIGATION
}

/// Path segment under which articles are published: `/blog/<slug>`.
pub const ARTICLE_PREFIX: &str = "blog";

pub const HOME_PATH: &str = "/";
pub const BLOG_INDEX_PATH: &str = "/blog";
