use time::OffsetDateTime;

use crate::config::{HeaderSettings, SiteSettings};
use crate::domain::navigation;
use crate::presentation::views::{
    BrandView, FooterView, HeaderView, LayoutChrome, RootView, ThemeToggleView,
};

use super::header::HeaderGeometry;
use super::navigation::{link_views, navigation_view};
use super::theme::PreferenceStore;
use super::view_state::ViewState;

/// Site identity shown in the layout.
#[derive(Clone, Debug)]
pub struct SiteProfile {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl From<&SiteSettings> for SiteProfile {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            title: settings.title.clone(),
            author: settings.author.clone(),
            description: settings.description.clone(),
        }
    }
}

impl From<&HeaderSettings> for HeaderGeometry {
    fn from(settings: &HeaderSettings) -> Self {
        Self {
            avatar_offset: settings.avatar_offset_px,
            header_height: settings.height_px,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChromeService {
    profile: SiteProfile,
    geometry: HeaderGeometry,
}

impl ChromeService {
    pub fn new(profile: SiteProfile, geometry: HeaderGeometry) -> Self {
        Self { profile, geometry }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn view_state<S: PreferenceStore>(&self, store: S, current_path: &str) -> ViewState<S> {
        ViewState::init(store, current_path, &self.geometry)
    }

    pub fn layout<S: PreferenceStore>(
        &self,
        current_path: &str,
        state: &ViewState<S>,
    ) -> LayoutChrome {
        self.layout_for_year(current_path, state, OffsetDateTime::now_utc().year())
    }

    fn layout_for_year<S: PreferenceStore>(
        &self,
        current_path: &str,
        state: &ViewState<S>,
        year: i32,
    ) -> LayoutChrome {
        let theme = state.theme();
        let entries = navigation::primary();

        LayoutChrome {
            title: self.profile.title.clone(),
            brand: BrandView {
                title: self.profile.title.clone(),
                author: self.profile.author.clone(),
                initials: initials(&self.profile.author),
                description: self.profile.description.clone(),
            },
            root: RootView {
                class: state.root().class_attribute(),
                style: state.root().style_attribute(),
            },
            header: HeaderView {
                is_home: state.header_mode().is_home(),
                mode: state.header_mode().as_attribute(),
            },
            theme: ThemeToggleView {
                is_dark: theme.is_dark(),
                label: format!("Switch to {} theme", theme.other()),
            },
            navigation: navigation_view(entries, current_path),
            footer: FooterView {
                links: link_views(entries, current_path),
                copy: footer_copy(&self.profile.author, year),
            },
        }
    }
}

fn initials(author: &str) -> String {
    author
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

fn footer_copy(author: &str, year: i32) -> String {
    format!("\u{a9} {year} {author}. All rights reserved.")
}
