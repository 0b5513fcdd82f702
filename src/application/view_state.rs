//! Per-client view state: the document root plus the theme preference that
//! owns its classes. One instance lives for one page render.

use crate::domain::{document::DocumentRoot, theme::ThemePreference};

use super::header::{HeaderGeometry, HeaderMode};
use super::theme::{PreferenceStore, ThemePersistence};

#[derive(Debug)]
pub struct ViewState<S> {
    root: DocumentRoot,
    theme: ThemePersistence<S>,
    header_mode: HeaderMode,
}

impl<S: PreferenceStore> ViewState<S> {
    /// Read the persisted theme and paint the header's first frame.
    pub fn init(store: S, current_path: &str, geometry: &HeaderGeometry) -> Self {
        let mut root = DocumentRoot::new();
        let theme = ThemePersistence::init(store, &mut root);
        let header_mode = HeaderMode::for_path(current_path);
        geometry.first_frame(header_mode).write_to(&mut root);

        Self {
            root,
            theme,
            header_mode,
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.get_preference()
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.theme.set_preference(preference, &mut self.root);
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme.toggle(&mut self.root)
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    pub fn header_mode(&self) -> HeaderMode {
        self.header_mode
    }

    pub fn into_store(self) -> S {
        self.theme.into_store()
    }
}
