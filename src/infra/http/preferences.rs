//! Cookie-backed preference storage.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::application::theme::{PreferenceStore, StoreError};

const PREFERENCE_MAX_AGE_DAYS: i64 = 365;

/// Preference store over the request's cookies; writes become `Set-Cookie`
/// headers once the jar is returned with the response.
#[derive(Debug, Default)]
pub struct CookiePreferenceStore {
    jar: CookieJar,
}

impl CookiePreferenceStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl PreferenceStore for CookiePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.jar.get(key).map(|cookie| cookie.value().to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.chars().any(|ch| ch.is_ascii_control() || ch == ';') {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "value is not cookie-safe".to_string(),
            });
        }

        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(Duration::days(PREFERENCE_MAX_AGE_DAYS))
            .build();
        self.jar = std::mem::take(&mut self.jar).add(cookie);
        Ok(())
    }
}
