mod middleware;
mod preferences;
mod public;

pub use preferences::CookiePreferenceStore;
pub use public::{HttpState, build_router};
