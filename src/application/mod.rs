//! Application services: theme, header geometry, presentation mapping and page
//! assembly.

#[cfg(feature = "server")]
pub mod cards;
pub mod catalog;
#[cfg(feature = "server")]
pub mod chrome;
#[cfg(feature = "server")]
pub mod error;
pub mod header;
#[cfg(feature = "server")]
pub mod navigation;
#[cfg(feature = "server")]
pub mod render;
#[cfg(feature = "server")]
pub mod site;
pub mod theme;
pub mod view_state;
