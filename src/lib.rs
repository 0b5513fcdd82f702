//! Folio: a small server-rendered personal blog.
//!
//! The `server` feature (default) carries the HTTP surface and the static
//! build. The `hydrate` feature compiles the browser binding that keeps the
//! header in step with scrolling.

pub mod application;
#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(feature = "server")]
pub mod config;
pub mod domain;
#[cfg(feature = "server")]
pub mod infra;
#[cfg(feature = "server")]
pub mod presentation;
