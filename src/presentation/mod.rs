//! Askama views shared by the HTTP surface and the static export.

pub mod views;
