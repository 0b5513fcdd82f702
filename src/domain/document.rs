//! In-memory stand-in for the document root element.
//!
//! The root carries two disjoint attribute sets: theme classes (written by the
//! theme service) and custom style properties (written by the header
//! controller). Both are rendered verbatim onto `<html>`.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    classes: BTreeSet<String>,
    properties: BTreeMap<String, String>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.classes.contains(class) {
            self.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        self.properties.insert(name.to_string(), value.into());
    }

    pub fn remove_property(&mut self, name: &str) {
        self.properties.remove(name);
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Value for the `class` attribute.
    pub fn class_attribute(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    /// Value for the `style` attribute, e.g. `--a: 1px; --b: fixed`.
    pub fn style_attribute(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_render_in_stable_order() {
        let mut root = DocumentRoot::new();
        root.set_property("--header-mb", "-80px");
        root.set_property("--header-height", "144px");
        root.add_class("dark");
        root.add_class("dark");

        assert_eq!(root.class_attribute(), "dark");
        assert_eq!(
            root.style_attribute(),
            "--header-height: 144px; --header-mb: -80px"
        );

        root.remove_property("--header-mb");
        assert_eq!(root.property("--header-mb"), None);
        assert_eq!(root.style_attribute(), "--header-height: 144px");
    }
}
