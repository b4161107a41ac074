//! Sector colors per category family.

use serde::Deserialize;

use crate::profile::Category;

/// Inner-ring and outer-ring colors for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFamily<'a> {
    /// Fill for the root and category rings
    pub light: &'a str,
    /// Fill for rings at depth 2 and below
    pub dark: &'a str,
    /// Fill for leaf bars
    pub outer_ring: &'a str,
}

/// Named colors used by the chart; any subset may be overridden in options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub traits_dark: String,
    pub traits_light: String,
    pub facet: String,
    pub needs_dark: String,
    pub needs_light: String,
    pub need: String,
    pub values_dark: String,
    pub values_light: String,
    pub value: String,
    pub behavior_dark: String,
    pub behavior_light: String,
    pub behavior: String,
    /// Used for the root, which belongs to no category
    pub neutral: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            traits_dark: "#1b6ba2".into(),
            traits_light: "#bed8ec".into(),
            facet: "#5a9fd4".into(),
            needs_dark: "#7e3f9d".into(),
            needs_light: "#dcc7e8".into(),
            need: "#a86fc7".into(),
            values_dark: "#2f7f45".into(),
            values_light: "#c9e6d1".into(),
            value: "#5fb376".into(),
            behavior_dark: "#b0571d".into(),
            behavior_light: "#f3d6c2".into(),
            behavior: "#dc8a52".into(),
            neutral: "#d9d9d9".into(),
        }
    }
}

impl Palette {
    /// Colors for a node's category key
    pub fn family(&self, color_key: &str) -> ColorFamily<'_> {
        match Category::from_id(color_key) {
            Some(Category::Personality) => ColorFamily {
                light: &self.traits_light,
                dark: &self.traits_dark,
                outer_ring: &self.facet,
            },
            Some(Category::Needs) => ColorFamily {
                light: &self.needs_light,
                dark: &self.needs_dark,
                outer_ring: &self.need,
            },
            Some(Category::Values) => ColorFamily {
                light: &self.values_light,
                dark: &self.values_dark,
                outer_ring: &self.value,
            },
            Some(Category::Behavior) => ColorFamily {
                light: &self.behavior_light,
                dark: &self.behavior_dark,
                outer_ring: &self.behavior,
            },
            None => ColorFamily {
                light: &self.neutral,
                dark: &self.neutral,
                outer_ring: &self.neutral,
            },
        }
    }
}
