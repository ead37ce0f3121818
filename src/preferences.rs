//! Preference names, their value domains and defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage suffix of the primary color derived from the selected theme
pub const COLOR_PRIMARY_KEY: &str = "color-primary";

/// Storage suffix of the secondary color derived from the selected theme
pub const COLOR_SECONDARY_KEY: &str = "color-secondary";

/// A customizer option group
///
/// Each category owns an independent class namespace in the document, so
/// applying one never disturbs another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Sidebar layout mode, applied to the navigation element
    #[serde(rename = "sidebar-option")]
    Sidebar,
    /// Layout direction, applied to the root and body elements
    #[serde(rename = "layout-option")]
    Layout,
    /// Color theme, applied to the application wrapper
    #[serde(rename = "color-option")]
    Color,
    /// Text size, applied to the body element
    #[serde(rename = "text-option")]
    TextSize,
}

impl Category {
    /// All categories in the order they are applied on load
    pub const ALL: [Category; 4] = [
        Category::Sidebar,
        Category::Layout,
        Category::Color,
        Category::TextSize,
    ];

    /// Name used as the storage key suffix
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Sidebar => "sidebar-option",
            Category::Layout => "layout-option",
            Category::Color => "color-option",
            Category::TextSize => "text-option",
        }
    }

    #[must_use]
    pub fn default_value(self) -> &'static str {
        match self {
            Category::Sidebar => "vertical-sidebar",
            Category::Layout => "rtl",
            Category::Color => "default",
            Category::TextSize => "medium-text",
        }
    }

    /// Enumerated values accepted for this category
    #[must_use]
    pub fn allowed_values(self) -> &'static [&'static str] {
        match self {
            Category::Sidebar => &["vertical-sidebar", "horizontal-sidebar", "dark-sidebar"],
            Category::Layout => &["rtl", "ltr", "box-layout"],
            Category::Color => &["default", "gold", "warm", "happy", "nature", "hot"],
            Category::TextSize => &["small-text", "medium-text", "large-text"],
        }
    }

    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = crate::error::CustomizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| crate::error::CustomizerError::from(format!("Unknown preference: {s}")))
    }
}

/// Current value of every customizer preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PreferenceSet {
    pub sidebar_option: String,
    pub layout_option: String,
    pub color_option: String,
    pub text_option: String,
    /// Primary color as `#rrggbb`, absent until a color is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
    /// Secondary color as `#rrggbb`, absent until a color is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_secondary: Option<String>,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            sidebar_option: Category::Sidebar.default_value().to_string(),
            layout_option: Category::Layout.default_value().to_string(),
            color_option: Category::Color.default_value().to_string(),
            text_option: Category::TextSize.default_value().to_string(),
            color_primary: None,
            color_secondary: None,
        }
    }
}

impl PreferenceSet {
    #[must_use]
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Sidebar => &self.sidebar_option,
            Category::Layout => &self.layout_option,
            Category::Color => &self.color_option,
            Category::TextSize => &self.text_option,
        }
    }
}
