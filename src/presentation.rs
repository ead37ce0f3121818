//! Presentation port and the in-memory document model.
//!
//! The applier never touches a document directly: it drives a
//! [`PresentationPort`]. [`DocumentState`] is the implementation the server
//! renders pages from, and the one tests inspect.

use crate::preferences::Category;
use serde::Serialize;
use std::collections::BTreeMap;

/// CSS variable holding the primary color
pub const PRIMARY_VARIABLE: &str = "--primary";

/// CSS variable holding the secondary color
pub const SECONDARY_VARIABLE: &str = "--secondary";

/// Operations the applier needs from a document
pub trait PresentationPort {
    /// Applies `value` as the class of `category`, replacing any previous one
    fn apply_class(&mut self, category: Category, value: &str);

    /// Removes whatever `category` currently applies
    fn remove_class(&mut self, category: Category);

    /// Sets a CSS custom property on the root element
    fn set_variable(&mut self, name: &str, value: &str);

    /// Removes a CSS custom property from the root element
    fn clear_variable(&mut self, name: &str);
}

/// Presentation state of the dashboard document
///
/// Mirrors the elements the customizer mutates: the root `dir` attribute,
/// the body class and `text` attribute, the navigation and wrapper classes,
/// root CSS variables, and the selected entry of every option group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentState {
    /// `dir` attribute of the root element
    pub dir: Option<String>,
    /// Class attribute of the body element
    pub body_class: Option<String>,
    /// `text` attribute of the body element
    pub body_text: Option<String>,
    /// Sidebar class on the navigation element
    pub nav_class: Option<String>,
    /// Color theme class on the application wrapper
    pub wrapper_class: Option<String>,
    /// CSS custom properties set on the root element
    pub variables: BTreeMap<String, String>,
    /// Highlighted option per customizer group
    pub selected: BTreeMap<Category, String>,
    #[serde(skip)]
    mutations: usize,
}

impl DocumentState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of changes applied so far; no-op writes are not counted
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Whether `value` is the highlighted option of `category`
    #[must_use]
    pub fn is_selected(&self, category: Category, value: &str) -> bool {
        self.selected.get(&category).is_some_and(|v| v == value)
    }

    /// Inline style for the root element built from the variables
    #[must_use]
    pub fn root_style(&self) -> String {
        self.variables
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Applied value of `category`, as reflected by its selected marker
    #[must_use]
    pub fn applied(&self, category: Category) -> Option<&str> {
        self.selected.get(&category).map(String::as_str)
    }

    fn assign(&mut self, slot: Slot, value: Option<String>) {
        let field = match slot {
            Slot::Dir => &mut self.dir,
            Slot::BodyClass => &mut self.body_class,
            Slot::BodyText => &mut self.body_text,
            Slot::Nav => &mut self.nav_class,
            Slot::Wrapper => &mut self.wrapper_class,
        };
        if *field != value {
            *field = value;
            self.mutations += 1;
        }
    }

    fn select(&mut self, category: Category, value: Option<&str>) {
        let changed = match value {
            Some(value) => self.selected.insert(category, value.to_string()).as_deref() != Some(value),
            None => self.selected.remove(&category).is_some(),
        };
        if changed {
            self.mutations += 1;
        }
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Dir,
    BodyClass,
    BodyText,
    Nav,
    Wrapper,
}

impl PresentationPort for DocumentState {
    fn apply_class(&mut self, category: Category, value: &str) {
        match category {
            Category::Sidebar => self.assign(Slot::Nav, Some(value.to_string())),
            Category::Layout => {
                // box layout is always right-to-left
                if value == "box-layout" {
                    self.assign(Slot::Dir, Some("rtl".to_string()));
                    self.assign(Slot::BodyClass, Some("box-layout rtl".to_string()));
                } else {
                    self.assign(Slot::Dir, Some(value.to_string()));
                    self.assign(Slot::BodyClass, Some(value.to_string()));
                }
            }
            Category::Color => self.assign(Slot::Wrapper, Some(value.to_string())),
            Category::TextSize => self.assign(Slot::BodyText, Some(value.to_string())),
        }
        self.select(category, Some(value));
    }

    fn remove_class(&mut self, category: Category) {
        match category {
            Category::Sidebar => self.assign(Slot::Nav, None),
            Category::Layout => {
                self.assign(Slot::Dir, None);
                self.assign(Slot::BodyClass, None);
            }
            Category::Color => self.assign(Slot::Wrapper, None),
            Category::TextSize => self.assign(Slot::BodyText, None),
        }
        self.select(category, None);
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        if self.variables.get(name).map(String::as_str) != Some(value) {
            self.variables.insert(name.to_string(), value.to_string());
            self.mutations += 1;
        }
    }

    fn clear_variable(&mut self, name: &str) {
        if self.variables.remove(name).is_some() {
            self.mutations += 1;
        }
    }
}
