//! The preference applier.
//!
//! `Customizer` keeps the presentation port in sync with the preference
//! store. Selector clicks arrive as [`CustomizerCommand`]s and are handled
//! one at a time; every failure is logged and leaves the previous state in
//! place.

use crate::color::{hex_to_rgb, palette, parse_hex, rgb_to_hex};
use crate::error::CustomizerError;
use crate::preferences::{Category, PreferenceSet, COLOR_PRIMARY_KEY, COLOR_SECONDARY_KEY};
use crate::presentation::{PresentationPort, PRIMARY_VARIABLE, SECONDARY_VARIABLE};
use crate::store::{PreferenceStore, StorageBackend};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A user interaction with the customizer panel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum CustomizerCommand {
    /// An option was clicked in one of the groups
    Select { category: String, value: String },
    /// Custom primary and secondary colors were submitted
    SetColors { primary: String, secondary: String },
    /// The reset button was pressed
    Reset,
}

/// Result of handling a command
///
/// Serializes as `{ "outcome": ..., "reload": ... }` for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "OutcomeBody")]
pub enum Outcome {
    /// State changed; `reload` asks the client to reload the page
    Applied { reload: bool },
    /// The command matched the current state
    Unchanged,
    /// The command was invalid and ignored
    Rejected,
}

#[derive(Serialize)]
struct OutcomeBody {
    outcome: &'static str,
    reload: bool,
}

impl From<Outcome> for OutcomeBody {
    fn from(outcome: Outcome) -> Self {
        let (outcome, reload) = match outcome {
            Outcome::Applied { reload } => ("applied", reload),
            Outcome::Unchanged => ("unchanged", false),
            Outcome::Rejected => ("rejected", false),
        };
        Self { outcome, reload }
    }
}

/// Applies stored preferences to a presentation port and keeps both in sync
pub struct Customizer<B, P> {
    store: PreferenceStore<B>,
    port: P,
}

impl<B: StorageBackend, P: PresentationPort> Customizer<B, P> {
    pub fn new(store: PreferenceStore<B>, port: P) -> Self {
        Self { store, port }
    }

    #[must_use]
    pub fn store(&self) -> &PreferenceStore<B> {
        &self.store
    }

    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Current preferences as persisted
    pub fn preferences(&self) -> PreferenceSet {
        self.store.snapshot()
    }

    /// Applies every stored preference to the port
    ///
    /// Categories are applied in the order of [`Category::ALL`]. Stored values
    /// outside a category's domain are presented as the default. Running
    /// this twice leaves the port exactly as running it once.
    pub fn apply_on_load(&mut self) {
        for category in Category::ALL {
            let stored = self.store.get(category.key(), category.default_value());
            let value = if category.accepts(&stored) {
                stored
            } else {
                warn!("Stored {category} value '{stored}' is not recognised, using default");
                category.default_value().to_string()
            };
            self.port.apply_class(category, &value);
        }

        self.apply_stored_color(COLOR_PRIMARY_KEY, PRIMARY_VARIABLE);
        self.apply_stored_color(COLOR_SECONDARY_KEY, SECONDARY_VARIABLE);

        debug!("Applied stored preferences");
    }

    fn apply_stored_color(&mut self, key: &str, variable: &str) {
        let Some(hex) = self.store.get_opt(key) else {
            return;
        };
        match hex_to_rgb(&hex, None) {
            Ok(rgb) => self.port.set_variable(variable, &rgb),
            Err(e) => warn!("Ignoring stored {key}: {e}"),
        }
    }

    /// Handles a click on `value` in the `category` group
    ///
    /// Unknown categories and values outside the domain are rejected without
    /// touching the port or the store. Selecting the current value again is
    /// a no-op. Color changes report that the page should be reloaded.
    pub fn on_user_select(&mut self, category: &str, value: &str) -> Outcome {
        let parsed = match category.parse::<Category>() {
            Ok(parsed) if parsed.accepts(value) => parsed,
            _ => {
                let err = CustomizerError::InvalidPreferenceValue {
                    name: category.to_string(),
                    value: value.to_string(),
                };
                warn!("Ignoring selection: {err}");
                return Outcome::Rejected;
            }
        };

        let current = self.store.get(parsed.key(), parsed.default_value());
        if current == value {
            self.port.apply_class(parsed, value);
            return Outcome::Unchanged;
        }

        self.port.remove_class(parsed);
        self.port.apply_class(parsed, value);
        self.store.set(parsed.key(), value);

        if parsed == Category::Color {
            if let Some(theme) = palette(value) {
                let primary = rgb_to_hex(theme.primary.0, theme.primary.1, theme.primary.2);
                let secondary =
                    rgb_to_hex(theme.secondary.0, theme.secondary.1, theme.secondary.2);
                self.store_color(&primary, &secondary);
            }
        }

        info!("Preference {parsed} changed from '{current}' to '{value}'");
        Outcome::Applied {
            reload: parsed == Category::Color,
        }
    }

    /// Applies and persists custom primary and secondary colors
    pub fn set_custom_colors(&mut self, primary: &str, secondary: &str) -> Outcome {
        for (name, hex) in [(COLOR_PRIMARY_KEY, primary), (COLOR_SECONDARY_KEY, secondary)] {
            if let Err(e) = parse_hex(hex) {
                warn!(
                    "Ignoring colors: {}",
                    CustomizerError::InvalidPreferenceValue {
                        name: name.to_string(),
                        value: format!("{hex} ({e})"),
                    }
                );
                return Outcome::Rejected;
            }
        }

        let primary = primary.to_ascii_lowercase();
        let secondary = secondary.to_ascii_lowercase();
        if self.store.get_opt(COLOR_PRIMARY_KEY).as_deref() == Some(primary.as_str())
            && self.store.get_opt(COLOR_SECONDARY_KEY).as_deref() == Some(secondary.as_str())
        {
            return Outcome::Unchanged;
        }

        self.store_color(&primary, &secondary);
        info!("Custom colors set to {primary} / {secondary}");
        Outcome::Applied { reload: false }
    }

    fn store_color(&mut self, primary: &str, secondary: &str) {
        for (key, variable, hex) in [
            (COLOR_PRIMARY_KEY, PRIMARY_VARIABLE, primary),
            (COLOR_SECONDARY_KEY, SECONDARY_VARIABLE, secondary),
        ] {
            match hex_to_rgb(hex, None) {
                Ok(rgb) => {
                    self.port.set_variable(variable, &rgb);
                    self.store.set(key, hex);
                }
                Err(e) => warn!("Skipping {key}: {e}"),
            }
        }
    }

    /// Clears every preference and re-derives the presentation from defaults
    ///
    /// Reset always reports `reload: true`; the port has already been
    /// re-applied from the cleared store when this returns.
    pub fn reset(&mut self) -> Outcome {
        for category in Category::ALL {
            self.port.remove_class(category);
        }
        self.port.clear_variable(PRIMARY_VARIABLE);
        self.port.clear_variable(SECONDARY_VARIABLE);

        self.store.reset_all();
        info!("Preferences reset to defaults");

        self.apply_on_load();
        Outcome::Applied { reload: true }
    }

    /// Dispatches a command to the matching operation
    pub fn handle(&mut self, command: CustomizerCommand) -> Outcome {
        match command {
            CustomizerCommand::Select { category, value } => self.on_user_select(&category, &value),
            CustomizerCommand::SetColors { primary, secondary } => {
                self.set_custom_colors(&primary, &secondary)
            }
            CustomizerCommand::Reset => self.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::DocumentState;
    use crate::store::MemoryStorage;

    fn customizer() -> Customizer<MemoryStorage, DocumentState> {
        Customizer::new(
            PreferenceStore::new("ki-admin", MemoryStorage::new()),
            DocumentState::new(),
        )
    }

    #[test]
    fn test_empty_store_applies_documented_defaults() {
        let mut c = customizer();
        c.apply_on_load();

        let doc = c.port();
        assert_eq!(doc.nav_class.as_deref(), Some("vertical-sidebar"));
        assert_eq!(doc.wrapper_class.as_deref(), Some("default"));
        assert_eq!(doc.body_text.as_deref(), Some("medium-text"));
        assert_eq!(doc.dir.as_deref(), Some("rtl"));
        assert_eq!(doc.body_class.as_deref(), Some("rtl"));
        assert!(doc.variables.is_empty());
    }

    #[test]
    fn test_apply_on_load_is_idempotent() {
        let mut c = customizer();
        c.on_user_select("sidebar-option", "horizontal-sidebar");
        c.on_user_select("color-option", "nature");

        c.apply_on_load();
        let once = c.port().clone();
        c.apply_on_load();

        assert_eq!(c.port(), &once);
        assert_eq!(c.port().mutations(), once.mutations());
    }

    #[test]
    fn test_selecting_same_value_twice_causes_no_churn() {
        let mut c = customizer();
        c.apply_on_load();

        assert_eq!(
            c.on_user_select("text-option", "large-text"),
            Outcome::Applied { reload: false }
        );
        let after_first = c.port().clone();

        assert_eq!(c.on_user_select("text-option", "large-text"), Outcome::Unchanged);
        assert_eq!(c.port(), &after_first);
        assert_eq!(c.port().mutations(), after_first.mutations());
    }

    #[test]
    fn test_box_layout_selection_persists_and_sets_rtl() {
        let mut c = customizer();
        c.apply_on_load();

        c.on_user_select("layout-option", "box-layout");

        assert_eq!(c.store().get("layout-option", "rtl"), "box-layout");
        assert_eq!(c.port().dir.as_deref(), Some("rtl"));
        assert_eq!(c.port().body_class.as_deref(), Some("box-layout rtl"));
    }

    #[test]
    fn test_invalid_selection_keeps_previous_state() {
        let mut c = customizer();
        c.apply_on_load();
        c.on_user_select("sidebar-option", "dark-sidebar");
        let before = c.port().clone();

        assert_eq!(c.on_user_select("sidebar-option", "floating"), Outcome::Rejected);
        assert_eq!(c.on_user_select("font-option", "serif"), Outcome::Rejected);

        assert_eq!(c.port(), &before);
        assert_eq!(c.store().get("sidebar-option", "vertical-sidebar"), "dark-sidebar");
    }

    #[test]
    fn test_color_selection_stores_palette_and_requests_reload() {
        let mut c = customizer();
        c.apply_on_load();

        assert_eq!(
            c.on_user_select("color-option", "hot"),
            Outcome::Applied { reload: true }
        );

        let prefs = c.preferences();
        assert_eq!(prefs.color_option, "hot");
        assert_eq!(prefs.color_primary.as_deref(), Some("#c82e42"));
        assert_eq!(prefs.color_secondary.as_deref(), Some("#504a4a"));
        assert_eq!(c.port().wrapper_class.as_deref(), Some("hot"));
        assert_eq!(
            c.port().variables.get(PRIMARY_VARIABLE).map(String::as_str),
            Some("rgb(200, 46, 66)")
        );
    }

    #[test]
    fn test_custom_colors_are_validated_and_applied() {
        let mut c = customizer();
        assert_eq!(c.set_custom_colors("#12", "#ffffff"), Outcome::Rejected);
        assert_eq!(c.preferences().color_primary, None);

        assert_eq!(
            c.set_custom_colors("#0A0B0C", "#ffffff"),
            Outcome::Applied { reload: false }
        );
        assert_eq!(c.set_custom_colors("#0a0b0c", "#FFFFFF"), Outcome::Unchanged);
        assert_eq!(c.preferences().color_primary.as_deref(), Some("#0a0b0c"));
        assert_eq!(
            c.port().variables.get(SECONDARY_VARIABLE).map(String::as_str),
            Some("rgb(255, 255, 255)")
        );
    }

    #[test]
    fn test_stored_colors_are_applied_on_load() {
        let mut backend = MemoryStorage::new();
        backend.set_item("ki-admin-color-primary", "#010203").unwrap();
        backend.set_item("ki-admin-color-secondary", "garbage").unwrap();
        let mut c = Customizer::new(PreferenceStore::new("ki-admin", backend), DocumentState::new());

        c.apply_on_load();

        assert_eq!(
            c.port().variables.get(PRIMARY_VARIABLE).map(String::as_str),
            Some("rgb(1, 2, 3)")
        );
        assert!(!c.port().variables.contains_key(SECONDARY_VARIABLE));
    }

    #[test]
    fn test_out_of_domain_stored_value_presents_default() {
        let mut backend = MemoryStorage::new();
        backend.set_item("ki-admin-text-option", "gigantic-text").unwrap();
        let mut c = Customizer::new(PreferenceStore::new("ki-admin", backend), DocumentState::new());

        c.apply_on_load();

        assert_eq!(c.port().body_text.as_deref(), Some("medium-text"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut c = customizer();
        c.apply_on_load();
        c.on_user_select("sidebar-option", "dark-sidebar");
        c.on_user_select("color-option", "gold");
        c.on_user_select("layout-option", "box-layout");

        assert_eq!(c.reset(), Outcome::Applied { reload: true });

        assert_eq!(c.preferences(), PreferenceSet::default());
        let mut fresh = customizer();
        fresh.apply_on_load();
        assert_eq!(c.port().nav_class, fresh.port().nav_class);
        assert_eq!(c.port().wrapper_class, fresh.port().wrapper_class);
        assert_eq!(c.port().body_class, fresh.port().body_class);
        assert_eq!(c.port().selected, fresh.port().selected);
        assert!(c.port().variables.is_empty());
    }

    #[test]
    fn test_handle_dispatches_commands() {
        let mut c = customizer();
        c.apply_on_load();

        let command: CustomizerCommand = serde_json::from_str(
            r#"{"command":"select","category":"text-option","value":"small-text"}"#,
        )
        .unwrap();
        assert_eq!(c.handle(command), Outcome::Applied { reload: false });
        assert_eq!(c.port().body_text.as_deref(), Some("small-text"));

        assert_eq!(c.handle(CustomizerCommand::Reset), Outcome::Applied { reload: true });
        assert_eq!(c.port().body_text.as_deref(), Some("medium-text"));
    }

    #[test]
    fn test_select_and_reset_survive_foreign_entries_in_file() {
        use crate::store::FileStorage;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json5");
        std::fs::write(&path, r#"{"other-app-count": 3}"#).unwrap();
        let mut c = Customizer::new(
            PreferenceStore::new("ki-admin", FileStorage::new(&path)),
            DocumentState::new(),
        );
        c.apply_on_load();

        c.on_user_select("sidebar-option", "dark-sidebar");
        assert_eq!(c.store().get("sidebar-option", "vertical-sidebar"), "dark-sidebar");
        c.apply_on_load();
        assert_eq!(c.port().nav_class.as_deref(), Some("dark-sidebar"));

        c.reset();
        assert_eq!(c.store().get("sidebar-option", "vertical-sidebar"), "vertical-sidebar");
        c.on_user_select("text-option", "large-text");
        assert_eq!(c.store().get("text-option", "medium-text"), "large-text");

        let stored: serde_json::Value =
            json5::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(stored.get("other-app-count").is_some());
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(Outcome::Applied { reload: true }).unwrap(),
            serde_json::json!({"outcome": "applied", "reload": true})
        );
        assert_eq!(
            serde_json::to_value(Outcome::Rejected).unwrap(),
            serde_json::json!({"outcome": "rejected", "reload": false})
        );
        assert_eq!(
            serde_json::to_value(Outcome::Unchanged).unwrap(),
            serde_json::json!({"outcome": "unchanged", "reload": false})
        );
    }
}
