use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "config.json5";

/// Namespace prepended to every stored preference key
pub const DEFAULT_NAMESPACE: &str = "ki-admin";

/// Default file holding the persisted preferences
pub const DEFAULT_STORE_FILE: &str = "preferences.json5";

/// Application configuration structure
///
/// Contains all configuration parameters for the ki-admin dashboard shell
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Name of the dashboard displayed in the page title
    pub site_name: String,
    /// Prefix applied to every key written to the preference storage
    pub namespace: String,
    /// File the preferences are persisted to
    pub store_file: PathBuf,
    /// Maximum size of the preference file in bytes
    pub quota_bytes: Option<usize>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_name: "کی ادمین".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
            quota_bytes: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Load the application configuration from the given JSON5 file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// fails validation
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        tracing::debug!("Loading application configuration from {}", path.display());

        if !path.exists() {
            tracing::info!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = json5::from_str(&config_str)?;
        config.validate()?;

        tracing::info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the site name is empty or the namespace is empty
    /// or contains whitespace
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.site_name.trim().is_empty() {
            return Err(crate::error::CustomizerError::from(
                "Site name cannot be empty",
            ));
        }
        if self.namespace.is_empty() {
            return Err(crate::error::CustomizerError::from(
                "Namespace cannot be empty",
            ));
        }
        if self.namespace.chars().any(char::is_whitespace) {
            return Err(crate::error::CustomizerError::from(
                "Namespace cannot contain whitespace",
            ));
        }
        Ok(())
    }
}
