//! # ki-admin Library
//!
//! This library provides the core functionality for the ki-admin dashboard shell.
//! ki-admin is a right-to-left admin dashboard whose look is controlled by a small
//! customizer: sidebar mode, layout direction, color theme and text size are chosen
//! from a panel, persisted, and applied to every page before it is served.
//!
//! ## Overview
//!
//! - `config`: Handles application configuration
//! - `error`: Defines custom error types for consistent error handling
//! - `preferences`: Preference names, value domains and defaults
//! - `color`: Theme palettes and hex/rgb conversions
//! - `store`: Namespaced, fail-soft preference storage
//! - `presentation`: The presentation port and the in-memory document model
//! - `customizer`: Applies stored preferences and handles panel commands
//! - `index`: Renders the dashboard page
//! - `settings`: JSON API used by the customizer panel
//! - `server`: Runs the web server and manages routes
//!
//! ## Getting Started
//!
//! ```no_run
//! use ki_admin::{config::CONFIG_FILE, server};
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ki_admin::error::CustomizerError> {
//!     let cancel_token = CancellationToken::new();
//!     let config_path = Some(PathBuf::from(CONFIG_FILE));
//!
//!     server::run(3000, config_path, cancel_token).await
//! }
//! ```
//!
//! The customizer can also be driven without the server, against any
//! storage backend and presentation port:
//!
//! ```
//! use ki_admin::customizer::Customizer;
//! use ki_admin::presentation::DocumentState;
//! use ki_admin::store::{MemoryStorage, PreferenceStore};
//!
//! let store = PreferenceStore::new("ki-admin", MemoryStorage::new());
//! let mut customizer = Customizer::new(store, DocumentState::new());
//! customizer.apply_on_load();
//! customizer.on_user_select("layout-option", "box-layout");
//!
//! assert_eq!(customizer.port().dir.as_deref(), Some("rtl"));
//! ```

/// Custom error types module
///
/// Defines the `CustomizerError` enum used across the crate. Storage and
/// validation errors are mostly logged and swallowed rather than returned.
pub mod error;

/// Configuration management module
///
/// Loads the JSON5 server configuration: dashboard name, storage namespace,
/// preference file, storage quota and static asset directory.
pub mod config;

/// Preference names and value domains
pub mod preferences;

/// Color palettes and conversions
pub mod color;

/// Preference storage module
///
/// Provides the `StorageBackend` trait with file and in-memory backends, and
/// `PreferenceStore`, which namespaces keys and falls back to defaults when
/// storage misbehaves.
pub mod store;

/// Presentation port
///
/// The interface the customizer uses to change the document, plus
/// `DocumentState`, the in-memory document rendered by the server.
pub mod presentation;

/// Preference applier
///
/// Applies stored preferences on load and turns panel commands into
/// presentation changes and storage writes.
pub mod customizer;

/// Index page generation module
///
/// Renders the dashboard shell with the document state and the customizer panel.
pub mod index;

/// Customizer API module
///
/// JSON endpoints for reading the customizer state, selecting options,
/// setting custom colors and resetting.
pub mod settings;

/// Server operations module
///
/// Contains the web server built on Axum: routes, shared state, static files
/// and graceful shutdown.
pub mod server;
