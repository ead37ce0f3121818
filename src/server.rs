use crate::config::Config;
use crate::customizer::Customizer;
use crate::error::Result;
use crate::index::generate_index;
use crate::presentation::DocumentState;
use crate::settings::{get_customizer, reset_customizer, select_option, set_colors};
use crate::store::{FileStorage, PreferenceStore};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;

/// Customizer backed by the preference file and the rendered document
pub type SharedCustomizer = Customizer<FileStorage, DocumentState>;

/// State shared by every request handler
pub struct AppState {
    pub config: Config,
    pub customizer: Mutex<SharedCustomizer>,
}

impl AppState {
    /// Builds the state and applies the stored preferences once
    #[must_use]
    pub fn new(config: Config) -> Self {
        let storage = FileStorage::new(config.store_file.clone()).with_quota(config.quota_bytes);
        let store = PreferenceStore::new(config.namespace.clone(), storage);
        let mut customizer = Customizer::new(store, DocumentState::new());
        customizer.apply_on_load();

        Self {
            config,
            customizer: Mutex::new(customizer),
        }
    }
}

/// Locks the customizer, turning a poisoned lock into a 500 response
pub(crate) fn lock_customizer(
    state: &AppState,
) -> std::result::Result<MutexGuard<'_, SharedCustomizer>, Response> {
    state.customizer.lock().map_err(|_| {
        tracing::error!("Customizer lock poisoned");
        (StatusCode::INTERNAL_SERVER_ERROR, "Customizer lock error").into_response()
    })
}

/// Builds the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/", get(generate_index))
        .route("/api/customizer", get(get_customizer))
        .route("/api/customizer/select", post(select_option))
        .route("/api/customizer/colors", post(set_colors))
        .route("/api/customizer/reset", post(reset_customizer))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Run the web server on the specified port.
///
/// # Arguments
///
/// * `port` - The port number to bind the server to
/// * `config_path` - Configuration file, `config.json5` when `None`
/// * `cancel_token` - Cancelling it shuts the server down gracefully
///
/// # Returns
///
/// Returns `Ok(())` once the server has shut down, or a `CustomizerError` if an error occurs
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be read, parsed or validated
/// - The address string cannot be parsed into a valid `SocketAddr`
/// - The server fails to bind to the specified address
pub async fn run(
    port: u16,
    config_path: Option<PathBuf>,
    cancel_token: CancellationToken,
) -> Result<()> {
    tracing::info!("Initializing server");

    let config_path = config_path.unwrap_or_else(|| PathBuf::from(crate::config::CONFIG_FILE));
    let config = Config::load(&config_path)?;
    tracing::info!(
        "Persisting preferences to {} under namespace '{}'",
        config.store_file.display(),
        config.namespace
    );

    let app = router(Arc::new(AppState::new(config)));
    tracing::debug!("Routes configured");

    let addr = format!("0.0.0.0:{port}");
    let address: SocketAddr = addr.parse()?;
    tracing::info!("Binding server to address: {address}");

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(crate::error::CustomizerError::ServerRun)?;

    tracing::info!("Site launched on: http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .map_err(crate::error::CustomizerError::ServerRun)?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
