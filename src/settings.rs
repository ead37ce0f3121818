//! JSON API behind the customizer panel.
//!
//! Invalid selections are not errors for the client: they come back with
//! status 200 and `"outcome": "rejected"`.

use crate::customizer::{CustomizerCommand, Outcome};
use crate::preferences::PreferenceSet;
use crate::presentation::DocumentState;
use crate::server::{lock_customizer, AppState};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Persisted preferences together with the document they produce
#[derive(Debug, Serialize)]
pub struct CustomizerSnapshot {
    pub preferences: PreferenceSet,
    pub document: DocumentState,
}

/// Body of `POST /api/customizer/select`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SelectRequest {
    pub category: String,
    pub value: String,
}

/// Body of `POST /api/customizer/colors`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ColorsRequest {
    pub primary: String,
    pub secondary: String,
}

fn dispatch(state: &AppState, command: CustomizerCommand) -> axum::response::Response {
    let mut customizer = match lock_customizer(state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let outcome: Outcome = customizer.handle(command);
    Json(outcome).into_response()
}

/// Returns the current preferences and document state
pub async fn get_customizer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Reading customizer state");
    let customizer = match lock_customizer(&state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    Json(CustomizerSnapshot {
        preferences: customizer.preferences(),
        document: customizer.port().clone(),
    })
    .into_response()
}

/// Applies an option clicked in the customizer panel
pub async fn select_option(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SelectRequest>,
) -> impl IntoResponse {
    info!("Customizer selection {}={}", payload.category, payload.value);
    dispatch(
        &state,
        CustomizerCommand::Select {
            category: payload.category,
            value: payload.value,
        },
    )
}

/// Applies custom primary and secondary colors
pub async fn set_colors(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ColorsRequest>,
) -> impl IntoResponse {
    info!("Customizer colors {} / {}", payload.primary, payload.secondary);
    dispatch(
        &state,
        CustomizerCommand::SetColors {
            primary: payload.primary,
            secondary: payload.secondary,
        },
    )
}

/// Resets every preference to its default
pub async fn reset_customizer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!("Resetting customizer");
    dispatch(&state, CustomizerCommand::Reset)
}
