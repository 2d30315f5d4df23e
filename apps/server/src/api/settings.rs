use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use calcae_core::{RateConfiguration, RateConfigurationUpdate};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<RateConfiguration> {
    Json(state.settings_service.get_configuration())
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RateConfigurationUpdate>,
) -> ApiResult<Json<RateConfiguration>> {
    let updated = state
        .settings_service
        .update_configuration(&payload)
        .await?;
    Ok(Json(updated))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
