use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use calcae_core::{CalculationSnapshot, DisplayedFigures, RevenueInput};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationResponse {
    snapshot: CalculationSnapshot,
    display: DisplayedFigures,
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RevenueInput>,
) -> Json<CalculationResponse> {
    let snapshot = state.calculator_service.calculate(&input);
    let display = snapshot.display();
    Json(CalculationResponse { snapshot, display })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/calculate", post(calculate))
}
