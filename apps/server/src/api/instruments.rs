use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{main_lib::AppState, models::Instrument};

#[utoipa::path(
    get,
    path = "/api/v1/instruments",
    responses((status = 200, description = "Instrument catalogue", body = [Instrument]))
)]
pub async fn list_instruments(State(state): State<Arc<AppState>>) -> Json<Vec<Instrument>> {
    let instruments = state
        .quote_service
        .catalog()
        .instruments()
        .iter()
        .map(Instrument::from)
        .collect();
    Json(instruments)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/instruments", get(list_instruments))
}
