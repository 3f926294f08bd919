use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{main_lib::AppState, models::InstrumentPrice};

#[utoipa::path(
    get,
    path = "/api/v1/prices",
    responses((status = 200, description = "Live price per instrument, 0 when unavailable", body = [InstrumentPrice]))
)]
pub async fn get_prices(State(state): State<Arc<AppState>>) -> Json<Vec<InstrumentPrice>> {
    let prices = state.quote_service.get_instrument_prices().await;
    Json(prices.into_iter().map(InstrumentPrice::from).collect())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/prices", get(get_prices))
}
