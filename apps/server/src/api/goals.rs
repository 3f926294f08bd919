use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{main_lib::AppState, models::Goal};

#[utoipa::path(
    get,
    path = "/api/v1/goals",
    responses((status = 200, description = "Capital milestones in display order", body = [Goal]))
)]
pub async fn list_goals(State(state): State<Arc<AppState>>) -> Json<Vec<Goal>> {
    Json(state.goals.iter().cloned().map(Goal::from).collect())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/goals", get(list_goals))
}
