use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures::{Stream, StreamExt};
use pacfolio_core::{AllocationBasis, BucketGranularity, ValuationOptions};
use serde::Deserialize;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;
use utoipa::IntoParams;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::ValuationReport,
};

const MIN_REFRESH_SECS: u64 = 1;
const MAX_REFRESH_SECS: u64 = 30;
const DEFAULT_REFRESH_SECS: u64 = 1;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `current_value` or `invested`
    basis: Option<String>,
    /// `day`, `month` or `year`
    bucket: Option<String>,
}

impl ReportQuery {
    fn resolve(&self, defaults: ValuationOptions) -> ApiResult<ValuationOptions> {
        resolve_options(self.basis.as_deref(), self.bucket.as_deref(), defaults)
    }
}

/// Applies query overrides on top of the configured options.
fn resolve_options(
    basis: Option<&str>,
    bucket: Option<&str>,
    defaults: ValuationOptions,
) -> ApiResult<ValuationOptions> {
    let basis = match basis {
        Some(basis) => basis
            .parse::<AllocationBasis>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => defaults.basis,
    };
    let granularity = match bucket {
        Some(bucket) => bucket
            .parse::<BucketGranularity>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => defaults.granularity,
    };
    Ok(ValuationOptions { basis, granularity })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamQuery {
    refresh_secs: Option<u64>,
    basis: Option<String>,
    bucket: Option<String>,
}

/// Refresh period of the report stream, held to the 1..=30 s range.
pub fn refresh_period(requested_secs: Option<u64>) -> Duration {
    let secs = requested_secs
        .unwrap_or(DEFAULT_REFRESH_SECS)
        .clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS);
    Duration::from_secs(secs)
}

/// Ticks every `period`. A tick delayed by a slow report pushes the next
/// ones back instead of firing the missed ones in a burst.
fn report_ticks(period: Duration) -> IntervalStream {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    IntervalStream::new(interval)
}

#[utoipa::path(
    get,
    path = "/api/v1/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Fresh valuation report", body = ValuationReport),
        (status = 400, description = "Unknown basis or bucket")
    )
)]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<ValuationReport>> {
    let options = query.resolve(state.valuation_service.default_options())?;
    let report = state.valuation_service.get_report(Some(options)).await;
    Ok(Json(report.into()))
}

async fn stream_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>> {
    let options = resolve_options(
        query.basis.as_deref(),
        query.bucket.as_deref(),
        state.valuation_service.default_options(),
    )?;
    let period = refresh_period(query.refresh_secs);
    tracing::debug!("Streaming reports every {:?}", period);

    let stream = report_ticks(period)
        .then(move |_| {
            let service = state.valuation_service.clone();
            async move { service.get_report(Some(options)).await }
        })
        .filter_map(|report| async move {
            match SseEvent::default()
                .event("report")
                .json_data(ValuationReport::from(report))
            {
                Ok(event) => Some(Ok::<_, Infallible>(event)),
                Err(err) => {
                    tracing::error!("Failed to serialize report event: {}", err);
                    None
                }
            }
        });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/report", get(get_report))
        .route("/events/report", get(stream_report))
}
