use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use speech_report::error::AppError;
use speech_report::report::LatestSpeechSummary;
use speech_report::sources::PoliticianSource;
use speech_report::{LatestSpeechReporter, Politician};

pub(crate) fn service_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/speeches/latest",
            get(configured_latest_endpoint).post(latest_speeches_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Reports over the politician documents posted in the request body.
///
/// Bodies that do not decode into politician documents are answered with the
/// same `{"error": ...}` shape as invalid records.
pub(crate) async fn latest_speeches_endpoint(
    payload: Result<Json<Vec<Politician>>, JsonRejection>,
) -> Result<Json<LatestSpeechSummary>, AppError> {
    let Json(politicians) = payload?;
    let latest = LatestSpeechReporter::compute_latest_speeches(&politicians)?;
    Ok(Json(latest.summary(politicians.len())))
}

/// Reports over the export configured through `APP_SOURCE_PATH`.
pub(crate) async fn configured_latest_endpoint(Extension(state): Extension<AppState>) -> Response {
    let Some(source) = state.source.clone() else {
        let payload = json!({
            "error": "no politician export configured; set APP_SOURCE_PATH",
        });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let report = tokio::task::spawn_blocking(move || report_from_source(source.as_ref()))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))
        .and_then(|report| report);

    match report {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => err.into_response(),
    }
}

fn report_from_source(source: &dyn PoliticianSource) -> Result<LatestSpeechSummary, AppError> {
    let politicians = source.load()?;
    let latest = LatestSpeechReporter::compute_latest_speeches(&politicians)?;
    Ok(latest.summary(politicians.len()))
}
