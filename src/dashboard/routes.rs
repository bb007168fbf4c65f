use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::chart::{render_page, PageContent, DEFAULT_TITLE};
use crate::dashboard::DashboardState;
use crate::engine::{deposits_from_file, EngineError};
use crate::storage::StorageError;
use crate::transform::{GrowthAggregator, TransformError};
use crate::types::{GrowthMeasure, SortOrder};

#[derive(Debug, Default, Deserialize)]
pub struct GrowthQuery {
    measure: Option<GrowthMeasure>,
    order: Option<SortOrder>
}

impl GrowthQuery {
    fn aggregator(&self, fallback: GrowthAggregator) -> GrowthAggregator {
        GrowthAggregator::new(
            self.measure.unwrap_or(fallback.measure()),
            self.order.unwrap_or(fallback.order())
        )
    }
}

pub fn router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/growth", get(growth))
        .route("/api/deposits", get(deposits))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<Arc<DashboardState>>, Query(query): Query<GrowthQuery>) -> Response {
    match state.growth(query.aggregator(state.aggregator)).await {
        Ok(series) => Html(render_page(&state.title, DEFAULT_TITLE, PageContent::Growth(&series))).into_response(),
        Err(failure) => {
            error!("Dashboard refresh failed: {failure}");
            let page = render_page(&state.title, DEFAULT_TITLE, PageContent::Failure(&failure.to_string()));
            (status_for(&failure), Html(page)).into_response()
        }
    }
}

async fn growth(State(state): State<Arc<DashboardState>>, Query(query): Query<GrowthQuery>) -> Response {
    match state.growth(query.aggregator(state.aggregator)).await {
        Ok(series) => Json(series.as_ref()).into_response(),
        Err(failure) => error_response(&failure)
    }
}

async fn deposits(State(state): State<Arc<DashboardState>>) -> Response {
    match deposits_from_file(&state.report_path).await {
        Ok(rows) => Json(rows).into_response(),
        Err(failure) => error_response(&failure)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "up" }))
}

fn error_response(failure: &EngineError) -> Response {
    error!("Dashboard request failed: {failure}");
    (status_for(failure), Json(json!({ "error": failure.to_string() }))).into_response()
}

pub(super) fn status_for(failure: &EngineError) -> StatusCode {
    match failure {
        EngineError::Storage(StorageError::Schema(TransformError::SchemaMismatch { .. })) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Transform(TransformError::Overflow { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Storage(StorageError::Io(error)) if error.kind() == ErrorKind::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR
    }
}
