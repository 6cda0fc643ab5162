/// HTTP API для ML моделей

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::dashboard::{PageSummary, View};
use crate::dataset::Dataset;
use crate::error::PredictionError;
use crate::models::PredictionService;
use crate::preprocessing::normalize_income;
use crate::types::{
    NormalizeIncomeRequest, NormalizeIncomeResponse, PredictionQuery, PredictionRequest,
    PredictionResponse, RawValue, Record,
};

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    service: PredictionService,
}

impl AppState {
    pub fn new(dataset: Dataset, service: PredictionService) -> Self {
        Self {
            dataset: Arc::new(dataset),
            service,
        }
    }
}

#[derive(Debug)]
pub struct ApiError(PredictionError);

impl From<PredictionError> for ApiError {
    fn from(value: PredictionError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            PredictionError::Fit(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PredictionError::InsufficientData(_)
            | PredictionError::InsufficientClassDiversity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/normalize-income", post(normalize))
        .route("/api/predict/income", post(predict_income))
        .route("/api/predict/employment-type", post(predict_employment_type))
        .route("/api/dashboard", get(dashboard))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Labor ML API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn normalize(Json(request): Json<NormalizeIncomeRequest>) -> Json<NormalizeIncomeResponse> {
    Json(NormalizeIncomeResponse {
        value: normalize_income(RawValue::from_json(&request.value).as_ref()),
    })
}

/// Переданные строки либо загруженный набор, с опциональным фильтром по году
fn training_records(state: &AppState, request: &PredictionRequest) -> Vec<Record> {
    let records = request
        .records
        .as_deref()
        .unwrap_or_else(|| state.dataset.records());

    match request.year {
        Some(year) => records
            .iter()
            .filter(|r| r.year == Some(year))
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

async fn predict_income(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let records = training_records(&state, &request);
    tracing::info!("Income prediction request: {} records", records.len());

    let query = PredictionQuery::new(request.age, request.sex.clone());
    let (prediction, training_rows) = state
        .service
        .predict_income(&records, &query)
        .map_err(|e| {
            tracing::warn!("Income prediction failed: {}", e);
            e
        })?;

    Ok(Json(PredictionResponse {
        prediction,
        training_rows,
    }))
}

async fn predict_employment_type(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let records = training_records(&state, &request);
    tracing::info!("Employment type prediction request: {} records", records.len());

    let query = PredictionQuery::new(request.age, request.sex.clone());
    let (prediction, training_rows) = state
        .service
        .predict_employment_type(&records, &query)
        .map_err(|e| {
            tracing::warn!("Employment type prediction failed: {}", e);
            e
        })?;

    Ok(Json(PredictionResponse {
        prediction,
        training_rows,
    }))
}

#[derive(Debug, Deserialize)]
struct DashboardParams {
    page: Option<String>,
    year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    view: View,
    title: &'static str,
    year: Option<i32>,
    years: Vec<i32>,
    summary: PageSummary,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardResponse> {
    let view = View::from_param(params.page.as_deref());
    let years = state.dataset.years();
    // По умолчанию первый год, как в селекторе
    let year = params.year.or_else(|| years.first().copied());

    let summary = match year {
        Some(year) => PageSummary::for_view(view, &state.dataset.for_year(year)),
        None => PageSummary::for_view(view, state.dataset.records()),
    };

    Json(DashboardResponse {
        view,
        title: view.title(),
        year,
        years,
        summary,
    })
}
