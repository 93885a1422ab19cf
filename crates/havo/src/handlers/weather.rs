//! Weather lookup handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use havo_core::weather::FormattedWeatherRecord;

use crate::{
    handlers::{error::BadRequest, AppError},
    state::AppState,
};

const MISSING_KEY: &str =
    "api key is missing or invalid. Please include a valid API key in your request";
const MISSING_QUERY: &str = "parameter q is missing";
const BULK_QUERY_REQUIRED: &str = "parameter q='bulk' is required";

/// Query string shared by the single and bulk endpoints.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub key: Option<String>,
    pub q: Option<String>,
}

impl WeatherParams {
    fn api_key(&self) -> Result<&str, BadRequest> {
        non_blank(self.key.as_deref()).ok_or_else(|| BadRequest::new(MISSING_KEY))
    }

    fn query(&self) -> Result<&str, BadRequest> {
        non_blank(self.q.as_deref()).ok_or_else(|| BadRequest::new(MISSING_QUERY))
    }
}

/// Bulk request body: `{"locations": [{"q": "..."}]}`.
#[derive(Debug, Deserialize)]
pub struct LocationsForm {
    #[serde(default)]
    pub locations: Vec<LocationQueryForm>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQueryForm {
    #[serde(default)]
    pub q: String,
}

impl LocationsForm {
    /// Queries with blank entries dropped.
    fn queries(self) -> Vec<String> {
        self.locations
            .into_iter()
            .map(|location| location.q)
            .filter(|q| !q.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub location: FormattedWeatherRecord,
}

#[derive(Debug, Serialize)]
pub struct BulkWeatherResponse {
    pub bulk: Vec<FormattedWeatherRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found: Option<Vec<String>>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/v1/weather.current?key=&q= - Current weather for one location.
#[axum::debug_handler]
pub async fn current_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<CurrentWeatherResponse>, AppError> {
    let api_key = params.api_key()?;
    let query = params.query()?;

    state.gate.authorize(api_key).await?;

    let location = state.engine.fetch_weather(query).await?;

    Ok(Json(CurrentWeatherResponse { location }))
}

/// POST /api/v1/weather.current?key=&q=bulk - Current weather for many locations.
#[axum::debug_handler]
pub async fn bulk_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
    body: Result<Json<LocationsForm>, JsonRejection>,
) -> Result<Json<BulkWeatherResponse>, AppError> {
    let api_key = params.api_key()?;
    if params.q.as_deref() != Some("bulk") {
        return Err(BadRequest::new(BULK_QUERY_REQUIRED).into());
    }

    state.gate.authorize(api_key).await?;

    let Json(form) = body.map_err(|rejection| BadRequest::new(rejection.body_text()))?;
    let queries = form.queries();
    tracing::debug!(count = queries.len(), "Bulk weather request");

    let result = state.engine.fetch_bulk_weather(&queries).await?;

    Ok(Json(BulkWeatherResponse {
        bulk: result.found,
        not_found: result.not_found,
    }))
}
