use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Deserialize;

use motodir_core::Country;
use motodir_osm::{run_extraction, ExtractionSummary};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Optional trigger body. An empty body, or one without `countries`, runs
/// the full EU list.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ImportRequest {
    pub countries: Option<Vec<String>>,
}

/// Trigger an OSM import run and answer with its summary.
///
/// The run executes to completion inside the request, one country at a
/// time; per-country failures are reported in the summary, not as an HTTP
/// error. Unknown country codes are silently dropped before the run
/// starts. A second trigger while a run is in flight is refused with 409 —
/// the importer assumes a single writer.
pub(super) async fn trigger_import(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<ApiResponse<ExtractionSummary>>, ApiError> {
    let request: ImportRequest = if body.is_empty() {
        ImportRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::new(
                req_id.0.clone(),
                "bad_request",
                format!("invalid request body: {e}"),
            )
        })?
    };

    let countries = match request.countries {
        Some(codes) => Country::parse_many(&codes),
        None => Country::ALL.to_vec(),
    };

    let Ok(_guard) = state.import_lock.try_lock() else {
        return Err(ApiError::new(
            req_id.0,
            "conflict",
            "an import run is already in progress",
        ));
    };

    tracing::info!(countries = countries.len(), "import run triggered");
    let summary = run_extraction(&state.overpass, &state.pool, &countries, state.import_delay).await;
    tracing::info!(
        imported = summary.total_imported,
        duplicates = summary.duplicates_skipped,
        failed_countries = summary.errors.len(),
        "import run finished"
    );

    Ok(Json(ApiResponse {
        data: summary,
        meta: ResponseMeta::new(req_id.0),
    }))
}
