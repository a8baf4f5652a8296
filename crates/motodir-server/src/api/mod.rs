mod import;
mod shops;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, require_bearer_auth, AuthState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub overpass: Arc<motodir_osm::OverpassClient>,
    /// Pause between country queries during an import run.
    pub import_delay: Duration,
    /// Guard enforcing one import run at a time (the importer assumes a
    /// single writer).
    pub import_lock: Arc<tokio::sync::Mutex<()>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(100).clamp(1, 500)
}

pub(super) fn map_db_error(request_id: String, error: &sqlx::Error) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new(request_id, "internal_error", "database query failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/import/osm", post(import::trigger_import))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/shops", get(shops::list_shops));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match motodir_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use motodir_core::RepairShop;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(pool: sqlx::PgPool, overpass_uri: &str) -> AppState {
        let overpass = motodir_osm::OverpassClient::with_endpoint(overpass_uri, 30, "motodir-test")
            .expect("client");
        AppState {
            pool,
            overpass: Arc::new(overpass),
            import_delay: Duration::ZERO,
            import_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    async fn seed_shop(pool: &sqlx::PgPool, name: &str, osm_id: &str) {
        let shop = RepairShop {
            name: name.to_string(),
            country: "Germany".to_string(),
            city: "Munich".to_string(),
            address: "5 Hauptstr".to_string(),
            latitude: 48.1,
            longitude: 11.5,
            brands: vec!["Honda".to_string()],
            phone: None,
            email: None,
            website: None,
            is_dealer: true,
            osm_id: osm_id.to_string(),
            osm_type: "node".to_string(),
        };
        assert!(motodir_db::insert_shop_if_new(pool, &shop)
            .await
            .expect("seed shop"));
    }

    #[test]
    fn normalize_limit_applies_defaults_and_bounds() {
        assert_eq!(normalize_limit(None), 100);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(10_000)), 500);
        assert_eq!(normalize_limit(Some(25)), 25);
    }

    #[test]
    fn api_error_conflict_maps_to_409() {
        let response = ApiError::new("req-1", "conflict", "import already running").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn api_error_unknown_code_maps_to_500() {
        let response = ApiError::new("req-1", "internal_error", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_returns_ok_with_live_database(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        let app = build_app(test_state(pool, &server.uri()), AuthState::disabled());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert!(json["meta"]["request_id"].is_string());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn shops_listing_is_public_and_ordered(pool: sqlx::PgPool) {
        seed_shop(&pool, "Zweirad Berger", "node/2").await;
        seed_shop(&pool, "Alpen Moto", "node/1").await;

        let server = MockServer::start().await;
        let app = build_app(test_state(pool, &server.uri()), AuthState::with_key("k"));

        // No Authorization header: the listing must still answer.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/shops")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"].as_str(), Some("Alpen Moto"));
        assert_eq!(data[1]["name"].as_str(), Some("Zweirad Berger"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn shops_listing_applies_query_filters(pool: sqlx::PgPool) {
        seed_shop(&pool, "Honda Service Munich", "node/42").await;

        let server = MockServer::start().await;
        let app = build_app(test_state(pool, &server.uri()), AuthState::disabled());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/shops?country=France&brand=Honda")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn import_requires_bearer_token(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        let app = build_app(
            test_state(pool, &server.uri()),
            AuthState::with_key("super-secret"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/osm")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn import_rejects_wrong_token(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        let app = build_app(
            test_state(pool, &server.uri()),
            AuthState::with_key("super-secret"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/osm")
                    .header("authorization", "Bearer wrong")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn import_runs_extraction_and_reports_stats(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "elements": [{
                    "type": "node",
                    "id": 42,
                    "lat": 48.1,
                    "lon": 11.5,
                    "tags": {
                        "name": "Honda Service Munich",
                        "shop": "motorcycle",
                        "service:vehicle:motorcycle": "yes",
                        "addr:city": "Munich"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let app = build_app(
            test_state(pool.clone(), &server.uri()),
            AuthState::with_key("super-secret"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/osm")
                    .header("authorization", "Bearer super-secret")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"countries": ["DE", "ZZ"]}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        // "ZZ" is filtered before extraction, so only Germany is processed.
        assert_eq!(json["data"]["total_imported"].as_u64(), Some(1));
        assert_eq!(json["data"]["countries_processed"].as_u64(), Some(1));
        assert_eq!(json["data"]["errors"].as_array().map(Vec::len), Some(0));
        assert_eq!(motodir_db::count_shops(&pool).await.expect("count"), 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn import_with_only_unknown_codes_is_an_empty_run(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        let app = build_app(
            test_state(pool, &server.uri()),
            AuthState::with_key("super-secret"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/osm")
                    .header("authorization", "Bearer super-secret")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"countries": ["ZZ"]}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["total_imported"].as_u64(), Some(0));
        assert_eq!(json["data"]["countries_processed"].as_u64(), Some(0));
        assert_eq!(json["data"]["errors"].as_array().map(Vec::len), Some(0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn import_rejects_malformed_body(pool: sqlx::PgPool) {
        let server = MockServer::start().await;
        let app = build_app(
            test_state(pool, &server.uri()),
            AuthState::with_key("super-secret"),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/import/osm")
                    .header("authorization", "Bearer super-secret")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
