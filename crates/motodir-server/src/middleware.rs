use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use motodir_core::{AppConfig, Environment};

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer auth settings for the import trigger endpoint.
///
/// Holds the single server-side secret. In development a missing secret
/// disables auth for local iteration; outside development it fails startup.
#[derive(Clone)]
pub struct AuthState {
    api_key: Option<Arc<str>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from the loaded [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Fails when no import key is configured outside development.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match config.import_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(Self {
                api_key: Some(Arc::from(key)),
                enabled: true,
            }),
            _ if config.env == Environment::Development => {
                tracing::warn!(
                    "MOTODIR_IMPORT_API_KEY not set; bearer auth disabled in development environment"
                );
                Ok(Self {
                    api_key: None,
                    enabled: false,
                })
            }
            _ => anyhow::bail!(
                "MOTODIR_IMPORT_API_KEY is required outside development; set the import bearer secret"
            ),
        }
    }

    /// Auth state with an explicit secret, for tests.
    #[must_use]
    pub fn with_key(key: &str) -> Self {
        Self {
            api_key: Some(Arc::from(key)),
            enabled: true,
        }
    }

    /// Disabled auth, for tests.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            enabled: false,
        }
    }

    fn allows(&self, token: &str) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| bool::from(key.as_bytes().ct_eq(token.as_bytes())))
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing bearer token auth when enabled. The comparison is
/// constant-time so the secret cannot be probed byte-by-byte.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));

    match token {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "unauthorized",
                    message: "missing or invalid bearer token",
                },
            }),
        )
            .into_response(),
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
