use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use motodir_db::ShopFilter;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ShopsQuery {
    /// Country display name (e.g. "Germany").
    pub country: Option<String>,
    pub brand: Option<String>,
    pub dealers_only: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ShopItem {
    shop_id: Uuid,
    name: String,
    country: String,
    city: String,
    address: String,
    latitude: f64,
    longitude: f64,
    brands: Vec<String>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    is_dealer: bool,
}

/// The public directory listing, ordered by shop name.
pub(super) async fn list_shops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ShopsQuery>,
) -> Result<Json<ApiResponse<Vec<ShopItem>>>, ApiError> {
    let filter = ShopFilter {
        country: query.country,
        brand: query.brand,
        // dealers_only=false means "no dealer filter", matching the UI toggle.
        is_dealer: query.dealers_only.filter(|&only| only),
    };

    let rows = motodir_db::list_shops(&state.pool, &filter, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ShopItem {
            shop_id: row.public_id,
            name: row.name,
            country: row.country,
            city: row.city,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            brands: row.brands,
            phone: row.phone,
            email: row.email,
            website: row.website,
            is_dealer: row.is_dealer,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
