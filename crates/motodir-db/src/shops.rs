//! Queries for the `repair_shops` table.

use chrono::{DateTime, Utc};
use motodir_core::RepairShop;
use sqlx::PgPool;
use uuid::Uuid;

/// A row from the `repair_shops` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RepairShopRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub brands: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_dealer: bool,
    pub osm_id: String,
    pub osm_type: String,
    pub created_at: DateTime<Utc>,
}

/// Optional filters for the directory listing. `None` fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct ShopFilter {
    /// Country display name (e.g. "Germany").
    pub country: Option<String>,
    /// Exact brand name from the fixed vocabulary.
    pub brand: Option<String>,
    /// `Some(true)` restricts to dealers, `Some(false)` to independents.
    pub is_dealer: Option<bool>,
}

/// Insert a shop unless its `osm_id` is already present.
///
/// The unique constraint on `osm_id` is the de-duplication signal:
/// `ON CONFLICT DO NOTHING` makes a repeated import a skip, not an error,
/// and stays correct even if two imports ever race. Returns whether a row
/// was actually inserted.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn insert_shop_if_new(pool: &PgPool, shop: &RepairShop) -> Result<bool, sqlx::Error> {
    let rows_affected = sqlx::query(
        "INSERT INTO repair_shops \
             (name, country, city, address, latitude, longitude, brands, \
              phone, email, website, is_dealer, osm_id, osm_type) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         ON CONFLICT (osm_id) DO NOTHING",
    )
    .bind(&shop.name)
    .bind(&shop.country)
    .bind(&shop.city)
    .bind(&shop.address)
    .bind(shop.latitude)
    .bind(shop.longitude)
    .bind(&shop.brands)
    .bind(&shop.phone)
    .bind(&shop.email)
    .bind(&shop.website)
    .bind(shop.is_dealer)
    .bind(&shop.osm_id)
    .bind(&shop.osm_type)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(rows_affected > 0)
}

/// List shops ordered by name, applying any filters set on `filter`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_shops(
    pool: &PgPool,
    filter: &ShopFilter,
    limit: i64,
) -> Result<Vec<RepairShopRow>, sqlx::Error> {
    sqlx::query_as::<_, RepairShopRow>(
        "SELECT id, public_id, name, country, city, address, latitude, longitude, \
                brands, phone, email, website, is_dealer, osm_id, osm_type, created_at \
         FROM repair_shops \
         WHERE ($1::text IS NULL OR country = $1) \
           AND ($2::text IS NULL OR $2 = ANY(brands)) \
           AND ($3::boolean IS NULL OR is_dealer = $3) \
         ORDER BY name \
         LIMIT $4",
    )
    .bind(&filter.country)
    .bind(&filter.brand)
    .bind(filter.is_dealer)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Total number of persisted shops.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_shops(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM repair_shops")
        .fetch_one(pool)
        .await
}
