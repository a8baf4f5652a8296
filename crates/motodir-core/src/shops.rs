use serde::{Deserialize, Serialize};

/// A normalized repair shop, ready for insertion into the directory.
///
/// Produced by the OSM normalizer; a value of this type always carries a
/// name and coordinates (elements missing either are rejected before
/// construction). `osm_id` is the `"<type>/<numeric id>"` de-duplication
/// key and is unique across the persisted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairShop {
    pub name: String,
    /// Country display name (e.g. "Germany"), not the ISO code.
    pub country: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Recognized brands, in vocabulary order, without duplicates.
    pub brands: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_dealer: bool,
    pub osm_id: String,
    pub osm_type: String,
}
