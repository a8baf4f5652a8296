//! Wire types for the Overpass JSON response.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level Overpass response envelope. Only the `elements` array is
/// consumed; a response without one yields an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

/// Centroid coordinates returned by `out center` for ways and relations.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One raw OSM entity: nodes carry `lat`/`lon` directly, ways and relations
/// carry a `center`. Tags are free-form key/value strings and may be absent
/// entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Coordinates>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl OsmElement {
    /// Point coordinates: the direct pair when present, else the centroid.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }

    /// Stable de-duplication key, `"<type>/<numeric id>"`. The same upstream
    /// entity always yields the same id across runs.
    #[must_use]
    pub fn osm_id(&self) -> String {
        format!("{}/{}", self.element_type, self.id)
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// A contact field: the direct tag when present, else the
    /// `contact:`-prefixed alternate used by many mappers.
    #[must_use]
    pub fn contact_tag(&self, key: &str) -> Option<&str> {
        self.tag(key)
            .or_else(|| self.tags.get(&format!("contact:{key}")).map(String::as_str))
    }
}
