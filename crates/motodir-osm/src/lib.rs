//! OpenStreetMap extraction pipeline for the repair shop directory.
//!
//! One Overpass query per country pulls every entity tagged as a motorcycle
//! repair business; elements are normalized into [`motodir_core::RepairShop`]
//! records, classified for brands and dealer status, and inserted with
//! `osm_id` de-duplication. Processing is strictly sequential with a pause
//! between countries.

pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use error::OsmError;
pub use extract::{run_extraction, ExtractError, ExtractionSummary};
pub use normalize::normalize_element;
pub use query::build_area_query;
pub use types::{OsmElement, OverpassResponse};
