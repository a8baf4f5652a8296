//! Brand matching and dealer classification from OSM tags.

use motodir_core::{DEALER_NAME_MARKERS, MOTORCYCLE_BRANDS};

use crate::types::OsmElement;

/// Recognized brands for an element, in vocabulary order, without duplicates.
///
/// An explicit `brand` tag is matched exactly (case-insensitive) against the
/// vocabulary first; the shop name is then scanned for each vocabulary entry
/// as a case-insensitive substring, appending entries not already matched.
/// Running this twice on the same tags yields an identical list.
#[must_use]
pub fn extract_brands(element: &OsmElement) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();

    if let Some(tag) = element.tag("brand") {
        let tag = tag.trim();
        if let Some(known) = MOTORCYCLE_BRANDS
            .iter()
            .find(|b| b.eq_ignore_ascii_case(tag))
        {
            brands.push((*known).to_string());
        }
    }

    if let Some(name) = element.tag("name") {
        let name_lower = name.to_lowercase();
        for brand in MOTORCYCLE_BRANDS {
            if name_lower.contains(&brand.to_lowercase()) && !brands.iter().any(|b| b == brand) {
                brands.push((*brand).to_string());
            }
        }
    }

    brands
}

/// Whether the element is a brand-affiliated dealer rather than an
/// independent workshop. Fixed policy:
/// - a motorcycle shop that offers motorcycle servicing,
/// - or an explicit `brand` / `brand:wikidata` tag,
/// - or a name containing a dealer marker (`dealer`, `center`, `centre`,
///   `official`), case-insensitively.
#[must_use]
pub fn is_dealer(element: &OsmElement) -> bool {
    if element.tag("shop") == Some("motorcycle")
        && element.tag("service:vehicle:motorcycle") == Some("yes")
    {
        return true;
    }

    let has_tag = |key: &str| element.tag(key).is_some_and(|v| !v.is_empty());
    if has_tag("brand") || has_tag("brand:wikidata") {
        return true;
    }

    if let Some(name) = element.tag("name") {
        let name_lower = name.to_lowercase();
        return DEALER_NAME_MARKERS
            .iter()
            .any(|marker| name_lower.contains(marker));
    }

    false
}
