//! Normalization from raw OSM elements to [`motodir_core::RepairShop`].
//!
//! Brand and dealer classification is delegated to [`crate::classify`]; this
//! module focuses on structural conversion and the presence checks that gate
//! whether an element becomes a directory entry at all.

use motodir_core::{Country, RepairShop};

use crate::classify::{extract_brands, is_dealer};
use crate::types::OsmElement;

const ADDRESS_PLACEHOLDER: &str = "Address not available";
const CITY_PLACEHOLDER: &str = "Unknown";

/// Converts one raw element into a shop record, or `None` when the element
/// is unusable: no `name` tag, or no coordinates in either form.
#[must_use]
pub fn normalize_element(element: &OsmElement, country: Country) -> Option<RepairShop> {
    let name = element.tag("name")?.to_string();
    let (latitude, longitude) = element.coordinates()?;

    // "<housenumber> <street>", dropping whichever is absent.
    let address_parts: Vec<&str> = [element.tag("addr:housenumber"), element.tag("addr:street")]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    let address = if address_parts.is_empty() {
        ADDRESS_PLACEHOLDER.to_string()
    } else {
        address_parts.join(" ")
    };

    let city = element
        .tag("addr:city")
        .or_else(|| element.tag("addr:town"))
        .or_else(|| element.tag("addr:village"))
        .unwrap_or(CITY_PLACEHOLDER)
        .to_string();

    let phone = element.contact_tag("phone").map(str::to_string);
    let email = element.contact_tag("email").map(str::to_string);
    let website = element.contact_tag("website").map(str::to_string);

    Some(RepairShop {
        brands: extract_brands(element),
        is_dealer: is_dealer(element),
        osm_id: element.osm_id(),
        osm_type: element.element_type.clone(),
        name,
        country: country.name().to_string(),
        city,
        address,
        latitude,
        longitude,
        phone,
        email,
        website,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::Coordinates;

    fn node(id: i64, tags: &[(&str, &str)]) -> OsmElement {
        OsmElement {
            element_type: "node".to_string(),
            id,
            lat: Some(48.1),
            lon: Some(11.5),
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn element_without_name_is_rejected() {
        let el = node(1, &[("shop", "motorcycle_repair")]);
        assert!(normalize_element(&el, Country::Germany).is_none());
    }

    #[test]
    fn element_without_any_coordinates_is_rejected() {
        let mut el = node(1, &[("name", "Moto Werkstatt")]);
        el.lat = None;
        el.lon = None;
        assert!(normalize_element(&el, Country::Germany).is_none());
    }

    #[test]
    fn centroid_coordinates_are_accepted() {
        let mut el = node(1, &[("name", "Moto Werkstatt")]);
        el.element_type = "way".to_string();
        el.lat = None;
        el.lon = None;
        el.center = Some(Coordinates {
            lat: 52.5,
            lon: 13.4,
        });

        let shop = normalize_element(&el, Country::Germany).expect("normalize");
        assert!((shop.latitude - 52.5).abs() < f64::EPSILON);
        assert!((shop.longitude - 13.4).abs() < f64::EPSILON);
        assert_eq!(shop.osm_id, "way/1");
        assert_eq!(shop.osm_type, "way");
    }

    #[test]
    fn munich_honda_node_normalizes_end_to_end() {
        let el = node(
            42,
            &[
                ("name", "Honda Service Munich"),
                ("shop", "motorcycle"),
                ("service:vehicle:motorcycle", "yes"),
                ("addr:street", "Hauptstr"),
                ("addr:housenumber", "5"),
                ("addr:city", "Munich"),
            ],
        );

        let shop = normalize_element(&el, Country::Germany).expect("normalize");
        assert_eq!(shop.name, "Honda Service Munich");
        assert_eq!(shop.country, "Germany");
        assert_eq!(shop.city, "Munich");
        assert_eq!(shop.address, "5 Hauptstr");
        assert_eq!(shop.brands, vec!["Honda".to_string()]);
        assert!(shop.is_dealer);
        assert_eq!(shop.osm_id, "node/42");
    }

    #[test]
    fn address_falls_back_to_placeholder() {
        let el = node(1, &[("name", "Moto Werkstatt")]);
        let shop = normalize_element(&el, Country::Germany).expect("normalize");
        assert_eq!(shop.address, "Address not available");
    }

    #[test]
    fn street_without_housenumber_stands_alone() {
        let el = node(1, &[("name", "Moto Werkstatt"), ("addr:street", "Ringweg")]);
        let shop = normalize_element(&el, Country::Germany).expect("normalize");
        assert_eq!(shop.address, "Ringweg");
    }

    #[test]
    fn city_prefers_city_then_town_then_village() {
        let el = node(
            1,
            &[("name", "Moto"), ("addr:town", "Kleinstadt"), ("addr:village", "Dorf")],
        );
        let shop = normalize_element(&el, Country::Austria).expect("normalize");
        assert_eq!(shop.city, "Kleinstadt");

        let el = node(2, &[("name", "Moto"), ("addr:village", "Dorf")]);
        let shop = normalize_element(&el, Country::Austria).expect("normalize");
        assert_eq!(shop.city, "Dorf");

        let el = node(3, &[("name", "Moto")]);
        let shop = normalize_element(&el, Country::Austria).expect("normalize");
        assert_eq!(shop.city, "Unknown");
    }

    #[test]
    fn contact_fields_use_prefixed_fallback() {
        let el = node(
            1,
            &[
                ("name", "Moto"),
                ("contact:phone", "+43 1 234"),
                ("email", "shop@example.at"),
            ],
        );
        let shop = normalize_element(&el, Country::Austria).expect("normalize");
        assert_eq!(shop.phone.as_deref(), Some("+43 1 234"));
        assert_eq!(shop.email.as_deref(), Some("shop@example.at"));
        assert!(shop.website.is_none());
    }

    #[test]
    fn country_display_name_comes_from_the_code() {
        let el = node(1, &[("name", "Moto")]);
        let shop = normalize_element(&el, Country::CzechRepublic).expect("normalize");
        assert_eq!(shop.country, "Czech Republic");
    }
}
