//! Overpass QL query construction.

use motodir_core::Country;

/// Build the per-country Overpass query.
///
/// Selects, within the country's `admin_level=2` boundary: dedicated repair
/// shops (`shop=motorcycle_repair`, all element types), dealers that offer
/// servicing (`shop=motorcycle` + `service:vehicle:motorcycle=yes`), and
/// craft businesses (`craft=motorcycle_repair`). `out center tags` returns
/// centroid coordinates and the full tag set for each match.
#[must_use]
pub fn build_area_query(country: Country) -> String {
    format!(
        r#"[out:json][timeout:60];
area["ISO3166-1"="{code}"][admin_level=2];
(
  node["shop"="motorcycle_repair"](area);
  way["shop"="motorcycle_repair"](area);
  relation["shop"="motorcycle_repair"](area);
  node["shop"="motorcycle"]["service:vehicle:motorcycle"="yes"](area);
  way["shop"="motorcycle"]["service:vehicle:motorcycle"="yes"](area);
  node["craft"="motorcycle_repair"](area);
  way["craft"="motorcycle_repair"](area);
);
out center tags;
"#,
        code = country.code()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_scopes_to_the_country_boundary() {
        let query = build_area_query(Country::Germany);
        assert!(query.contains(r#"area["ISO3166-1"="DE"][admin_level=2];"#));
    }

    #[test]
    fn query_selects_all_shop_variants() {
        let query = build_area_query(Country::France);
        assert!(query.contains(r#"node["shop"="motorcycle_repair"](area);"#));
        assert!(query.contains(r#"relation["shop"="motorcycle_repair"](area);"#));
        assert!(query
            .contains(r#"way["shop"="motorcycle"]["service:vehicle:motorcycle"="yes"](area);"#));
        assert!(query.contains(r#"node["craft"="motorcycle_repair"](area);"#));
    }

    #[test]
    fn query_requests_centroids_and_tags() {
        let query = build_area_query(Country::Italy);
        assert!(query.starts_with("[out:json][timeout:60];"));
        assert!(query.trim_end().ends_with("out center tags;"));
    }
}
