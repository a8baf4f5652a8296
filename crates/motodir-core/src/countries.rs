//! The fixed set of EU countries covered by the directory.
//!
//! Country codes arriving from callers (API body, CLI arguments) are parsed
//! into [`Country`] before any use; codes outside the set are silently
//! dropped by [`Country::parse_many`]. Downstream code therefore never sees
//! an unmapped code.

/// An EU member state, identified by its ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Austria,
    Belgium,
    Bulgaria,
    Croatia,
    Cyprus,
    CzechRepublic,
    Denmark,
    Estonia,
    Finland,
    France,
    Germany,
    Greece,
    Hungary,
    Ireland,
    Italy,
    Latvia,
    Lithuania,
    Luxembourg,
    Malta,
    Netherlands,
    Poland,
    Portugal,
    Romania,
    Slovakia,
    Slovenia,
    Spain,
    Sweden,
}

impl Country {
    /// Every covered country, in the order imports walk them.
    pub const ALL: [Country; 27] = [
        Country::Austria,
        Country::Belgium,
        Country::Bulgaria,
        Country::Croatia,
        Country::Cyprus,
        Country::CzechRepublic,
        Country::Denmark,
        Country::Estonia,
        Country::Finland,
        Country::France,
        Country::Germany,
        Country::Greece,
        Country::Hungary,
        Country::Ireland,
        Country::Italy,
        Country::Latvia,
        Country::Lithuania,
        Country::Luxembourg,
        Country::Malta,
        Country::Netherlands,
        Country::Poland,
        Country::Portugal,
        Country::Romania,
        Country::Slovakia,
        Country::Slovenia,
        Country::Spain,
        Country::Sweden,
    ];

    /// ISO 3166-1 alpha-2 code, as used in Overpass area filters.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Country::Austria => "AT",
            Country::Belgium => "BE",
            Country::Bulgaria => "BG",
            Country::Croatia => "HR",
            Country::Cyprus => "CY",
            Country::CzechRepublic => "CZ",
            Country::Denmark => "DK",
            Country::Estonia => "EE",
            Country::Finland => "FI",
            Country::France => "FR",
            Country::Germany => "DE",
            Country::Greece => "GR",
            Country::Hungary => "HU",
            Country::Ireland => "IE",
            Country::Italy => "IT",
            Country::Latvia => "LV",
            Country::Lithuania => "LT",
            Country::Luxembourg => "LU",
            Country::Malta => "MT",
            Country::Netherlands => "NL",
            Country::Poland => "PL",
            Country::Portugal => "PT",
            Country::Romania => "RO",
            Country::Slovakia => "SK",
            Country::Slovenia => "SI",
            Country::Spain => "ES",
            Country::Sweden => "SE",
        }
    }

    /// Display name stored on shop records and shown in the directory UI.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Country::Austria => "Austria",
            Country::Belgium => "Belgium",
            Country::Bulgaria => "Bulgaria",
            Country::Croatia => "Croatia",
            Country::Cyprus => "Cyprus",
            Country::CzechRepublic => "Czech Republic",
            Country::Denmark => "Denmark",
            Country::Estonia => "Estonia",
            Country::Finland => "Finland",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Greece => "Greece",
            Country::Hungary => "Hungary",
            Country::Ireland => "Ireland",
            Country::Italy => "Italy",
            Country::Latvia => "Latvia",
            Country::Lithuania => "Lithuania",
            Country::Luxembourg => "Luxembourg",
            Country::Malta => "Malta",
            Country::Netherlands => "Netherlands",
            Country::Poland => "Poland",
            Country::Portugal => "Portugal",
            Country::Romania => "Romania",
            Country::Slovakia => "Slovakia",
            Country::Slovenia => "Slovenia",
            Country::Spain => "Spain",
            Country::Sweden => "Sweden",
        }
    }

    /// Parse an alpha-2 code, case-insensitively. `None` for anything
    /// outside the covered set.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Country> {
        let code = code.trim();
        Country::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Parse a caller-supplied code list, silently dropping unrecognized
    /// entries. Order is preserved.
    #[must_use]
    pub fn parse_many<S: AsRef<str>>(codes: &[S]) -> Vec<Country> {
        codes
            .iter()
            .filter_map(|c| Country::from_code(c.as_ref()))
            .collect()
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
