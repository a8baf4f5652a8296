//! Fixed vocabularies backing brand matching and dealer classification.
//!
//! These are immutable lookup tables, not operator configuration: the
//! directory's filter UI and the import classifier both key off the same
//! list, so changing it is a code change.

/// Motorcycle brands recognized by the classifier, in match-priority order.
/// Substring matches against shop names follow this order, not the order of
/// appearance in the name.
pub const MOTORCYCLE_BRANDS: &[&str] = &[
    "BMW",
    "Ducati",
    "Harley-Davidson",
    "Honda",
    "Kawasaki",
    "KTM",
    "Suzuki",
    "Triumph",
    "Yamaha",
    "Aprilia",
    "MV Agusta",
    "Royal Enfield",
    "Husqvarna",
    "Benelli",
    "Moto Guzzi",
    "Indian",
    "Vespa",
    "Piaggio",
];

/// Name substrings that mark a shop as a brand-affiliated dealer.
/// Matched case-insensitively against the lowercased shop name.
pub const DEALER_NAME_MARKERS: &[&str] = &["dealer", "center", "centre", "official"];
