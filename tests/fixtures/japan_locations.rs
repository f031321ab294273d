//! Real Japanese addresses for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Nominatim.

/// A named address with its known coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, address: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            address,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Port and industrial sites (container-friendly)
// ============================================================================

pub const PORTS: &[Location] = &[
    Location::new("Daikoku Pier", "神奈川県横浜市鶴見区大黒ふ頭22", 35.4617, 139.6850),
    Location::new("Honmoku Pier", "神奈川県横浜市中区本牧ふ頭1", 35.4396, 139.6745),
    Location::new("Nanko", "大阪府大阪市住之江区南港北1丁目", 34.6376, 135.4182),
    Location::new("Aomi Container Terminal", "東京都江東区青海2丁目", 35.6170, 139.7770),
];

// ============================================================================
// Dense urban addresses (building-qualified)
// ============================================================================

pub const URBAN: &[Location] = &[
    Location::new("Ginza 2-chome", "東京都中央区銀座2丁目15-2", 35.6717, 139.7671),
    Location::new("Roppongi Hills", "東京都港区六本木6丁目10-1", 35.6604, 139.7292),
    Location::new("Umeda 3-chome", "大阪府大阪市北区梅田3丁目1-3", 34.7025, 135.4959),
];

// ============================================================================
// Residential neighbourhoods
// ============================================================================

pub const RESIDENTIAL: &[Location] = &[
    Location::new("Setagaya Kitazawa", "東京都世田谷区北沢2丁目", 35.6614, 139.6680),
    Location::new("Suginami Asagaya", "東京都杉並区阿佐谷南1丁目", 35.7025, 139.6358),
];

pub fn all() -> impl Iterator<Item = &'static Location> {
    PORTS.iter().chain(URBAN).chain(RESIDENTIAL)
}
