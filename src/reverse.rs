//! Reverse-lookup address assembly.
//!
//! Builds a local-script address string out of the structured components a
//! general-purpose geocoder returns, so romanized input can be classified
//! with the same keyword rules as Japanese input.

use serde::{Deserialize, Serialize};

use crate::prefecture;
use crate::script::Script;
use crate::traits::Place;

/// Fewer assembled parts than this and the provider's display string is used instead.
pub const MIN_COMPONENTS: usize = 3;

/// Structured address components (Nominatim `address` object).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponents {
    #[serde(rename = "ISO3166-2-lvl4")]
    pub region_code: Option<String>,
    pub province: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub city_district: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub quarter: Option<String>,
    pub road: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
}

impl AddressComponents {
    /// Region name in local script.
    ///
    /// Named regions are tried first; codes and romanized names go through the
    /// prefecture table. Untranslatable Latin names are dropped.
    pub fn local_region(&self) -> Option<String> {
        [&self.province, &self.state, &self.region_code]
            .into_iter()
            .flatten()
            .find_map(|region| match prefecture::local_name(region) {
                Some(name) => Some(name.to_string()),
                None if Script::of(region) == Script::Japanese => Some(region.trim().to_string()),
                None => None,
            })
    }

    /// Components in assembly order, empty ones skipped.
    pub fn ordered_parts(&self) -> Vec<String> {
        let locality = first_present(&[&self.city, &self.town, &self.village]);
        let district = first_present(&[&self.city_district, &self.suburb]);
        let neighbourhood = first_present(&[&self.neighbourhood, &self.quarter]);
        let road = present(&self.road).filter(|road| !is_numeric(road));
        let house_number = present(&self.house_number);

        let mut parts: Vec<String> = Vec::new();
        let candidates = [
            self.local_region(),
            locality,
            district,
            neighbourhood,
            road,
            house_number,
        ];
        for part in candidates.into_iter().flatten() {
            if parts.last() != Some(&part) {
                parts.push(part);
            }
        }
        parts
    }
}

/// Assemble a local-script address for a reverse-lookup result.
///
/// Falls back to the provider's display string when too few components are known.
pub fn assemble_address(place: &Place) -> Option<String> {
    let parts = place
        .components
        .as_ref()
        .map(AddressComponents::ordered_parts)
        .unwrap_or_default();

    if parts.len() >= MIN_COMPONENTS {
        return Some(parts.concat());
    }

    place
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| (!parts.is_empty()).then(|| parts.concat()))
}

/// Append `house_number` unless the address already contains it.
pub fn with_house_number(address: &str, house_number: &str) -> String {
    if house_number.is_empty() || address.contains(house_number) {
        address.to_string()
    } else {
        format!("{address}{house_number}")
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn first_present(values: &[&Option<String>]) -> Option<String> {
    values.iter().find_map(|value| present(value))
}

fn is_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ginza_components() -> AddressComponents {
        AddressComponents {
            region_code: Some("JP-13".to_string()),
            city: Some("中央区".to_string()),
            suburb: Some("銀座".to_string()),
            neighbourhood: Some("二丁目".to_string()),
            road: Some("中央通り".to_string()),
            ..AddressComponents::default()
        }
    }

    #[test]
    fn test_assembles_in_fixed_order() {
        let place = Place {
            components: Some(ginza_components()),
            ..Place::default()
        };
        assert_eq!(assemble_address(&place).as_deref(), Some("東京都中央区銀座二丁目中央通り"));
    }

    #[test]
    fn test_translates_romanized_region() {
        let components = AddressComponents {
            state: Some("Kanagawa Prefecture".to_string()),
            city: Some("横浜市".to_string()),
            city_district: Some("鶴見区".to_string()),
            ..AddressComponents::default()
        };
        assert_eq!(components.ordered_parts(), vec!["神奈川県", "横浜市", "鶴見区"]);
    }

    #[test]
    fn test_numeric_road_is_suppressed() {
        let components = AddressComponents {
            road: Some("15".to_string()),
            house_number: Some("2".to_string()),
            ..ginza_components()
        };
        assert_eq!(components.ordered_parts(), vec!["東京都", "中央区", "銀座", "二丁目", "2"]);
    }

    #[test]
    fn test_falls_back_to_display_name() {
        let place = Place {
            components: Some(AddressComponents {
                state: Some("東京都".to_string()),
                ..AddressComponents::default()
            }),
            display_name: Some("銀座, 中央区, 東京都, 104-0061, 日本".to_string()),
            ..Place::default()
        };
        assert_eq!(
            assemble_address(&place).as_deref(),
            Some("銀座, 中央区, 東京都, 104-0061, 日本")
        );
    }

    #[test]
    fn test_nothing_known() {
        assert_eq!(assemble_address(&Place::default()), None);
    }

    #[test]
    fn test_house_number_appended_once() {
        assert_eq!(with_house_number("東京都中央区銀座二丁目", "2-15-2"), "東京都中央区銀座二丁目2-15-2");
        assert_eq!(with_house_number("東京都中央区銀座2-15-2", "2-15-2"), "東京都中央区銀座2-15-2");
    }
}
