//! Coarse administrative-unit parser for Japanese addresses.
//!
//! Splits an address into prefecture, city/ward, town and the remaining
//! block/lot part. Nothing finer than that is attempted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::prefecture;
use crate::script::Script;

/// Designated city followed by its ward (`横浜市鶴見区`).
static CITY_WARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.{1,6}?市.{1,5}?区)").expect("valid city-ward regex"));

/// County followed by its town or village (`西多摩郡瑞穂町`).
static COUNTY_TOWN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.{1,6}?郡.{1,6}?[町村])").expect("valid county regex"));

static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?[市区町村])").expect("valid city regex"));

/// Town name runs up to the first block number or kanji chōme.
static TOWN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)(?:[0-9]|[一二三四五六七八九十]+丁目)").expect("valid town regex")
});

/// Parsed address fields. Missing fields are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub prefecture: String,
    pub city: String,
    pub town: String,
    pub rest: String,
}

impl ParsedAddress {
    /// City, town and rest joined, the text keyword rules look at.
    pub fn joined(&self) -> String {
        format!("{}{}{}", self.city, self.town, self.rest)
    }

    /// True when at least one administrative unit below the prefecture was found.
    pub fn has_locality(&self) -> bool {
        !self.city.is_empty() || !self.town.is_empty()
    }
}

/// Parse an address. Latin-script input carries no Japanese units and ends up entirely in `rest`.
pub fn parse(address: &str) -> ParsedAddress {
    let addr = address.trim();
    if Script::of(addr) == Script::Latin {
        return ParsedAddress {
            rest: addr.to_string(),
            ..ParsedAddress::default()
        };
    }

    let mut parsed = ParsedAddress::default();
    let mut remaining = addr;

    if let Some(pref) = prefecture::leading(remaining) {
        parsed.prefecture = pref.name.to_string();
        remaining = &remaining[pref.name.len()..];
    }

    let city = [&*CITY_WARD_RE, &*COUNTY_TOWN_RE, &*CITY_RE]
        .iter()
        .find_map(|re| re.captures(remaining))
        .and_then(|caps| caps.get(1));
    if let Some(city) = city {
        parsed.city = city.as_str().to_string();
        remaining = &remaining[city.end()..];
    }

    match TOWN_RE.captures(remaining).and_then(|caps| caps.get(1)) {
        Some(town) => {
            parsed.town = town.as_str().to_string();
            parsed.rest = remaining[town.end()..].to_string();
        }
        None => parsed.town = remaining.to_string(),
    }

    parsed
}
