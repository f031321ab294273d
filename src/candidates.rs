//! Geocoding candidate generation.
//!
//! Produces the ordered list of query strings the cascade walks through,
//! most specific first. Position in the list is the specificity rank.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize;
use crate::parser;
use crate::prefecture;
use crate::script::Script;

static BUILDING_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9])(?: .*|[^0-9 ]*(?:ビル|タワー|マンション|ハイツ|コーポ|レジデンス|アパート)[^0-9]*)$")
        .expect("valid building suffix regex")
});

static LOT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:-[0-9]+|[0-9]+号)$").expect("valid lot regex"));

static HOUSE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:番地|番)?$").expect("valid house number regex"));

static THROUGH_CHOME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?丁目)").expect("valid chome regex"));

static BEFORE_CHOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)(?:[0-9]+|[一二三四五六七八九十]+)丁目").expect("valid chome unit regex")
});

static BEFORE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^0-9]+)[0-9]").expect("valid number regex"));

static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^〒?([0-9]{3})-?([0-9]{4})$").expect("valid postal regex"));

/// House numbers: `2-15-2`, `15-2`. Four digits after the hyphen is a postal code, not a lot.
static LATIN_HOUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,4}(?:-[0-9]{1,3})+$").expect("valid latin house regex"));

const ADMIN_SUFFIXES: &[&str] = &[
    "-ku", " ku", "-shi", " shi", " city", "-ken", " prefecture", "-gun", " gun", " county",
    "-cho", "-machi", "-mura", " ward", " district", "-to", "-fu",
];

const MAJOR_CITIES: &[&str] = &[
    "tokyo", "osaka", "yokohama", "nagoya", "sapporo", "kobe", "kyoto", "fukuoka", "kawasaki",
    "saitama", "hiroshima", "sendai", "chiba", "kitakyushu", "sakai", "niigata", "hamamatsu",
    "kumamoto", "sagamihara", "okayama", "shizuoka",
];

const COUNTRY_TOKENS: &[&str] = &["japan", "nippon", "nihon"];

/// Pieces pulled out of a romanized address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatinAddress {
    /// Place names in input order (`Ginza`, `Chuo-Ku`, `Tokyo`).
    pub places: Vec<String>,
    /// Block/lot number such as `2-15-2`.
    pub house_number: Option<String>,
    /// Postal code normalized to `NNN-NNNN`.
    pub postal_code: Option<String>,
}

impl LatinAddress {
    pub fn parse(text: &str) -> Self {
        let parts: Vec<&str> = if text.contains(',') {
            text.split(',').collect()
        } else {
            text.split_whitespace().collect()
        };

        let mut parsed = LatinAddress::default();
        for part in parts {
            let mut words = Vec::new();
            for token in part.split_whitespace() {
                if let Some(caps) = POSTAL_RE.captures(token) {
                    if parsed.postal_code.is_none() {
                        parsed.postal_code = Some(format!("{}-{}", &caps[1], &caps[2]));
                    }
                } else if LATIN_HOUSE_RE.is_match(token) {
                    if parsed.house_number.is_none() {
                        parsed.house_number = Some(token.to_string());
                    }
                } else {
                    words.push(token);
                }
            }

            let place = words.join(" ");
            if !place.is_empty() && !COUNTRY_TOKENS.contains(&place.to_ascii_lowercase().as_str()) {
                parsed.places.push(place);
            }
        }
        parsed
    }

    /// True if any place token looks like an administrative unit or a known city.
    pub fn has_admin_unit(&self) -> bool {
        self.places.iter().any(|place| is_admin_place(place))
    }
}

fn is_admin_place(place: &str) -> bool {
    let lower = place.to_ascii_lowercase();
    ADMIN_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        || MAJOR_CITIES.contains(&lower.as_str())
        || prefecture::by_romaji(&lower).is_some()
}

/// Builds candidate sequences for the geocoding cascade.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    /// Appended to every simplified romanized candidate.
    pub country_name: String,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self {
            country_name: "Japan".to_string(),
        }
    }
}

impl CandidateGenerator {
    pub fn new(country_name: impl Into<String>) -> Self {
        Self {
            country_name: country_name.into(),
        }
    }

    /// Candidates for `address`, most specific first.
    ///
    /// Never empty; the first element is always the normalized address and
    /// all elements are distinct.
    pub fn generate(&self, address: &str) -> Vec<String> {
        let first = normalize(address);
        match Script::of(&first) {
            Script::Japanese => japanese_candidates(first),
            Script::Latin => self.latin_candidates(first),
        }
    }

    fn latin_candidates(&self, first: String) -> Vec<String> {
        let parsed = LatinAddress::parse(&first);
        if !parsed.has_admin_unit() && parsed.house_number.is_none() && parsed.postal_code.is_none() {
            return vec![first];
        }

        let country = self.country_name.as_str();
        let places: Vec<&str> = parsed.places.iter().map(String::as_str).collect();
        let last_two = &places[places.len().saturating_sub(2)..];
        let last_one = &places[places.len().saturating_sub(1)..];

        let mut shapes: Vec<Vec<&str>> = Vec::new();
        if let Some(house) = parsed.house_number.as_deref() {
            if !places.is_empty() {
                shapes.push([&[house][..], &places[..]].concat());
                shapes.push([&[house][..], last_two].concat());
            }
        }
        if !places.is_empty() {
            shapes.push(places.clone());
            shapes.push(last_two.to_vec());
        }
        // Postal lookups are the least reliable signal, so they go last.
        if let Some(postal) = parsed.postal_code.as_deref() {
            if !places.is_empty() {
                shapes.push([&[postal][..], last_one].concat());
            }
            shapes.push(vec![postal]);
        }

        let mut candidates = vec![first];
        let mut seen: HashSet<String> = candidates.iter().cloned().collect();
        for mut shape in shapes {
            shape.push(country);
            let text = shape.join(", ");
            if seen.insert(text.clone()) {
                candidates.push(text);
            }
        }
        candidates
    }
}

type Step = fn(&str) -> String;

/// Simplification steps, applied in order to the most recent accepted candidate.
const JAPANESE_STEPS: &[Step] = &[
    strip_building_suffix,
    strip_lot_suffix,
    strip_house_number,
    cut_after_chome,
    cut_chome_unit,
    prefecture_and_city,
];

fn japanese_candidates(first: String) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(first.clone());
    let mut candidates = vec![first];

    for step in JAPANESE_STEPS {
        let current = candidates.last().map(String::as_str).unwrap_or_default();
        let next = step(current).trim_end_matches([' ', '-']).to_string();
        let shorter = next.chars().count() < current.chars().count();
        if !next.is_empty() && shorter && !seen.contains(&next) {
            seen.insert(next.clone());
            candidates.push(next);
        }
    }
    candidates
}

fn strip_building_suffix(text: &str) -> String {
    BUILDING_SUFFIX_RE.replace(text, "$1").into_owned()
}

fn strip_lot_suffix(text: &str) -> String {
    LOT_SUFFIX_RE.replace(text, "").into_owned()
}

fn strip_house_number(text: &str) -> String {
    HOUSE_NUMBER_RE.replace(text, "").into_owned()
}

fn cut_after_chome(text: &str) -> String {
    THROUGH_CHOME_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| text.to_string())
}

fn cut_chome_unit(text: &str) -> String {
    BEFORE_CHOME_RE
        .captures(text)
        .or_else(|| BEFORE_NUMBER_RE.captures(text))
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| text.to_string())
}

fn prefecture_and_city(text: &str) -> String {
    let parsed = parser::parse(text);
    if parsed.city.is_empty() {
        return text.to_string();
    }
    format!("{}{}", parsed.prefecture, parsed.city)
}
