//! Nominatim adapter (general-purpose forward and reverse geocoder).
//!
//! Nominatim's usage policy requires an identifying User-Agent and at most
//! one request per second; the per-request spacing is enforced by the cascade.

use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeError;
use crate::reverse::AddressComponents;
use crate::traits::{Place, PlaceGeocoder};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    /// `accept-language` for rendered names; reverse lookups rely on it for local script.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("fcl-access/", env!("CARGO_PKG_VERSION")).to_string(),
            language: "ja".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl PlaceGeocoder for NominatimClient {
    fn search(&self, query: &str, country: Option<&str>) -> Result<Option<Place>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", query),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
            ("limit", "1"),
            ("accept-language", self.config.language.as_str()),
        ];
        if let Some(country) = country {
            params.push(("countrycodes", country));
        }

        let places = self
            .client
            .get(url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())?;

        places.into_iter().next().map(NominatimPlace::into_place).transpose()
    }

    fn reverse(&self, location: (f64, f64)) -> Result<Option<Place>, GeocodeError> {
        let url = format!("{}/reverse", self.config.base_url);
        let lat = format!("{:.7}", location.0);
        let lon = format!("{:.7}", location.1);
        let params = [
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
            ("zoom", "18"),
            ("accept-language", self.config.language.as_str()),
        ];

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<ReverseResponse>())?;

        match response {
            ReverseResponse::Found(place) => place.into_place().map(Some),
            ReverseResponse::NotFound { error } => {
                debug!(%lat, %lon, %error, "nominatim reverse found nothing");
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
    address: Option<AddressComponents>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimPlace),
    NotFound { error: String },
}

impl NominatimPlace {
    fn into_place(self) -> Result<Place, GeocodeError> {
        let lat = parse_coordinate(&self.lat)?;
        let lng = parse_coordinate(&self.lon)?;
        Ok(Place {
            location: (lat, lng),
            components: self.address,
            display_name: self.display_name,
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeocodeError::Malformed(format!("bad coordinate {raw:?}")))
}
