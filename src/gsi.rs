//! GSI address-search adapter (cadastral geocoder).

use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeError;
use crate::traits::CadastralGeocoder;

#[derive(Debug, Clone)]
pub struct GsiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GsiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://msearch.gsi.go.jp".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GsiClient {
    config: GsiConfig,
    client: reqwest::blocking::Client,
}

impl GsiClient {
    pub fn new(config: GsiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl CadastralGeocoder for GsiClient {
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!("{}/address-search/AddressSearch", self.config.base_url);

        let features = self
            .client
            .get(url)
            .query(&[("q", query)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<GsiFeature>>())?;

        let Some(feature) = features.into_iter().next() else {
            return Ok(None);
        };
        debug!(query, title = ?feature.properties.title, "gsi match");

        match feature.geometry.coordinates.as_slice() {
            [lng, lat] => Ok(Some((*lat, *lng))),
            other => Err(GeocodeError::Malformed(format!(
                "expected [lng, lat], got {} values",
                other.len()
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GsiFeature {
    geometry: GsiGeometry,
    #[serde(default)]
    properties: GsiProperties,
}

#[derive(Debug, Deserialize)]
struct GsiGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct GsiProperties {
    title: Option<String>,
}
