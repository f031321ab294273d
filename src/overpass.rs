//! Overpass HTTP adapter for nearby roads.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::polyline::Polyline;
use crate::road::{RoadSegment, RoadType, parse_width};
use crate::traits::RoadNetwork;

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub base_url: String,
    /// Server-side query budget, sent inside the query.
    pub query_timeout_secs: u64,
    /// Client-side HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".to_string(),
            query_timeout_secs: 15,
            timeout_secs: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn query(&self, (lat, lng): (f64, f64), radius_m: f64) -> String {
        format!(
            "[out:json][timeout:{}];way(around:{:.0},{:.7},{:.7})[\"highway\"];out geom;",
            self.config.query_timeout_secs, radius_m, lat, lng
        )
    }
}

impl RoadNetwork for OverpassClient {
    fn roads_near(&self, location: (f64, f64), radius_m: f64) -> Vec<RoadSegment> {
        let query = self.query(location, radius_m);

        let response = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OverpassResponse>());

        match response {
            Ok(body) => {
                let segments: Vec<RoadSegment> = body
                    .elements
                    .into_iter()
                    .filter_map(|element| element.into_segment(location))
                    .collect();
                debug!(?location, radius_m, count = segments.len(), "overpass roads");
                segments
            }
            Err(err) => {
                warn!(?location, error = %err, "overpass query failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<OverpassNode>,
}

#[derive(Debug, Deserialize)]
struct OverpassNode {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl OverpassElement {
    /// `None` for elements that are not roads at all.
    fn into_segment(self, target: (f64, f64)) -> Option<RoadSegment> {
        let highway = self.tags.get("highway")?;
        let points = self
            .geometry
            .iter()
            .filter_map(|node| Some((node.lat?, node.lon?)))
            .collect();

        Some(RoadSegment {
            road_type: RoadType::from_tag(highway),
            name: self
                .tags
                .get("name")
                .or_else(|| self.tags.get("name:ja"))
                .cloned(),
            declared_width_m: self.tags.get("width").and_then(|raw| parse_width(raw)),
            lanes: self.tags.get("lanes").cloned(),
            distance_m: Polyline::new(points).distance_to(target),
        })
    }
}
