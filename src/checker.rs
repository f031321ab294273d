//! Per-address accessibility check.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::cascade::{GeocodingCascade, Resolution, Strategy};
use crate::classify::classify;
use crate::normalize::extract_address;
use crate::parser::{self, ParsedAddress};
use crate::traits::{CadastralGeocoder, PlaceGeocoder, RoadNetwork};
use crate::vehicle::VehicleProfile;

/// Message returned for addresses no provider could place.
pub const UNRESOLVED_MESSAGE: &str = "座標が取得できませんでした";

#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Radius of the road query around the resolved coordinate.
    pub road_radius_m: f64,
    /// Addresses evaluated at once by [`AccessChecker::check_batch`]. 1 is strictly sequential.
    pub max_parallel: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            road_radius_m: 100.0,
            max_parallel: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub address: String,
    #[serde(flatten)]
    pub result: CheckResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    Checked {
        latitude: f64,
        longitude: f64,
        resolved_address: String,
        /// Query text that produced the coordinates, when it differs from the input.
        #[serde(skip_serializing_if = "Option::is_none")]
        used_candidate: Option<String>,
        strategy: Strategy,
        can_access: bool,
        reason: String,
        road_count: usize,
    },
    Unresolved {
        error: String,
    },
}

impl CheckOutcome {
    pub fn can_access(&self) -> Option<bool> {
        match &self.result {
            CheckResult::Checked { can_access, .. } => Some(*can_access),
            CheckResult::Unresolved { .. } => None,
        }
    }
}

pub struct AccessChecker<C, G, N> {
    cascade: GeocodingCascade<C, G>,
    roads: N,
    options: CheckOptions,
}

impl<C, G, N> AccessChecker<C, G, N>
where
    C: CadastralGeocoder,
    G: PlaceGeocoder,
    N: RoadNetwork,
{
    pub fn new(cascade: GeocodingCascade<C, G>, roads: N, options: CheckOptions) -> Self {
        Self {
            cascade,
            roads,
            options,
        }
    }

    pub fn cascade(&self) -> &GeocodingCascade<C, G> {
        &self.cascade
    }

    /// Resolve, fetch roads and classify one address.
    pub fn check(&self, address: &str, vehicle: &VehicleProfile) -> CheckOutcome {
        let raw = address.trim();

        let resolved = match self.cascade.resolve(raw) {
            Resolution::Resolved(result) => result,
            Resolution::Unresolved => {
                return CheckOutcome {
                    address: raw.to_string(),
                    result: CheckResult::Unresolved {
                        error: UNRESOLVED_MESSAGE.to_string(),
                    },
                };
            }
        };

        let location = (resolved.latitude, resolved.longitude);
        let segments = self.roads.roads_near(location, self.options.road_radius_m);
        let parsed = parse_resolved(&resolved.resolved_address);
        let verdict = classify(&segments, &parsed, raw, vehicle);

        info!(
            address = raw,
            vehicle = %vehicle.class,
            roads = segments.len(),
            accessible = verdict.accessible,
            reason = verdict.reason.as_str(),
            "access checked"
        );

        let used_candidate = (resolved.used_candidate != raw).then_some(resolved.used_candidate);
        CheckOutcome {
            address: raw.to_string(),
            result: CheckResult::Checked {
                latitude: resolved.latitude,
                longitude: resolved.longitude,
                resolved_address: resolved.resolved_address,
                used_candidate,
                strategy: resolved.strategy,
                can_access: verdict.accessible,
                reason: verdict.reason,
                road_count: segments.len(),
            },
        }
    }
}

impl<C, G, N> AccessChecker<C, G, N>
where
    C: CadastralGeocoder + Sync,
    G: PlaceGeocoder + Sync,
    N: RoadNetwork + Sync,
{
    /// Check every non-blank address, results in input order.
    ///
    /// Up to `max_parallel` addresses are in flight at once; each address's
    /// own cascade stays sequential.
    pub fn check_batch<S>(&self, addresses: &[S], vehicle: &VehicleProfile) -> Vec<CheckOutcome>
    where
        S: AsRef<str> + Sync,
    {
        let addresses: Vec<&str> = addresses
            .iter()
            .map(|address| address.as_ref().trim())
            .filter(|address| !address.is_empty())
            .collect();

        let threads = self.options.max_parallel.max(1);
        if threads == 1 {
            return addresses
                .iter()
                .map(|address| self.check(address, vehicle))
                .collect();
        }

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| {
                addresses
                    .par_iter()
                    .map(|address| self.check(address, vehicle))
                    .collect()
            }),
            Err(err) => {
                warn!(error = %err, "thread pool unavailable, checking sequentially");
                addresses
                    .iter()
                    .map(|address| self.check(address, vehicle))
                    .collect()
            }
        }
    }
}

/// Parse the address proper, skipping a company name or postal mark in front of it.
fn parse_resolved(resolved_address: &str) -> ParsedAddress {
    parser::parse(&extract_address(resolved_address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_prefix_is_not_taken_for_the_city() {
        let parsed = parse_resolved("株式会社サンプル 東京都世田谷区北沢2丁目");
        assert_eq!(parsed.prefecture, "東京都");
        assert_eq!(parsed.city, "世田谷区");
        assert_eq!(parsed.town, "北沢");
    }

    #[test]
    fn test_leading_postal_mark_is_skipped() {
        let parsed = parse_resolved("〒104-0061 中央区銀座2丁目15-2");
        assert_eq!(parsed.city, "中央区");
        assert_eq!(parsed.town, "銀座");
    }
}
