//! Geocoding resolution cascade.
//!
//! Resolution is an ordered plan of (strategy, query) attempts walked by a
//! single loop that stops at the first coordinate-bearing answer:
//!
//! 1. cadastral provider over every candidate (Japanese input only),
//! 2. general-purpose provider over every candidate, constrained to the home country,
//! 3. general-purpose provider over the untouched input, unconstrained.
//!
//! Provider errors only end the attempt that raised them. Later attempts
//! exist to cover earlier failures, so the plan must never run out of order
//! or in parallel.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::candidates::{CandidateGenerator, LatinAddress};
use crate::error::GeocodeError;
use crate::normalize::normalize;
use crate::reverse::{assemble_address, with_house_number};
use crate::script::Script;
use crate::traits::{CadastralGeocoder, Place, PlaceGeocoder};

#[derive(Debug, Clone)]
pub struct CascadeOptions {
    /// ISO 3166-1 code used to constrain general-purpose lookups.
    pub country_code: String,
    /// Country name appended to simplified romanized candidates.
    pub country_name: String,
    /// Minimum spacing between general-purpose provider requests.
    pub open_provider_delay_ms: u64,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            country_code: "jp".to_string(),
            country_name: "Japan".to_string(),
            open_provider_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Cadastral,
    OpenCountry,
    OpenUnconstrained,
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Input text, or a local-script rendering obtained by reverse lookup for romanized input.
    pub resolved_address: String,
    /// The query that produced the coordinates. Never empty.
    pub used_candidate: String,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(GeocodeResult),
    Unresolved,
}

impl Resolution {
    pub fn resolved(&self) -> Option<&GeocodeResult> {
        match self {
            Resolution::Resolved(result) => Some(result),
            Resolution::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Attempt<'a> {
    strategy: Strategy,
    query: &'a str,
}

pub struct GeocodingCascade<C, G> {
    cadastral: C,
    open: G,
    generator: CandidateGenerator,
    options: CascadeOptions,
    last_open_request: Mutex<Option<Instant>>,
}

impl<C, G> GeocodingCascade<C, G>
where
    C: CadastralGeocoder,
    G: PlaceGeocoder,
{
    pub fn new(cadastral: C, open: G, options: CascadeOptions) -> Self {
        Self {
            cadastral,
            open,
            generator: CandidateGenerator::new(options.country_name.clone()),
            options,
            last_open_request: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &CascadeOptions {
        &self.options
    }

    /// Resolve `address` to coordinates.
    pub fn resolve(&self, address: &str) -> Resolution {
        let raw = address.trim();
        if raw.is_empty() {
            return Resolution::Unresolved;
        }

        let script = Script::of(raw);
        let candidates = self.generator.generate(raw);
        let plan = self.plan(script, raw, &candidates);

        for attempt in &plan {
            if let Some(result) = self.run(attempt, raw, script) {
                info!(
                    address = raw,
                    candidate = result.used_candidate.as_str(),
                    strategy = ?result.strategy,
                    lat = result.latitude,
                    lng = result.longitude,
                    "address resolved"
                );
                return Resolution::Resolved(result);
            }
        }

        warn!(address = raw, attempts = plan.len(), "address unresolved");
        Resolution::Unresolved
    }

    /// Local-script address at `location` via the general-purpose provider.
    pub fn reverse_address(&self, location: (f64, f64)) -> Option<String> {
        self.wait_for_open_provider();
        match self.open.reverse(location) {
            Ok(Some(place)) => assemble_address(&place),
            Ok(None) => None,
            Err(err) => {
                warn!(?location, error = %err, "reverse lookup failed");
                None
            }
        }
    }

    fn plan<'a>(&self, script: Script, raw: &'a str, candidates: &'a [String]) -> Vec<Attempt<'a>> {
        let queries = || {
            candidates
                .iter()
                .map(String::as_str)
                .filter(|query| !query.is_empty())
        };

        let mut plan = Vec::new();
        if script == Script::Japanese {
            plan.extend(queries().map(|query| Attempt {
                strategy: Strategy::Cadastral,
                query,
            }));
        }
        plan.extend(queries().map(|query| Attempt {
            strategy: Strategy::OpenCountry,
            query,
        }));
        plan.push(Attempt {
            strategy: Strategy::OpenUnconstrained,
            query: raw,
        });
        plan
    }

    fn run(&self, attempt: &Attempt<'_>, raw: &str, script: Script) -> Option<GeocodeResult> {
        let outcome = match attempt.strategy {
            Strategy::Cadastral => self.cadastral.geocode(attempt.query),
            Strategy::OpenCountry => self
                .search_open(attempt.query, Some(self.options.country_code.as_str()))
                .map(|place| place.map(|place| place.location)),
            Strategy::OpenUnconstrained => self
                .search_open(attempt.query, None)
                .map(|place| place.map(|place| place.location)),
        };

        let (latitude, longitude) = match outcome {
            Ok(Some(location)) if is_valid_location(location) => location,
            Ok(Some(location)) => {
                warn!(strategy = ?attempt.strategy, query = attempt.query, ?location, "provider returned invalid coordinates");
                return None;
            }
            Ok(None) => {
                debug!(strategy = ?attempt.strategy, query = attempt.query, "no match");
                return None;
            }
            Err(err) => {
                warn!(strategy = ?attempt.strategy, query = attempt.query, error = %err, "provider attempt failed");
                return None;
            }
        };

        let resolved_address = if attempt.strategy == Strategy::OpenCountry && script == Script::Latin {
            self.enrich(raw, (latitude, longitude))
                .unwrap_or_else(|| raw.to_string())
        } else {
            raw.to_string()
        };

        Some(GeocodeResult {
            latitude,
            longitude,
            resolved_address,
            used_candidate: attempt.query.to_string(),
            strategy: attempt.strategy,
        })
    }

    /// Local-script rendering of a romanized address, keeping its house number.
    fn enrich(&self, raw: &str, location: (f64, f64)) -> Option<String> {
        let enriched = self.reverse_address(location)?;
        let house_number = LatinAddress::parse(&normalize(raw)).house_number;
        Some(match house_number {
            Some(house_number) => with_house_number(&enriched, &house_number),
            None => enriched,
        })
    }

    fn search_open(&self, query: &str, country: Option<&str>) -> Result<Option<Place>, GeocodeError> {
        self.wait_for_open_provider();
        self.open.search(query, country)
    }

    /// Space general-purpose requests at least `open_provider_delay_ms` apart,
    /// across every thread sharing this cascade.
    fn wait_for_open_provider(&self) {
        let delay = Duration::from_millis(self.options.open_provider_delay_ms);
        if delay.is_zero() {
            return;
        }

        let mut last = self
            .last_open_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < delay {
                thread::sleep(delay - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

fn is_valid_location((lat, lng): (f64, f64)) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        assert!(is_valid_location((35.67, 139.76)));
        assert!(!is_valid_location((f64::NAN, 139.76)));
        assert!(!is_valid_location((95.0, 139.76)));
        assert!(!is_valid_location((35.0, 200.0)));
    }
}
