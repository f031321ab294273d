//! Scripted provider doubles.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use fcl_access::error::GeocodeError;
use fcl_access::reverse::AddressComponents;
use fcl_access::road::RoadSegment;
use fcl_access::traits::{CadastralGeocoder, Place, PlaceGeocoder, RoadNetwork};

/// What a scripted provider does for one query.
#[derive(Debug, Clone)]
pub enum Answer {
    Hit((f64, f64)),
    Miss,
    Timeout,
    Malformed,
}

impl Answer {
    fn location(&self) -> Result<Option<(f64, f64)>, GeocodeError> {
        match self {
            Answer::Hit(location) => Ok(Some(*location)),
            Answer::Miss => Ok(None),
            Answer::Timeout => Err(GeocodeError::Timeout),
            Answer::Malformed => Err(GeocodeError::Malformed("unexpected body".to_string())),
        }
    }
}

/// Cadastral geocoder answering from a table; unknown queries miss.
#[derive(Debug, Default)]
pub struct ScriptedCadastral {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCadastral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, query: &str, answer: Answer) -> Self {
        self.answers.insert(query.to_string(), answer);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CadastralGeocoder for ScriptedCadastral {
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        self.calls.lock().unwrap().push(query.to_string());
        self.answers
            .get(query)
            .map_or(Ok(None), Answer::location)
    }
}

/// One recorded general-purpose provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceCall {
    Search { query: String, country: Option<String> },
    Reverse((f64, f64)),
}

/// General-purpose geocoder answering from tables; unknown queries miss.
#[derive(Debug, Default)]
pub struct ScriptedPlaces {
    /// Keyed by (query, country).
    answers: HashMap<(String, Option<String>), Answer>,
    reverse: Option<Place>,
    calls: Mutex<Vec<(Instant, PlaceCall)>>,
}

impl ScriptedPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, query: &str, country: Option<&str>, answer: Answer) -> Self {
        self.answers
            .insert((query.to_string(), country.map(str::to_string)), answer);
        self
    }

    pub fn reverse_with(mut self, components: AddressComponents) -> Self {
        self.reverse = Some(Place {
            components: Some(components),
            ..Place::default()
        });
        self
    }

    pub fn calls(&self) -> Vec<PlaceCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    fn record(&self, call: PlaceCall) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

impl PlaceGeocoder for ScriptedPlaces {
    fn search(&self, query: &str, country: Option<&str>) -> Result<Option<Place>, GeocodeError> {
        self.record(PlaceCall::Search {
            query: query.to_string(),
            country: country.map(str::to_string),
        });
        let key = (query.to_string(), country.map(str::to_string));
        let location = self.answers.get(&key).map_or(Ok(None), Answer::location)?;
        Ok(location.map(|location| Place {
            location,
            ..Place::default()
        }))
    }

    fn reverse(&self, location: (f64, f64)) -> Result<Option<Place>, GeocodeError> {
        self.record(PlaceCall::Reverse(location));
        Ok(self.reverse.clone().map(|place| Place { location, ..place }))
    }
}

/// Road network returning the same segments everywhere.
#[derive(Debug, Default)]
pub struct FixedRoads {
    segments: Vec<RoadSegment>,
    calls: Mutex<Vec<((f64, f64), f64)>>,
}

impl FixedRoads {
    pub fn new(segments: Vec<RoadSegment>) -> Self {
        Self {
            segments,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<((f64, f64), f64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RoadNetwork for FixedRoads {
    fn roads_near(&self, location: (f64, f64), radius_m: f64) -> Vec<RoadSegment> {
        self.calls.lock().unwrap().push((location, radius_m));
        self.segments.clone()
    }
}
