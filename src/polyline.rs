//! Polyline representation for road geometries.
//!
//! Overpass returns each way as a list of nodes; the classifier only needs
//! the distance from the target coordinate to the closest point on it.

use serde::{Deserialize, Serialize};

use crate::haversine::{haversine_m, point_to_segment_m};

/// A way geometry as decoded (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Shortest distance in meters from `point` to any part of the line.
    ///
    /// `None` for an empty geometry.
    pub fn distance_to(&self, point: (f64, f64)) -> Option<f64> {
        match self.points.as_slice() {
            [] => None,
            [only] => Some(haversine_m(point, *only)),
            points => points
                .windows(2)
                .map(|pair| point_to_segment_m(point, pair[0], pair[1]))
                .reduce(f64::min),
        }
    }
}
