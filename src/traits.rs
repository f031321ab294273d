//! Provider seams.
//!
//! The pipeline only talks to the outside world through these traits.
//! Concrete adapters live in `gsi`, `nominatim` and `overpass`; tests plug
//! in their own implementations.

use crate::error::GeocodeError;
use crate::reverse::AddressComponents;
use crate::road::RoadSegment;

/// A place returned by a general-purpose geocoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    /// Coordinates (lat, lng).
    pub location: (f64, f64),
    /// Structured address components, when the provider supplies them.
    pub components: Option<AddressComponents>,
    /// Full display string as rendered by the provider.
    pub display_name: Option<String>,
}

/// Address-to-coordinate lookup specialized for the national addressing scheme.
pub trait CadastralGeocoder {
    /// Best-match coordinates (lat, lng) for `query`, or `None` if nothing matched.
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError>;
}

/// General-purpose forward and reverse geocoder.
pub trait PlaceGeocoder {
    /// Best match for `query`, optionally constrained to an ISO 3166-1 country code.
    fn search(&self, query: &str, country: Option<&str>) -> Result<Option<Place>, GeocodeError>;

    /// Address at `location` (lat, lng), rendered in the local script.
    fn reverse(&self, location: (f64, f64)) -> Result<Option<Place>, GeocodeError>;
}

/// Nearby road segments for a coordinate.
///
/// Failures are not surfaced: an unreachable service yields an empty list,
/// which the classifier handles as "no road data".
pub trait RoadNetwork {
    fn roads_near(&self, location: (f64, f64), radius_m: f64) -> Vec<RoadSegment>;
}

impl<T: CadastralGeocoder + ?Sized> CadastralGeocoder for &T {
    fn geocode(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        (**self).geocode(query)
    }
}

impl<T: PlaceGeocoder + ?Sized> PlaceGeocoder for &T {
    fn search(&self, query: &str, country: Option<&str>) -> Result<Option<Place>, GeocodeError> {
        (**self).search(query, country)
    }

    fn reverse(&self, location: (f64, f64)) -> Result<Option<Place>, GeocodeError> {
        (**self).reverse(location)
    }
}

impl<T: RoadNetwork + ?Sized> RoadNetwork for &T {
    fn roads_near(&self, location: (f64, f64), radius_m: f64) -> Vec<RoadSegment> {
        (**self).roads_near(location, radius_m)
    }
}
