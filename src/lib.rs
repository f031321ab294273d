//! fcl-access core
//!
//! Resolves free-form Japanese or romanized facility addresses to
//! coordinates and decides whether a container chassis or truck class can
//! physically reach them.

pub mod script;
pub mod prefecture;
pub mod parser;
pub mod normalize;
pub mod candidates;
pub mod traits;
pub mod error;
pub mod gsi;
pub mod nominatim;
pub mod reverse;
pub mod cascade;
pub mod road;
pub mod haversine;
pub mod polyline;
pub mod overpass;
pub mod vehicle;
pub mod classify;
pub mod checker;
