//! Test fixtures for fcl-access.
//!
//! Provides:
//! - Real Japanese facility locations (coordinates from OpenStreetMap)
//! - Scripted provider doubles that record every call

#![allow(dead_code)]

pub mod japan_locations;
pub mod providers;

pub use japan_locations::*;
pub use providers::*;
