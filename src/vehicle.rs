//! Vehicle profiles.
//!
//! The table is loaded once by the embedding application (or taken from
//! [`VehicleTable::default`]) and only ever read afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of vehicle classes, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleClass {
    #[default]
    #[serde(rename = "40ft")]
    Container40ft,
    #[serde(rename = "20ft")]
    Container20ft,
    #[serde(rename = "10t")]
    Truck10t,
    #[serde(rename = "4t")]
    Truck4t,
    #[serde(rename = "2t")]
    Truck2t,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Container40ft,
        VehicleClass::Container20ft,
        VehicleClass::Truck10t,
        VehicleClass::Truck4t,
        VehicleClass::Truck2t,
    ];

    /// Classes whose turning radius rules out service roads and living streets.
    pub fn is_large(self) -> bool {
        matches!(
            self,
            VehicleClass::Container40ft | VehicleClass::Container20ft | VehicleClass::Truck10t
        )
    }

    pub fn short_name(self) -> &'static str {
        match self {
            VehicleClass::Container40ft => "40ft",
            VehicleClass::Container20ft => "20ft",
            VehicleClass::Truck10t => "10t",
            VehicleClass::Truck4t => "4t",
            VehicleClass::Truck2t => "2t",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown vehicle class: {0}")]
pub struct UnknownVehicleClass(pub String);

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        VehicleClass::ALL
            .into_iter()
            .find(|class| class.short_name() == key)
            .ok_or_else(|| UnknownVehicleClass(s.to_string()))
    }
}

/// Physical parameters of one vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub class: VehicleClass,
    /// Display name used in verdict reasons.
    pub name: String,
    pub body_width_m: f64,
    /// Narrowest carriageway the vehicle can use at all.
    pub min_road_width_m: f64,
    /// Stricter minimum on residential streets (curb parking, turning allowance).
    pub residential_min_width_m: f64,
}

impl VehicleProfile {
    pub fn new(
        class: VehicleClass,
        name: impl Into<String>,
        body_width_m: f64,
        min_road_width_m: f64,
        residential_min_width_m: f64,
    ) -> Self {
        Self {
            class,
            name: name.into(),
            body_width_m,
            min_road_width_m,
            residential_min_width_m,
        }
    }
}

/// Read-only lookup of vehicle profiles by class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTable {
    profiles: Vec<VehicleProfile>,
}

impl Default for VehicleTable {
    fn default() -> Self {
        Self {
            profiles: vec![
                VehicleProfile::new(VehicleClass::Container40ft, "40ftコンテナシャーシ", 2.5, 3.5, 6.0),
                VehicleProfile::new(VehicleClass::Container20ft, "20ftコンテナシャーシ", 2.5, 3.5, 5.5),
                VehicleProfile::new(VehicleClass::Truck10t, "10tトラック", 2.49, 3.5, 5.0),
                VehicleProfile::new(VehicleClass::Truck4t, "4tトラック", 2.2, 3.0, 4.0),
                VehicleProfile::new(VehicleClass::Truck2t, "2tトラック", 1.7, 2.5, 3.5),
            ],
        }
    }
}

impl VehicleTable {
    pub fn new(profiles: Vec<VehicleProfile>) -> Self {
        Self { profiles }
    }

    pub fn get(&self, class: VehicleClass) -> Option<&VehicleProfile> {
        self.profiles.iter().find(|profile| profile.class == class)
    }

    /// Profile for `class`, or the largest class in the table when none is given.
    pub fn resolve(&self, class: Option<VehicleClass>) -> Option<&VehicleProfile> {
        match class {
            Some(class) => self.get(class),
            None => VehicleClass::ALL.into_iter().find_map(|class| self.get(class)),
        }
    }

    pub fn profiles(&self) -> &[VehicleProfile] {
        &self.profiles
    }
}
