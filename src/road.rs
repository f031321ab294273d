//! Road segments as seen by the classifier.

use serde::Serialize;

/// Width assumed for road classes without a table entry.
const DEFAULT_WIDTH_M: f64 = 4.0;

/// Road class, following OSM `highway=*` values. `*_link` ramps fold into their parent class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Track,
    Pedestrian,
    Footway,
    Cycleway,
    Path,
    Steps,
    Bridleway,
    Other,
}

impl RoadType {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        let base = tag.strip_suffix("_link").unwrap_or(tag);
        match base {
            "motorway" => RoadType::Motorway,
            "trunk" => RoadType::Trunk,
            "primary" => RoadType::Primary,
            "secondary" => RoadType::Secondary,
            "tertiary" => RoadType::Tertiary,
            "unclassified" => RoadType::Unclassified,
            "residential" => RoadType::Residential,
            "living_street" => RoadType::LivingStreet,
            "service" => RoadType::Service,
            "track" => RoadType::Track,
            "pedestrian" => RoadType::Pedestrian,
            "footway" => RoadType::Footway,
            "cycleway" => RoadType::Cycleway,
            "path" => RoadType::Path,
            "steps" => RoadType::Steps,
            "bridleway" => RoadType::Bridleway,
            _ => RoadType::Other,
        }
    }

    /// Typical carriageway width in Japan for this class, in meters.
    pub fn estimated_width_m(self) -> f64 {
        match self {
            RoadType::Motorway => 12.0,
            RoadType::Trunk => 10.0,
            RoadType::Primary => 8.0,
            RoadType::Secondary => 6.0,
            RoadType::Tertiary => 5.0,
            RoadType::Residential => 4.0,
            RoadType::Unclassified => 4.0,
            RoadType::Service => 3.0,
            RoadType::LivingStreet => 2.5,
            _ => DEFAULT_WIDTH_M,
        }
    }

    /// Closed to motor vehicles.
    pub fn is_pedestrian_only(self) -> bool {
        matches!(
            self,
            RoadType::Pedestrian
                | RoadType::Footway
                | RoadType::Cycleway
                | RoadType::Path
                | RoadType::Steps
                | RoadType::Bridleway
        )
    }

    /// Motorway, trunk or primary.
    pub fn is_arterial(self) -> bool {
        matches!(self, RoadType::Motorway | RoadType::Trunk | RoadType::Primary)
    }

    /// Service roads, living streets and tracks.
    pub fn is_minor(self) -> bool {
        matches!(self, RoadType::Service | RoadType::LivingStreet | RoadType::Track)
    }

    pub fn label(self) -> &'static str {
        match self {
            RoadType::Motorway => "高速道路",
            RoadType::Trunk => "国道",
            RoadType::Primary => "主要幹線道路",
            RoadType::Secondary => "幹線道路",
            RoadType::Tertiary => "一般道路",
            RoadType::Unclassified => "未分類道路",
            RoadType::Residential => "住宅街道路",
            RoadType::LivingStreet => "生活道路",
            RoadType::Service => "構内道路",
            RoadType::Track => "農道・林道",
            RoadType::Pedestrian => "歩行者専用道",
            RoadType::Footway => "歩道",
            RoadType::Cycleway => "自転車道",
            RoadType::Path => "小道",
            RoadType::Steps => "階段",
            RoadType::Bridleway => "乗馬道",
            RoadType::Other => "その他道路",
        }
    }
}

/// One road near the target coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadSegment {
    pub road_type: RoadType,
    pub name: Option<String>,
    /// Width tagged on the way, if any and well-formed.
    pub declared_width_m: Option<f64>,
    /// Raw `lanes` tag.
    pub lanes: Option<String>,
    /// Distance from the query point to the nearest point of the way.
    pub distance_m: Option<f64>,
}

impl RoadSegment {
    pub fn new(road_type: RoadType) -> Self {
        Self {
            road_type,
            name: None,
            declared_width_m: None,
            lanes: None,
            distance_m: None,
        }
    }

    pub fn with_width(mut self, width_m: f64) -> Self {
        self.declared_width_m = Some(width_m);
        self
    }

    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = Some(distance_m);
        self
    }

    /// Declared width, or the class estimate when none was tagged.
    pub fn width_m(&self) -> f64 {
        self.declared_width_m
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or_else(|| self.road_type.estimated_width_m())
    }
}

/// Parse an OSM `width` tag (`3.5`, `3.5m`, `3.5 m`). Anything else is treated as absent.
pub fn parse_width(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed
        .strip_suffix(['m', 'M'])
        .unwrap_or(trimmed)
        .trim_end();
    let value: f64 = number.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
