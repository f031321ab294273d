//! Great-circle and short-range distances.
//!
//! Road geometry near an address spans at most a few hundred meters, so the
//! point-to-segment distance uses a local equirectangular projection centered
//! on the query point. Point-to-point distances use the haversine formula.

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two (lat, lng) points in meters.
pub fn haversine_m(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Distance in meters from `point` to the closest point of the segment `a`-`b`.
pub fn point_to_segment_m(point: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (ax, ay) = project(point, a);
    let (bx, by) = project(point, b);
    let (dx, dy) = (bx - ax, by - ay);
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return (ax * ax + ay * ay).sqrt();
    }

    // Query point is the projection origin.
    let t = (-(ax * dx + ay * dy) / length_sq).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (cx * cx + cy * cy).sqrt()
}

/// Planar (x, y) meters of `p` relative to `origin`.
fn project(origin: (f64, f64), p: (f64, f64)) -> (f64, f64) {
    let meters_per_degree = EARTH_RADIUS_M.to_radians();
    let x = (p.1 - origin.1) * origin.0.to_radians().cos() * meters_per_degree;
    let y = (p.0 - origin.0) * meters_per_degree;
    (x, y)
}
