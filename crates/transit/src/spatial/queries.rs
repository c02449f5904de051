//! Distance and bearing calculations.
//!
//! Uses the Haversine formula on a spherical Earth of radius 6,371 km.

use geo::Point;

/// Mean Earth radius used for every distance in the network
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two lat/lon pairs (degrees)
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    distance_meters(p1.y(), p1.x(), p2.y(), p2.x())
}

/// Direction of `point` seen from `origin`, in degrees clockwise from north
///
/// Computed on raw degree offsets (no projection), normalised to `[0, 360)`.
pub fn bearing_degrees(origin: Point, point: Point) -> f64 {
    let d_lat = point.y() - origin.y();
    let d_lon = point.x() - origin.x();

    let angle = d_lon.atan2(d_lat).to_degrees();
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Position on the unit sphere, x toward (0, 0), z toward the north pole
///
/// Straight-line distance between these vectors grows monotonically with
/// great-circle distance, so nearest-neighbour searches on them agree with
/// Haversine ordering.
pub fn unit_vector(point: Point) -> [f64; 3] {
    let lat = point.y().to_radians();
    let lon = point.x().to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}
