use geo::{HaversineDistance, Point};

/// Meters in a statute mile
const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two coordinates in miles
///
/// Points are given as latitude then longitude, in degrees.
#[inline]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Point::new(lon1, lat1);
    let to = Point::new(lon2, lat2);
    from.haversine_distance(&to) / METERS_PER_MILE
}

/// Round a mileage to one decimal place for display
#[inline]
pub fn round_miles(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}
