//! Geographic projection onto the scene's unit sphere.
//!
//! Longitudes in the location table are stored rotated by +90° so that the
//! projected directions line up with the Earth texture's orientation.

use bevy::math::DVec3;

/// Longitude rotation applied to every table entry (degrees).
pub const LONGITUDE_OFFSET_DEG: f64 = 90.0;

/// Location selected when nothing else has been chosen.
pub const DEFAULT_LOCATION: &str = "New York";

/// A named point on the globe, longitude already offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoordinate {
    /// Display name, also the lookup key.
    pub name: &'static str,
    /// Latitude in degrees.
    pub latitude_deg: f64,
    /// Longitude in degrees, including [`LONGITUDE_OFFSET_DEG`].
    pub longitude_deg: f64,
}

impl GeoCoordinate {
    const fn offset(name: &'static str, latitude_deg: f64, raw_longitude_deg: f64) -> Self {
        Self {
            name,
            latitude_deg,
            longitude_deg: raw_longitude_deg + LONGITUDE_OFFSET_DEG,
        }
    }

    /// Direction from Earth's centre toward this location.
    pub fn unit_direction(&self) -> DVec3 {
        project_to_unit_sphere(self.latitude_deg, self.longitude_deg)
    }
}

/// Every selectable impact location, in menu order.
pub const LOCATIONS: [GeoCoordinate; 12] = [
    GeoCoordinate::offset("New York", 40.668252, -74.020154),
    GeoCoordinate::offset("Paris", 48.856540, 2.350917),
    GeoCoordinate::offset("Rome", 41.894833, 12.482812),
    GeoCoordinate::offset("Seoul", 37.549800, 126.991525),
    GeoCoordinate::offset("San Francisco", 37.771532, -122.420052),
    GeoCoordinate::offset("Houston", 29.728696, -95.374835),
    GeoCoordinate::offset("Bistrita", 47.139678, 24.497307),
    GeoCoordinate::offset("Berlin", 52.516888, 13.404820),
    GeoCoordinate::offset("Ottawa", 45.409732, -75.699385),
    GeoCoordinate::offset("Sao Paulo", -23.575927, -46.640413),
    GeoCoordinate::offset("Sydney", -33.878286, 151.200103),
    GeoCoordinate::offset("New Delhi", 28.598285, 77.204618),
];

/// Look up a location by its display name.
pub fn find_location(name: &str) -> Option<&'static GeoCoordinate> {
    LOCATIONS.iter().find(|loc| loc.name == name)
}

/// Map latitude/longitude (degrees) to a unit vector.
///
/// `x = cos(lat)·sin(lon)`, `y = sin(lat)`, `z = cos(lat)·cos(lon)`.
/// Latitudes outside [-90, 90] are not rejected.
pub fn project_to_unit_sphere(latitude_deg: f64, longitude_deg: f64) -> DVec3 {
    let phi = latitude_deg.to_radians();
    let lambda = longitude_deg.to_radians();
    let cos_phi = phi.cos();

    DVec3::new(cos_phi * lambda.sin(), phi.sin(), cos_phi * lambda.cos())
}
