//! Simplified Web Mercator projection from degrees to basemap pixels, and the
//! magnitude to marker diameter scale.
//!
//! Pixel space follows the static image provider: a world that is
//! `2 * tile_half_size * 2^zoom` pixels wide, with y growing southwards.

use crate::{
    constants::{MAX_MAGNITUDE, TILE_HALF_SIZE},
    core::{
        config::{MagnitudeScaling, MapConfig, MarkerStyle},
        geo::{LatLng, Point},
    },
    MapError, Result,
};
use std::f64::consts::PI;

/// Pixels per radian at `zoom`: `(tile_half_size / π) * 2^zoom`.
pub fn scale_factor(zoom: f64, tile_half_size: f64) -> f64 {
    (tile_half_size / PI) * 2_f64.powf(zoom)
}

fn mercator_x(longitude: f64, scale: f64) -> f64 {
    scale * (longitude.to_radians() + PI)
}

fn mercator_y(latitude: f64, scale: f64) -> f64 {
    scale * (PI - (PI / 4.0 + latitude.to_radians() / 2.0).tan().ln())
}

/// Projects a longitude in degrees to an absolute x pixel.
pub fn project_longitude(longitude: f64, zoom: f64) -> f64 {
    mercator_x(longitude, scale_factor(zoom, TILE_HALF_SIZE))
}

/// Projects a latitude in degrees to an absolute y pixel.
///
/// Unbounded near the poles; see [`Projector`] for the clamped form.
pub fn project_latitude(latitude: f64, zoom: f64) -> f64 {
    mercator_y(latitude, scale_factor(zoom, TILE_HALF_SIZE))
}

/// Affine rescale of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
pub fn linear_map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Marker diameter for `magnitude` with a magnitude 10 event at `diameter_ceiling`.
///
/// `sqrt(10^m)` keeps one magnitude step visibly larger than the last. No clamping.
pub fn magnitude_to_diameter(magnitude: f64, diameter_ceiling: f64) -> f64 {
    let scaled = 10_f64.powf(magnitude).sqrt();
    let max_scaled = 10_f64.powf(MAX_MAGNITUDE).sqrt();
    linear_map(scaled, 0.0, max_scaled, 0.0, diameter_ceiling)
}

impl MarkerStyle {
    /// Diameter for `magnitude` under this style's scaling policy.
    pub fn diameter_for(&self, magnitude: f64) -> f64 {
        let diameter = magnitude_to_diameter(magnitude, self.diameter_ceiling);
        match self.scaling {
            MagnitudeScaling::Overflow => diameter,
            MagnitudeScaling::Clamp => diameter.clamp(0.0, self.diameter_ceiling.max(0.0)),
        }
    }
}

/// Projects points to offsets from the map center.
///
/// The center is projected once on construction, so the canvas origin can be
/// translated to its visual center and offsets drawn directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    scale: f64,
    center: Point,
    clamp_latitude: bool,
}

impl Projector {
    /// Creates a projector for `config`, clamping latitudes to the Mercator limit.
    pub fn new(config: &MapConfig) -> Self {
        Self::with_latitude_clamp(config, true)
    }

    pub fn with_latitude_clamp(config: &MapConfig, clamp_latitude: bool) -> Self {
        let scale = scale_factor(config.zoom, config.tile_half_size);
        let mut projector = Self {
            scale,
            center: Point::default(),
            clamp_latitude,
        };
        projector.center = projector.project(&config.center);
        projector
    }

    /// Absolute pixel position of `point` in the projected world.
    pub fn project(&self, point: &LatLng) -> Point {
        let point = if self.clamp_latitude {
            point.clamped()
        } else {
            *point
        };
        Point::new(
            mercator_x(point.lng, self.scale),
            mercator_y(point.lat, self.scale),
        )
    }

    /// Absolute pixel position of the map center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Offset of `point` from the map center.
    pub fn offset(&self, point: &LatLng) -> Point {
        self.project(point).subtract(&self.center)
    }

    /// Like [`Projector::offset`], rejecting coordinates outside the valid range.
    pub fn try_offset(&self, point: &LatLng) -> Result<Point> {
        if !point.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "latitude {} / longitude {} out of range",
                point.lat, point.lng
            )));
        }
        let offset = self.offset(point);
        if !offset.x.is_finite() || !offset.y.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "latitude {} does not project to a finite pixel",
                point.lat
            )));
        }
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zero_longitude_is_self_consistent() {
        assert_eq!(project_longitude(0.0, 1.0), project_longitude(-0.0, 1.0));
    }

    #[test]
    fn test_origin_at_zoom_one() {
        assert!((project_longitude(0.0, 1.0) - 512.0).abs() < EPS);
        // The equator crosses the middle of the 1024px world.
        assert!((project_latitude(0.0, 1.0) - 512.0).abs() < EPS);
    }

    #[test]
    fn test_longitude_monotonic() {
        for zoom in [0.0, 1.0, 2.5, 5.0] {
            let mut previous = f64::NEG_INFINITY;
            for step in 0..=360 {
                let x = project_longitude(-180.0 + step as f64, zoom);
                assert!(x > previous, "not increasing at zoom {zoom}, step {step}");
                previous = x;
            }
        }
    }

    #[test]
    fn test_latitude_monotonic_decreasing() {
        let mut previous = f64::INFINITY;
        for step in 1..170 {
            let y = project_latitude(-85.0 + step as f64, 1.0);
            assert!(y < previous, "not decreasing at step {step}");
            previous = y;
        }
        // North is up: a northern city sits above the equator.
        assert!(project_latitude(49.2827, 1.0) < project_latitude(0.0, 1.0));
    }

    #[test]
    fn test_world_edges() {
        assert!(project_longitude(-180.0, 1.0).abs() < EPS);
        assert!((project_longitude(180.0, 1.0) - 1024.0).abs() < EPS);
    }

    #[test]
    fn test_linear_map() {
        assert_eq!(linear_map(5.0, 0.0, 10.0, 0.0, 60.0), 30.0);
        assert_eq!(linear_map(0.0, -1.0, 1.0, 10.0, 20.0), 15.0);
    }

    #[test]
    fn test_magnitude_to_diameter_bounds() {
        assert!((magnitude_to_diameter(10.0, 1800.0) - 1800.0).abs() < EPS);
        assert!((magnitude_to_diameter(10.0, 60.0) - 60.0).abs() < EPS);
        // sqrt(10^0) = 1 out of 1e5, which is effectively nothing.
        assert!(magnitude_to_diameter(0.0, 1800.0) < 0.02);
        assert!(magnitude_to_diameter(0.0, 1800.0) >= 0.0);
    }

    #[test]
    fn test_magnitude_scale_is_half_power() {
        let d = magnitude_to_diameter(5.5, 1800.0);
        let expected = 10_f64.powf(5.5 / 2.0) / 1e5 * 1800.0;
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_policy() {
        let overflow = MarkerStyle::with_ceiling(60.0);
        let clamp = MarkerStyle {
            scaling: MagnitudeScaling::Clamp,
            ..MarkerStyle::with_ceiling(60.0)
        };

        assert!(overflow.diameter_for(11.0) > 60.0);
        assert_eq!(clamp.diameter_for(11.0), 60.0);
        assert_eq!(clamp.diameter_for(4.0), overflow.diameter_for(4.0));
    }

    #[test]
    fn test_projector_center_is_origin() {
        let config = MapConfig::new(LatLng::new(31.2304, 121.4737), 1.0);
        let projector = Projector::new(&config);
        let offset = projector.offset(&config.center);

        assert!(offset.x.abs() < EPS && offset.y.abs() < EPS);
    }

    #[test]
    fn test_projector_matches_free_functions() {
        let projector = Projector::new(&MapConfig::default());
        let offset = projector.offset(&LatLng::new(49.2827, -123.1207));

        let x = project_longitude(-123.1207, 1.0) - project_longitude(0.0, 1.0);
        let y = project_latitude(49.2827, 1.0) - project_latitude(0.0, 1.0);
        assert!((offset.x - x).abs() < EPS);
        assert!((offset.y - y).abs() < EPS);
        assert!(offset.x < 0.0 && offset.y < 0.0);
    }

    #[test]
    fn test_projector_clamps_poles() {
        let config = MapConfig::default();
        let clamped = Projector::new(&config).try_offset(&LatLng::new(90.0, 0.0)).unwrap();
        assert!(clamped.y.is_finite());
        // At the Mercator limit the world is square: the pole lands on the top edge.
        assert!((clamped.y + 512.0).abs() < 1e-6);

        let unclamped = Projector::with_latitude_clamp(&config, false);
        let near_pole = unclamped.offset(&LatLng::new(89.9999, 0.0));
        assert!(near_pole.y < clamped.y - 1000.0);
    }

    #[test]
    fn test_try_offset_rejects_out_of_range() {
        let projector = Projector::new(&MapConfig::default());
        let err = projector.try_offset(&LatLng::new(0.0, 200.0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidCoordinates(_)));
    }
}
