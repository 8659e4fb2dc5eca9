//! Core constants fixed by the static map provider and the feed scale.
//! Keeping them in a single place makes it easier to see what the projection depends on.

/// Half the pixel size of one 512px provider tile at zoom 0.
///
/// Must stay in step with the basemap image source; changing it alone shifts
/// every marker off the map.
pub const TILE_HALF_SIZE: f64 = 256.0;

/// Width of the static basemap and of the render surface.
pub const CANVAS_WIDTH: u32 = 1024;

/// Height of the static basemap and of the render surface.
pub const CANVAS_HEIGHT: u32 = 512;

/// Zoom level the basemap image is requested at.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Latitude where Web Mercator becomes a square world (EPSG:3857 limit).
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Magnitude treated as the top of the open Richter-like scale.
pub const MAX_MAGNITUDE: f64 = 10.0;

/// Marker diameter ceiling for the compact render mode.
pub const COMPACT_DIAMETER_CEILING: f64 = 60.0;

/// Marker diameter ceiling for the expanded render mode.
pub const EXPANDED_DIAMETER_CEILING: f64 = 1800.0;

/// Default translucent green marker fill (RGBA).
pub const MARKER_FILL: [u8; 4] = [0, 255, 0, 70];

/// Background shown when the basemap could not be loaded.
pub const ERROR_BACKGROUND: [u8; 4] = [32, 32, 32, 255];

/// Color of the cross drawn over a failed frame.
pub const ERROR_INDICATOR: [u8; 4] = [220, 40, 40, 255];

/// User agent sent to the map image and feed servers.
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Base URL of the USGS summary feeds.
pub const USGS_FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Default Mapbox style for the static basemap.
pub const MAPBOX_STYLE: &str = "dark-v9";
