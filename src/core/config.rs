//! Configuration for the projection and the render pass
//!
//! `MapConfig` is the fixed view of the basemap, `RenderOptions` everything
//! the render pass needs beyond it. Marker sizing comes from presets through
//! [`MarkerProfile`] in the same way a performance profile resolves into
//! concrete options. Both can be read from and written to a JSON file.

use crate::{
    constants::{
        CANVAS_HEIGHT, CANVAS_WIDTH, COMPACT_DIAMETER_CEILING, DEFAULT_ZOOM,
        EXPANDED_DIAMETER_CEILING, MARKER_FILL, TILE_HALF_SIZE,
    },
    core::geo::LatLng,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Center and zoom the basemap image was rendered with.
///
/// Fixed at initialization and read-only for the rest of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub tile_half_size: f64,
}

impl MapConfig {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            tile_half_size: TILE_HALF_SIZE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center {:?} is outside the valid coordinate range",
                self.center
            )));
        }
        if !self.zoom.is_finite() || self.zoom < 0.0 {
            return Err(MapError::Config(format!(
                "zoom must be a non-negative number, got {}",
                self.zoom
            )));
        }
        if !self.tile_half_size.is_finite() || self.tile_half_size <= 0.0 {
            return Err(MapError::Config(format!(
                "tile_half_size must be positive, got {}",
                self.tile_half_size
            )));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(LatLng::default(), DEFAULT_ZOOM)
    }
}

/// What happens to magnitudes outside `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeScaling {
    /// Diameters follow the formula past the ceiling and below zero.
    #[default]
    Overflow,
    /// Diameters are clamped to `0..=diameter_ceiling`.
    Clamp,
}

/// Treatment of the first row of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Drop row 0 only when its latitude field is not a number.
    #[default]
    Auto,
    Skip,
    Keep,
}

impl FromStr for HeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "skip" => Ok(Self::Skip),
            "keep" => Ok(Self::Keep),
            other => Err(format!("unknown header policy '{}' (auto, skip, keep)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Diameter in pixels of a magnitude 10 event.
    pub diameter_ceiling: f64,
    pub fill: [u8; 4],
    pub stroke: Option<[u8; 4]>,
    pub scaling: MagnitudeScaling,
}

impl MarkerStyle {
    pub fn with_ceiling(diameter_ceiling: f64) -> Self {
        Self {
            diameter_ceiling,
            ..Self::default()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            diameter_ceiling: EXPANDED_DIAMETER_CEILING,
            fill: MARKER_FILL,
            stroke: Some(MARKER_FILL),
            scaling: MagnitudeScaling::Overflow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerProfile {
    /// Small markers, ceiling of 60px.
    Compact,
    /// Large markers, ceiling of 1800px.
    Expanded,
    Custom(MarkerStyle),
}

impl MarkerProfile {
    pub fn resolve(&self) -> MarkerStyle {
        match self {
            Self::Compact => MarkerStyle::with_ceiling(COMPACT_DIAMETER_CEILING),
            Self::Expanded => MarkerStyle::with_ceiling(EXPANDED_DIAMETER_CEILING),
            Self::Custom(style) => style.clone(),
        }
    }
}

impl Default for MarkerProfile {
    fn default() -> Self {
        Self::Expanded
    }
}

impl FromStr for MarkerProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "expanded" => Ok(Self::Expanded),
            other => Err(format!("unknown marker profile '{}' (compact, expanded)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub marker: MarkerStyle,
    pub header: HeaderPolicy,
    /// Clamp latitudes to the Mercator limit before projecting.
    pub clamp_latitude: bool,
}

impl RenderOptions {
    pub fn with_profile(profile: &MarkerProfile) -> Self {
        Self {
            marker: profile.resolve(),
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            marker: MarkerProfile::default().resolve(),
            header: HeaderPolicy::default(),
            clamp_latitude: true,
        }
    }
}

/// Settings file contents: the map view plus render options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub map: MapConfig,
    pub render: RenderOptions,
}

impl MapSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: MapSettings = serde_json::from_str(json)?;
        settings.map.validate()?;
        if settings.render.canvas_width == 0 || settings.render.canvas_height == 0 {
            return Err(MapError::Config("canvas size must be non-zero".into()));
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
