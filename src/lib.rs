//! # quakemap
//!
//! Overlays earthquake events from a comma-separated feed on a static
//! Web Mercator world map.
//!
//! The crate is split the way a small map engine is: geographic value types
//! and the projector live in [`core`], feed parsing in [`data`], image and
//! feed fetching in [`tiles`], drawable layers in [`layers`], the CPU canvas
//! and render pass in [`rendering`], the trigger dispatch table in
//! [`input`], and with the `egui` feature a frame view in `ui`.

pub mod core;
pub mod data;
pub mod input;
#[cfg(feature = "render")]
pub mod layers;
pub mod prelude;
#[cfg(feature = "render")]
pub mod rendering;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{HeaderPolicy, MagnitudeScaling, MapConfig, MarkerProfile, MarkerStyle, RenderOptions},
    geo::{LatLng, Point},
    projection::{linear_map, magnitude_to_diameter, project_latitude, project_longitude, Projector},
};

#[cfg(feature = "render")]
pub use core::map::QuakeMap;

pub use data::{
    datasets::{DatasetStore, FeedWindow},
    feed::{parse_feed, parse_row, EarthquakeEvent, FeedParseError, FeedReport},
};

pub use input::handler::{Action, ActionDispatcher};

#[cfg(feature = "render")]
pub use layers::{base::LayerTrait, image::BasemapLayer, marker::MarkerLayer};

#[cfg(feature = "render")]
pub use rendering::{canvas::Canvas, pipeline::RenderPipeline};

pub use tiles::{loader::ResourceLoader, source::BasemapSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "render")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A map image or feed could not be fetched or decoded.
    #[error("Failed to load {location}: {reason}")]
    ResourceLoad { location: String, reason: String },

    /// A coordinate fell outside the projectable range.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Feed parse error: {0}")]
    Parse(#[from] FeedParseError),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl MapError {
    pub(crate) fn resource(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ResourceLoad {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Error type alias for convenience
pub type Error = MapError;
