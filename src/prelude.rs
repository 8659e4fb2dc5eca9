//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    config::{HeaderPolicy, MagnitudeScaling, MapConfig, MapSettings, MarkerProfile, MarkerStyle, RenderOptions},
    geo::{LatLng, Point},
    projection::{linear_map, magnitude_to_diameter, project_latitude, project_longitude, Projector},
};

pub use crate::data::{
    datasets::{DatasetStore, FeedWindow},
    feed::{parse_feed, parse_row, EarthquakeEvent, FeedParseError, FeedReport},
};

pub use crate::input::handler::{Action, ActionDispatcher};

pub use crate::tiles::{
    loader::ResourceLoader,
    source::{BasemapSource, FeedSource, FixedBasemap, MapboxStaticSource},
};

#[cfg(feature = "render")]
pub use crate::core::map::QuakeMap;

#[cfg(feature = "render")]
pub use crate::layers::{base::LayerTrait, manager::LayerManager, marker::MarkerLayer};

#[cfg(feature = "render")]
pub use crate::rendering::{
    canvas::Canvas,
    pipeline::{RenderOutcome, RenderPipeline},
};

#[cfg(feature = "egui")]
pub use crate::ui::frame::FrameView;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
