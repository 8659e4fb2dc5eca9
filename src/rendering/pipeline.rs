//! One render pass: basemap plus markers for one event list.
//!
//! Every pass builds its own projector, layers and canvas from immutable
//! inputs, so passes never share mutable state and a later pass simply
//! replaces the output of an earlier one.

use crate::{
    core::{
        config::{MapConfig, RenderOptions},
        projection::Projector,
    },
    data::feed::EarthquakeEvent,
    layers::{image::BasemapLayer, manager::LayerManager, marker::MarkerLayer},
    rendering::canvas::Canvas,
    MapError, Result,
};
use image::RgbaImage;

/// Result of a finished pass.
pub struct RenderOutcome {
    pub image: RgbaImage,
    pub markers_drawn: usize,
    /// Events dropped because they could not be projected or sized.
    pub markers_skipped: usize,
    /// Set when the frame is an error indicator rather than a map.
    pub error: Option<String>,
}

impl RenderOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

pub struct RenderPipeline;

impl RenderPipeline {
    /// Draws `basemap` (when present) and one marker per projectable event.
    pub fn render(
        config: &MapConfig,
        options: &RenderOptions,
        basemap: Option<&RgbaImage>,
        events: &[EarthquakeEvent],
    ) -> Result<RenderOutcome> {
        config.validate()?;
        if options.canvas_width == 0 || options.canvas_height == 0 {
            return Err(MapError::Config("canvas size must be non-zero".into()));
        }

        let projector = Projector::with_latitude_clamp(config, options.clamp_latitude);
        let mut canvas = Canvas::new(options.canvas_width, options.canvas_height);
        let mut layers = LayerManager::new();

        if let Some(basemap) = basemap {
            layers.add_layer(Box::new(BasemapLayer::new("basemap".into(), basemap.clone())));
        }
        let mut markers = MarkerLayer::new("earthquakes".into(), events, options.marker.clone());
        markers.project(&projector);
        let (markers_drawn, markers_skipped) = (markers.markers().len(), markers.skipped());
        layers.add_layer(Box::new(markers));
        layers.render(&mut canvas, &projector)?;

        log::info!(
            "render pass: {} markers drawn, {} skipped",
            markers_drawn,
            markers_skipped
        );

        Ok(RenderOutcome {
            image: canvas.into_image(),
            markers_drawn,
            markers_skipped,
            error: None,
        })
    }

    /// A visible failure frame for a pass that could not load its resources.
    pub fn render_failure(options: &RenderOptions, error: &MapError) -> RenderOutcome {
        log::error!("render pass failed: {}", error);
        let mut canvas = Canvas::new(options.canvas_width.max(1), options.canvas_height.max(1));
        canvas.draw_error_indicator();
        RenderOutcome {
            image: canvas.into_image(),
            markers_drawn: 0,
            markers_skipped: 0,
            error: Some(error.to_string()),
        }
    }
}
