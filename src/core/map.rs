//! The earthquake map: fixed view, loaded resources and trigger table.

use crate::{
    core::config::{MapConfig, RenderOptions},
    data::datasets::{DatasetStore, FeedWindow},
    input::handler::{Action, ActionDispatcher},
    rendering::pipeline::{RenderOutcome, RenderPipeline},
    tiles::{loader::ResourceLoader, source::BasemapSource},
    MapError, Result,
};
use image::RgbaImage;

/// Everything a render pass reads, loaded once and never mutated afterwards.
///
/// A failed basemap load is kept rather than discarded, so every pass can
/// report it visibly instead of drawing markers on nothing.
pub struct QuakeMap {
    config: MapConfig,
    options: RenderOptions,
    basemap: Result<RgbaImage>,
    datasets: DatasetStore,
    dispatcher: ActionDispatcher,
}

impl QuakeMap {
    pub fn new(
        config: MapConfig,
        options: RenderOptions,
        basemap: Result<RgbaImage>,
        datasets: DatasetStore,
        dispatcher: ActionDispatcher,
    ) -> Result<Self> {
        config.validate()?;
        if let Err(e) = &basemap {
            log::error!("basemap unavailable: {}", e);
        }
        Ok(Self {
            config,
            options,
            basemap,
            datasets,
            dispatcher,
        })
    }

    /// Fetches the basemap for `config` from `source` and builds the map.
    pub fn load(
        config: MapConfig,
        options: RenderOptions,
        loader: &ResourceLoader,
        source: &dyn BasemapSource,
        datasets: DatasetStore,
    ) -> Result<Self> {
        let location = source.url(&config, options.canvas_width, options.canvas_height);
        let basemap = loader.load_basemap(&location);
        Self::new(config, options, basemap, datasets, ActionDispatcher::default())
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn datasets(&self) -> &DatasetStore {
        &self.datasets
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn has_basemap(&self) -> bool {
        self.basemap.is_ok()
    }

    /// Runs one full render pass for the dataset bound to `action`.
    pub fn handle(&self, action: Action) -> Result<RenderOutcome> {
        let window = self.dispatcher.resolve(action).ok_or_else(|| {
            MapError::Config(format!("no dataset bound to {:?}", action))
        })?;
        log::info!("{:?} -> {} feed", action, window);
        Ok(self.render_window(window))
    }

    /// Runs one full render pass over `window`'s events.
    pub fn render_window(&self, window: FeedWindow) -> RenderOutcome {
        let basemap = match &self.basemap {
            Ok(image) => image,
            Err(e) => return RenderPipeline::render_failure(&self.options, e),
        };

        let events = self.datasets.get(window);
        match RenderPipeline::render(&self.config, &self.options, Some(basemap), events) {
            Ok(outcome) => outcome,
            Err(e) => RenderPipeline::render_failure(&self.options, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{config::MarkerProfile, geo::LatLng},
        data::feed::EarthquakeEvent,
    };
    use image::Rgba;

    /// Compact markers keep a magnitude 9 circle (about 19px) inside the canvas.
    fn options() -> RenderOptions {
        RenderOptions {
            canvas_width: 64,
            canvas_height: 32,
            ..RenderOptions::with_profile(&MarkerProfile::Compact)
        }
    }

    fn store() -> DatasetStore {
        let mut store = DatasetStore::new();
        store.insert(
            FeedWindow::Day,
            vec![EarthquakeEvent {
                timestamp: "t".into(),
                location: LatLng::new(0.0, 0.0),
                depth: None,
                magnitude: 9.0,
            }],
        );
        store
    }

    #[test]
    fn test_handle_renders_bound_window() {
        let basemap = RgbaImage::from_pixel(64, 32, Rgba([0, 0, 80, 255]));
        let map = QuakeMap::new(
            MapConfig::default(),
            options(),
            Ok(basemap),
            store(),
            ActionDispatcher::default(),
        )
        .unwrap();

        let day = map.handle(Action::ShowDay).unwrap();
        assert!(!day.is_error());
        assert_eq!(day.markers_drawn, 1);
        assert_ne!(day.image.get_pixel(32, 16).0, [0, 0, 80, 255]);
        assert_eq!(day.image.get_pixel(0, 0).0, [0, 0, 80, 255]);

        let hour = map.handle(Action::ShowHour).unwrap();
        assert_eq!(hour.markers_drawn, 0);
        assert_eq!(hour.image.get_pixel(32, 16).0, [0, 0, 80, 255]);
    }

    #[test]
    fn test_missing_basemap_shows_error_frame() {
        let map = QuakeMap::new(
            MapConfig::default(),
            options(),
            Err(MapError::resource("https://example.invalid/map.png", "HTTP 401")),
            store(),
            ActionDispatcher::default(),
        )
        .unwrap();

        assert!(!map.has_basemap());
        let outcome = map.handle(Action::ShowDay).unwrap();
        assert!(outcome.is_error());
        assert_eq!(outcome.markers_drawn, 0);
        assert!(outcome.error.unwrap().contains("HTTP 401"));
    }

    #[test]
    fn test_unbound_action() {
        let map = QuakeMap::new(
            MapConfig::default(),
            options(),
            Ok(RgbaImage::new(64, 32)),
            store(),
            ActionDispatcher::empty(),
        )
        .unwrap();

        assert!(matches!(map.handle(Action::ShowDay), Err(MapError::Config(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MapConfig::new(LatLng::new(0.0, 0.0), f64::NAN);
        let result = QuakeMap::new(
            config,
            options(),
            Ok(RgbaImage::new(64, 32)),
            DatasetStore::new(),
            ActionDispatcher::default(),
        );
        assert!(result.is_err());
    }
}
