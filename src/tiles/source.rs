use crate::{
    constants::{MAPBOX_STYLE, USGS_FEED_BASE},
    core::config::MapConfig,
    data::datasets::FeedWindow,
};

/// Anything that can produce a static basemap URL for a view.
pub trait BasemapSource: Send + Sync {
    /// Build a URL for an image of `width`x`height` pixels centered on `config`.
    fn url(&self, config: &MapConfig, width: u32, height: u32) -> String;
}

/// Mapbox Static Images API, flat (bearing 0, pitch 0).
#[derive(Debug, Clone)]
pub struct MapboxStaticSource {
    style: String,
    access_token: String,
}

impl MapboxStaticSource {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            style: MAPBOX_STYLE.to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl BasemapSource for MapboxStaticSource {
    fn url(&self, config: &MapConfig, width: u32, height: u32) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/mapbox/{}/static/{},{},{},0,0/{}x{}?access_token={}",
            self.style,
            config.center.lng,
            config.center.lat,
            config.zoom,
            width,
            height,
            self.access_token
        )
    }
}

/// A fixed location (URL or file path) used whatever the view.
#[derive(Debug, Clone)]
pub struct FixedBasemap(pub String);

impl BasemapSource for FixedBasemap {
    fn url(&self, _config: &MapConfig, _width: u32, _height: u32) -> String {
        self.0.clone()
    }
}

/// Where the per-window summary feeds live: a URL prefix or a directory.
#[derive(Debug, Clone)]
pub struct FeedSource {
    base: String,
}

impl FeedSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn usgs() -> Self {
        Self::new(USGS_FEED_BASE)
    }

    pub fn url(&self, window: FeedWindow) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), window.file_name())
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::usgs()
    }
}
