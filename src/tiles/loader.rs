use crate::{constants::USER_AGENT, MapError, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::path::Path;

/// Shared blocking HTTP client; public map and feed servers reject requests
/// without a User-Agent.
static HTTP_CLIENT: Lazy<reqwest::Result<Client>> =
    Lazy::new(|| Client::builder().user_agent(USER_AGENT).build());

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches the basemap image and feeds from HTTP(S) URLs or local paths.
///
/// One attempt per request; a failure is returned to the caller, which
/// decides how the render pass reports it.
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader;

impl ResourceLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn fetch_bytes(&self, location: &str) -> Result<Vec<u8>> {
        if is_remote(location) {
            self.fetch_remote(location)
        } else {
            #[cfg(feature = "debug")]
            log::debug!("reading {}", location);
            std::fs::read(Path::new(location)).map_err(|e| MapError::resource(location, e))
        }
    }

    pub fn fetch_text(&self, location: &str) -> Result<String> {
        let bytes = self.fetch_bytes(location)?;
        String::from_utf8(bytes).map_err(|e| MapError::resource(location, e))
    }

    fn fetch_remote(&self, location: &str) -> Result<Vec<u8>> {
        let client = HTTP_CLIENT
            .as_ref()
            .map_err(|e| MapError::resource(location, e))?;

        log::debug!("fetch {}", location);
        let resp = client
            .get(location)
            .send()
            .map_err(|e| MapError::resource(location, e))?;
        if !resp.status().is_success() {
            return Err(MapError::resource(location, format!("HTTP {}", resp.status())));
        }
        let bytes = resp.bytes().map_err(|e| MapError::resource(location, e))?;
        log::info!("downloaded {} ({} bytes)", location, bytes.len());
        Ok(bytes.to_vec())
    }

    /// Fetches and decodes a raster basemap.
    #[cfg(feature = "render")]
    pub fn load_basemap(&self, location: &str) -> Result<image::RgbaImage> {
        let bytes = self.fetch_bytes(location)?;
        decode_basemap(&bytes).map_err(|e| MapError::resource(location, e))
    }
}

/// Decodes an encoded raster (PNG/JPEG) into RGBA.
#[cfg(feature = "render")]
pub fn decode_basemap(bytes: &[u8]) -> Result<image::RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("https://earthquake.usgs.gov/x.csv"));
        assert!(is_remote("http://localhost/x.png"));
        assert!(!is_remote("/tmp/all_day.csv"));
        assert!(!is_remote("feeds/all_day.csv"));
    }

    #[test]
    fn test_fetch_local_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, "t,1,2,3,4\n").unwrap();

        let text = ResourceLoader::new()
            .fetch_text(&path.to_string_lossy())
            .unwrap();
        assert_eq!(text, "t,1,2,3,4\n");
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let err = ResourceLoader::new()
            .fetch_bytes("/definitely/not/here.csv")
            .unwrap_err();
        match err {
            MapError::ResourceLoad { location, .. } => {
                assert_eq!(location, "/definitely/not/here.csv")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = ResourceLoader::new()
            .fetch_text(&path.to_string_lossy())
            .unwrap_err();
        assert!(matches!(err, MapError::ResourceLoad { .. }));
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_load_basemap_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = ResourceLoader::new()
            .load_basemap(&path.to_string_lossy())
            .unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_undecodable_basemap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = ResourceLoader::new()
            .load_basemap(&path.to_string_lossy())
            .unwrap_err();
        assert!(matches!(err, MapError::ResourceLoad { .. }));
    }
}
