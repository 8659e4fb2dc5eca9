pub mod config;
pub mod constants;
pub mod geo;
#[cfg(feature = "render")]
pub mod map;
pub mod projection;

// Re-exports for convenience
pub use config::{MapConfig, MapSettings, MarkerProfile, MarkerStyle, RenderOptions};
pub use geo::{LatLng, Point};
pub use projection::Projector;
