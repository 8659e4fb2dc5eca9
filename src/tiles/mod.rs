pub mod loader;
pub mod source;

// Re-exports for convenience
pub use loader::ResourceLoader;
pub use source::{BasemapSource, FeedSource, FixedBasemap, MapboxStaticSource};
