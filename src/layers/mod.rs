pub mod base;
pub mod image;
pub mod macros;
pub mod manager;
pub mod marker;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use manager::LayerManager;
pub use marker::{Marker, MarkerLayer};
