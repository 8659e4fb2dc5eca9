pub mod canvas;
pub mod pipeline;

// Re-export main types
pub use canvas::Canvas;
pub use pipeline::{RenderOutcome, RenderPipeline};
