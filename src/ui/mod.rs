pub mod frame;

pub use frame::{color_image, FrameView};
