//! Shows finished render passes inside an egui window.

use egui::{ColorImage, Context, TextureHandle, TextureOptions, Ui};
use image::RgbaImage;

use crate::{input::handler::Action, rendering::pipeline::RenderOutcome};

/// Converts a rendered frame into egui's texture format.
pub fn color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Holds the most recently finished frame.
///
/// Each call to [`FrameView::present`] replaces the previous texture, so the
/// last pass to finish is what the user sees.
#[derive(Default)]
pub struct FrameView {
    texture: Option<TextureHandle>,
    shown: Option<Action>,
    status: String,
}

impl FrameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(&mut self, ctx: &Context, action: Action, outcome: &RenderOutcome) {
        self.status = match &outcome.error {
            Some(error) => format!("Error: {}", error),
            None => format!(
                "{}: {} earthquakes ({} skipped)",
                action.label(),
                outcome.markers_drawn,
                outcome.markers_skipped
            ),
        };
        self.texture = Some(ctx.load_texture(
            "quakemap",
            color_image(&outcome.image),
            TextureOptions::LINEAR,
        ));
        self.shown = Some(action);
    }

    /// Records a pass that produced no frame; the old frame stays up.
    pub fn report(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn shown(&self) -> Option<Action> {
        self.shown
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    pub fn show(&self, ui: &mut Ui) {
        if let Some(texture) = &self.texture {
            ui.image((texture.id(), texture.size_vec2()));
        }
    }
}
