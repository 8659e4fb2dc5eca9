use crate::{
    core::projection::Projector,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::canvas::Canvas,
    Result,
};
use image::RgbaImage;

/// The static world map behind the markers, drawn centered on the origin.
pub struct BasemapLayer {
    properties: LayerProperties,
    image: RgbaImage,
}

impl BasemapLayer {
    pub fn new(id: String, image: RgbaImage) -> Self {
        let properties = LayerProperties::new(id, "Basemap".to_string(), LayerType::Basemap);
        Self { properties, image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl LayerTrait for BasemapLayer {
    crate::impl_layer_trait!(properties);

    fn render(&mut self, canvas: &mut Canvas, _projector: &Projector) -> Result<()> {
        if (canvas.width(), canvas.height()) != self.image.dimensions() {
            log::debug!(
                "basemap is {:?}, canvas is {}x{}; drawing centered",
                self.image.dimensions(),
                canvas.width(),
                canvas.height()
            );
        }
        canvas.draw_image_centered(&self.image, self.properties.opacity);
        Ok(())
    }
}
