use crate::{
    core::projection::Projector, layers::base::LayerTrait, rendering::canvas::Canvas, Result,
};

/// Holds the layers of one render pass, ordered by z-index.
#[derive(Default)]
pub struct LayerManager {
    /// Sorted by z-index; equal z-indices keep insertion order.
    layers: Vec<Box<dyn LayerTrait>>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer in render order
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) {
        let z_index = layer.z_index();
        let insert_pos = self
            .layers
            .iter()
            .position(|l| l.z_index() > z_index)
            .unwrap_or(self.layers.len());
        self.layers.insert(insert_pos, layer);
    }

    /// Removes a layer by ID
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let index = self.layers.iter().position(|l| l.id() == layer_id)?;
        Some(self.layers.remove(index))
    }

    /// Layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Renders every visible layer, bottom to top
    pub fn render(&mut self, canvas: &mut Canvas, projector: &Projector) -> Result<()> {
        for layer in self.layers.iter_mut().filter(|l| l.is_visible()) {
            log::debug!("render layer {} ({})", layer.id(), layer.layer_type());
            layer.render(canvas, projector)?;
        }
        Ok(())
    }
}
