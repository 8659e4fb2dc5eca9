use crate::{
    core::{config::MarkerStyle, geo::Point, projection::Projector},
    data::feed::EarthquakeEvent,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::canvas::Canvas,
    Result,
};

/// One projected event, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub timestamp: String,
    /// Offset from the map center, in pixels.
    pub offset: Point,
    pub magnitude: f64,
    pub diameter: f64,
}

/// Translucent circles for a list of events, sized by magnitude.
pub struct MarkerLayer {
    properties: LayerProperties,
    style: MarkerStyle,
    events: Vec<EarthquakeEvent>,
    markers: Vec<Marker>,
    skipped: usize,
    projected_with: Option<Projector>,
}

impl MarkerLayer {
    pub fn new(id: String, events: &[EarthquakeEvent], style: MarkerStyle) -> Self {
        let properties = LayerProperties::new(id, "Earthquakes".to_string(), LayerType::Marker)
            .with_z_index(10);
        Self {
            properties,
            style,
            events: events.to_vec(),
            markers: Vec::new(),
            skipped: 0,
            projected_with: None,
        }
    }

    /// Projects every event; events that cannot be projected are skipped with a warning.
    /// Repeated calls with the same projector reuse the previous result.
    pub fn project(&mut self, projector: &Projector) {
        if self.projected_with.as_ref() == Some(projector) {
            return;
        }
        self.markers.clear();
        self.skipped = 0;

        for event in &self.events {
            let offset = match projector.try_offset(&event.location) {
                Ok(offset) => offset,
                Err(e) => {
                    log::warn!("skipping event at {}: {}", event.timestamp, e);
                    self.skipped += 1;
                    continue;
                }
            };
            let diameter = self.style.diameter_for(event.magnitude);
            if !diameter.is_finite() || diameter < 0.0 {
                log::warn!(
                    "skipping event at {}: magnitude {} gives diameter {}",
                    event.timestamp,
                    event.magnitude,
                    diameter
                );
                self.skipped += 1;
                continue;
            }
            self.markers.push(Marker {
                timestamp: event.timestamp.clone(),
                offset,
                magnitude: event.magnitude,
                diameter,
            });
        }
        self.projected_with = Some(*projector);
    }

    /// Markers from the last projection, in event order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl LayerTrait for MarkerLayer {
    crate::impl_layer_trait!(properties);

    fn render(&mut self, canvas: &mut Canvas, projector: &Projector) -> Result<()> {
        self.project(projector);

        let mut fill = self.style.fill;
        fill[3] = (fill[3] as f32 * self.properties.opacity).round() as u8;
        let stroke = self.style.stroke.map(|mut stroke| {
            stroke[3] = (stroke[3] as f32 * self.properties.opacity).round() as u8;
            stroke
        });

        for marker in &self.markers {
            canvas.fill_circle(marker.offset, marker.diameter, fill, stroke);
        }
        #[cfg(feature = "debug")]
        log::debug!("drew {} markers", self.markers.len());
        Ok(())
    }
}
