use std::collections::HashMap;

use lyon::path::{ Path, PathEvent };

use super::{ Layer, LineStyle, RenderBackend, TextStyle };
use crate::{
    data::prelude::*,
    grid_system::layout::AxisLabel,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Layer),
    SetTransform(Layer, ViewTransform),
    Rect { layer: Layer, rect: ScreenRect, color: Rgba8 },
    Stroke { layer: Layer, lines: usize, style: LineStyle },
    Text { layer: Layer, label: AxisLabel, style: TextStyle, width: f32 },
}

/// Backend that keeps what is currently on each layer instead of drawing it.
///
/// Clearing a layer drops its commands, so after a redraw the recorder holds
/// exactly one frame. Text width is estimated from the glyph count.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    transforms: HashMap<Layer, ViewTransform>,
    clears: usize,
}

impl RecordingBackend {
    /// Average advance of a glyph relative to the font size.
    pub const GLYPH_ADVANCE: f32 = 0.6;

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn layer_transform(&self, layer: Layer) -> ViewTransform {
        self.transforms.get(&layer).copied().unwrap_or_default()
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn texts(&self, layer: Layer) -> impl Iterator<Item = &AxisLabel> {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::Text { layer: l, label, .. } if *l == layer => Some(label),
            _ => None,
        })
    }

    pub fn stroked_lines(&self, layer: Layer) -> usize {
        self.commands
            .iter()
            .map(|command| match command {
                DrawCommand::Stroke { layer: l, lines, .. } if *l == layer => *lines,
                _ => 0,
            })
            .sum()
    }
}

impl RenderBackend for RecordingBackend {
    fn clear_layer(&mut self, layer: Layer) {
        self.clears += 1;
        self.commands.retain(|command| match command {
            DrawCommand::Clear(l) | DrawCommand::SetTransform(l, _) => *l != layer,
            DrawCommand::Rect { layer: l, .. }
            | DrawCommand::Stroke { layer: l, .. }
            | DrawCommand::Text { layer: l, .. } => *l != layer,
        });
        self.commands.push(DrawCommand::Clear(layer));
    }

    fn set_layer_transform(&mut self, layer: Layer, transform: &ViewTransform) {
        self.transforms.insert(layer, *transform);
        self.commands.push(DrawCommand::SetTransform(layer, *transform));
    }

    fn draw_rect(&mut self, layer: Layer, rect: ScreenRect, color: Rgba8) {
        self.commands.push(DrawCommand::Rect { layer, rect, color });
    }

    fn stroke_path(&mut self, layer: Layer, path: &Path, style: &LineStyle) {
        let lines = path
            .iter()
            .filter(|event| matches!(event, PathEvent::Line { .. }))
            .count();
        self.commands.push(DrawCommand::Stroke { layer, lines, style: *style });
    }

    fn draw_text(&mut self, layer: Layer, label: &AxisLabel, style: &TextStyle) -> f32 {
        let width = label.text.chars().count() as f32 * style.font_size * Self::GLYPH_ADVANCE;
        self.commands.push(DrawCommand::Text {
            layer,
            label: label.clone(),
            style: *style,
            width,
        });
        width
    }
}

#[cfg(test)]
mod test_recording {
    use super::*;
    use crate::grid_system::layout::{ Axis, LabelAnchor };

    fn label(text: &str) -> AxisLabel {
        AxisLabel {
            text: text.to_string(),
            position: GridPoint::new(0.0, 0.0),
            rotation: 0.0,
            anchor: LabelAnchor::TopCenter,
            axis: Axis::Horizontal,
        }
    }

    #[test]
    fn test_clear_drops_only_that_layer() {
        let mut backend = RecordingBackend::default();
        let style = TextStyle { font_size: 10.0, color: Rgba8::AXIS_LABEL };

        backend.draw_rect(Layer::Grid, ScreenRect::zero(), Rgba8::WHITE);
        assert_eq!(backend.draw_text(Layer::Labels, &label("100"), &style), 18.0);
        backend.clear_layer(Layer::Grid);

        assert_eq!(backend.commands().len(), 2);
        assert_eq!(backend.texts(Layer::Labels).count(), 1);
        assert_eq!(backend.clear_count(), 1);
    }

    #[test]
    fn test_layer_transform() {
        let mut backend = RecordingBackend::default();
        let t = ViewTransform::from_scale_translation(2.0, 2.0, 1.0, 1.0).unwrap();

        assert_eq!(backend.layer_transform(Layer::Labels), ViewTransform::identity());
        backend.set_layer_transform(Layer::Labels, &t);
        assert_eq!(backend.layer_transform(Layer::Labels), t);
    }
}
