use lyon::path::Path;
pub use lyon::path::PathEvent;

use crate::{
    data::prelude::*,
    grid_system::layout::{ AxisLabel, GridGeometry },
};

mod recording;
pub use recording::{ DrawCommand, RecordingBackend };

/// Independently cleared drawing layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Background fill and gridlines, already in screen space.
    Grid,
    /// Axis labels in the grid frame; drawn through the layer transform.
    Labels,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Rgba8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Rgba8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPalette {
    pub background: Rgba8,
    pub line: Rgba8,
    pub line_width: f32,
    pub label: Rgba8,
}

impl Default for GridPalette {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
            line: Rgba8::GRID_LINE,
            line_width: 1.0,
            label: Rgba8::AXIS_LABEL,
        }
    }
}

/// The rasterizing side of the grid.
pub trait RenderBackend {
    fn clear_layer(&mut self, layer: Layer);

    /// Transform applied by the backend to everything drawn on `layer`.
    fn set_layer_transform(&mut self, layer: Layer, transform: &ViewTransform);

    fn draw_rect(&mut self, layer: Layer, rect: ScreenRect, color: Rgba8);

    fn stroke_path(&mut self, layer: Layer, path: &Path, style: &LineStyle);

    /// Draws `label` placed by its anchor and returns the measured text width.
    fn draw_text(&mut self, layer: Layer, label: &AxisLabel, style: &TextStyle) -> f32;
}

/// Builds the moveTo/lineTo path for every segment, in order.
pub fn segments_path(geometry: &GridGeometry) -> Path {
    let mut builder = Path::builder();
    for segment in geometry.segments.iter() {
        builder.begin(segment.start.to_untyped());
        builder.line_to(segment.end.to_untyped());
        builder.end(false);
    }

    builder.build()
}

/// Replaces everything previously drawn with `geometry`.
pub fn paint<R: RenderBackend + ?Sized>(
    renderer: &mut R,
    geometry: &GridGeometry,
    transform: &ViewTransform,
    viewport: ScreenSize,
    style: &AxisStyle,
    palette: &GridPalette,
) {
    renderer.clear_layer(Layer::Grid);
    renderer.set_layer_transform(Layer::Grid, &ViewTransform::identity());
    renderer.draw_rect(Layer::Grid, ScreenRect::new(ScreenPoint::origin(), viewport), palette.background);
    if !geometry.segments.is_empty() {
        renderer.stroke_path(
            Layer::Grid,
            &segments_path(geometry),
            &LineStyle { width: palette.line_width, color: palette.line },
        );
    }

    renderer.clear_layer(Layer::Labels);
    renderer.set_layer_transform(Layer::Labels, transform);
    let text_style = TextStyle { font_size: style.axis_font_size(), color: palette.label };
    let widest = geometry
        .labels
        .iter()
        .map(|label| renderer.draw_text(Layer::Labels, label, &text_style))
        .fold(0.0f32, f32::max);

    log::trace!("painted {} labels, widest {:.1}", geometry.labels.len(), widest);
}
