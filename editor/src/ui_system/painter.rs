use std::collections::HashMap;

use egui::{ epaint::TextShape, pos2, vec2, Color32, Shape, Stroke };

use backend::{
    data::prelude::*,
    grid_system::layout::{ AxisLabel, LabelAnchor },
    renderer::{ Layer, LineStyle, PathEvent, RenderBackend, TextStyle },
};

/// Retained egui shapes per layer, replayed onto a painter every frame.
///
/// Incoming coordinates are physical pixels; shapes are stored in egui points.
pub struct PainterBackend {
    ctx: egui::Context,
    pub pixels_per_point: f32,
    layers: HashMap<Layer, Vec<Shape>>,
    transforms: HashMap<Layer, ViewTransform>,
}

impl PainterBackend {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            pixels_per_point: 1.0,
            layers: HashMap::new(),
            transforms: HashMap::new(),
        }
    }

    fn to_points(&self, p: ScreenPoint) -> egui::Pos2 {
        pos2(p.x / self.pixels_per_point, p.y / self.pixels_per_point)
    }

    fn layer(&mut self, layer: Layer) -> &mut Vec<Shape> {
        self.layers.entry(layer).or_default()
    }

    /// Everything currently drawn, back to front.
    pub fn shapes(&self) -> Vec<Shape> {
        [Layer::Grid, Layer::Labels]
            .iter()
            .filter_map(|layer| self.layers.get(layer))
            .flat_map(|shapes| shapes.iter().cloned())
            .collect()
    }
}

fn color(rgba: Rgba8) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba.r(), rgba.g(), rgba.b(), rgba.a())
}

impl RenderBackend for PainterBackend {
    fn clear_layer(&mut self, layer: Layer) {
        self.layer(layer).clear();
    }

    fn set_layer_transform(&mut self, layer: Layer, transform: &ViewTransform) {
        self.transforms.insert(layer, *transform);
    }

    fn draw_rect(&mut self, layer: Layer, rect: ScreenRect, rgba: Rgba8) {
        let rect = egui::Rect::from_min_max(self.to_points(rect.min()), self.to_points(rect.max()));
        self.layer(layer).push(Shape::rect_filled(rect, 0.0, color(rgba)));
    }

    fn stroke_path(&mut self, layer: Layer, path: &Path, style: &LineStyle) {
        let stroke = Stroke::new(style.width / self.pixels_per_point, color(style.color));
        let lines: Vec<Shape> = path
            .iter()
            .filter_map(|event| match event {
                PathEvent::Line { from, to } => Some(Shape::line_segment(
                    [
                        self.to_points(ScreenPoint::from_untyped(from)),
                        self.to_points(ScreenPoint::from_untyped(to)),
                    ],
                    stroke,
                )),
                _ => None,
            })
            .collect();
        self.layer(layer).extend(lines);
    }

    fn draw_text(&mut self, layer: Layer, label: &AxisLabel, style: &TextStyle) -> f32 {
        // labels live in the grid frame and move with the layer as a whole
        let transform = self.transforms.get(&layer).copied().unwrap_or_default();
        let (scale, _) = transform.scale_factors();
        let anchor = transform.apply(label.position);

        let font_size = style.font_size * scale / self.pixels_per_point;
        let galley = self.ctx.fonts().layout_no_wrap(
            label.text.clone(),
            egui::FontId::proportional(font_size),
            color(style.color),
        );
        let size = galley.size();

        let offset = match label.anchor {
            LabelAnchor::TopCenter => vec2(size.x / 2.0, 0.0),
            LabelAnchor::Center => vec2(size.x / 2.0, size.y / 2.0),
        };
        // text rotates about its top-left corner
        let (sin, cos) = label.rotation.sin_cos();
        let rotated = vec2(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos);
        let pos = self.to_points(anchor) - rotated;

        let mut shape = TextShape::new(pos, galley);
        shape.angle = label.rotation;
        self.layer(layer).push(Shape::Text(shape));

        size.x * self.pixels_per_point
    }
}
