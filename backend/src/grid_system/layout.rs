//! Gridline and axis label layout.
//!
//! [`layout`] is a pure function of the view transform, the viewport size and
//! the axis style. Positions are first computed in the grid's own frame:
//!
//! ```text
//!   0 ┌──────────────────────────────── x
//!     │   labels (font size F)
//!   F │   ┊  ╷ ╷ ╷ ╷ ┊ ╷ ╷ ╷ ╷ ┊        minor ticks, length M
//! F+M │───┼─────────────────────        boundary line at the margin
//!     │   │         │
//!     y   margin    margin + U
//! ```
//!
//! Line endpoints are then pushed through the transform once. Labels stay in
//! the grid frame; the backend draws them on a layer carrying the transform.

use std::f32::consts::FRAC_PI_2;

use crate::data::prelude::*;

/// Number of minor subdivisions between two major gridlines.
pub const MINOR_DIVISIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Edge of the margin band.
    Boundary,
    /// Full-length gridline at a multiple of the unit size.
    Major,
    /// Short tick inside the margin band.
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    pub kind: SegmentKind,
}

/// Which point of the measured text `position` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    TopCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    /// Grid frame position, see [`LabelAnchor`].
    pub position: GridPoint,
    /// Radians, counter-clockwise positive.
    pub rotation: f32,
    pub anchor: LabelAnchor,
    pub axis: Axis,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    pub segments: Vec<Segment>,
    pub labels: Vec<AxisLabel>,
}

impl GridGeometry {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.labels.is_empty()
    }

    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |segment| segment.kind == kind)
    }

    pub fn labels_of(&self, axis: Axis) -> impl Iterator<Item = &AxisLabel> {
        self.labels.iter().filter(move |label| label.axis == axis)
    }
}

/// Number of major intervals needed to cover `extent` after the margin.
pub fn major_count(extent: f32, style: &AxisStyle) -> usize {
    let count = ((extent - style.margin()) / style.axis_unit_size()).ceil();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

pub fn layout(transform: &ViewTransform, viewport: ScreenSize, style: &AxisStyle) -> GridGeometry {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(viewport.width) || !usable(viewport.height) {
        return GridGeometry::default();
    }

    let mut builder = Builder {
        transform,
        viewport,
        style,
        geometry: GridGeometry::default(),
    };
    builder.axis(Axis::Horizontal);
    builder.axis(Axis::Vertical);

    builder.geometry
}

struct Builder<'a> {
    transform: &'a ViewTransform,
    viewport: ScreenSize,
    style: &'a AxisStyle,
    geometry: GridGeometry,
}

impl Builder<'_> {
    /// Lays out one axis in `(along, across)` coordinates; for the vertical
    /// axis the roles of x and y are swapped when points are emitted.
    fn axis(&mut self, axis: Axis) {
        let font = self.style.axis_font_size();
        let mark = self.style.axis_mark_size();
        let unit = self.style.axis_unit_size();
        let margin = self.style.margin();
        let minor = unit / MINOR_DIVISIONS as f32;

        let (extent, across_extent) = match axis {
            Axis::Horizontal => (self.viewport.width, self.viewport.height),
            Axis::Vertical => (self.viewport.height, self.viewport.width),
        };
        let major_start = font - mark;

        self.line(axis, SegmentKind::Boundary, (margin, margin), (extent, margin));

        for i in 0..=major_count(extent, self.style) {
            let base = margin + i as f32 * unit;
            self.label(axis, i as f32 * unit, base);

            for j in 0..MINOR_DIVISIONS {
                let v = base + j as f32 * minor;
                if j == 0 {
                    self.line(axis, SegmentKind::Major, (v, major_start), (v, across_extent));
                } else {
                    self.line(axis, SegmentKind::Minor, (v, font), (v, margin));
                }
            }
        }
    }

    fn line(&mut self, axis: Axis, kind: SegmentKind, from: (f32, f32), to: (f32, f32)) {
        let start = self.transform.apply(grid_point(axis, from));
        let end = self.transform.apply(grid_point(axis, to));
        self.geometry.segments.push(Segment { start, end, kind });
    }

    fn label(&mut self, axis: Axis, value: f32, base: f32) {
        let font = self.style.axis_font_size();
        let label = match axis {
            Axis::Horizontal => AxisLabel {
                text: format!("{}", value),
                position: GridPoint::new(base, 0.0),
                rotation: 0.0,
                anchor: LabelAnchor::TopCenter,
                axis,
            },
            Axis::Vertical => AxisLabel {
                text: format!("{}", value),
                position: GridPoint::new(font / 2.0, base),
                rotation: -FRAC_PI_2,
                anchor: LabelAnchor::Center,
                axis,
            },
        };
        self.geometry.labels.push(label);
    }
}

fn grid_point(axis: Axis, (along, across): (f32, f32)) -> GridPoint {
    match axis {
        Axis::Horizontal => GridPoint::new(along, across),
        Axis::Vertical => GridPoint::new(across, along),
    }
}

#[cfg(test)]
mod test_layout {
    use super::*;

    fn style() -> AxisStyle {
        AxisStyle::new(100.0, 8.0, 3.0).unwrap()
    }

    fn vertical_majors(geometry: &GridGeometry) -> Vec<Segment> {
        // majors of the horizontal axis run vertically: constant x
        geometry
            .segments_of(SegmentKind::Major)
            .filter(|s| s.start.x == s.end.x)
            .copied()
            .collect()
    }

    #[test]
    fn test_tick_count_formula() {
        let style = style();
        assert_eq!(major_count(800.0, &style), 8);
        assert_eq!(major_count(600.0, &style), 6);
        assert_eq!(major_count(11.0, &style), 0);
        assert_eq!(major_count(5.0, &style), 0);

        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(800.0, 600.0), &style);
        let majors = vertical_majors(&geometry);

        assert_eq!(majors.len(), 9);
        let xs: Vec<f32> = majors.iter().map(|s| s.start.x).collect();
        assert_eq!(xs, vec![11.0, 111.0, 211.0, 311.0, 411.0, 511.0, 611.0, 711.0, 811.0]);
        assert!(majors.iter().all(|s| s.start.y == 5.0 && s.end.y == 600.0));
    }

    #[test]
    fn test_segment_and_label_counts() {
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(800.0, 600.0), &style());

        // 9 horizontal majors, 7 vertical majors
        assert_eq!(geometry.segments_of(SegmentKind::Boundary).count(), 2);
        assert_eq!(geometry.segments_of(SegmentKind::Major).count(), 16);
        assert_eq!(geometry.segments_of(SegmentKind::Minor).count(), 16 * 9);
        assert_eq!(geometry.segments.len(), 2 + 16 * 10);
        assert_eq!(geometry.labels_of(Axis::Horizontal).count(), 9);
        assert_eq!(geometry.labels_of(Axis::Vertical).count(), 7);
    }

    #[test]
    fn test_emission_order() {
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(300.0, 200.0), &style());
        let segments = &geometry.segments;

        assert_eq!(segments[0].kind, SegmentKind::Boundary);
        assert_eq!(segments[0].start, ScreenPoint::new(11.0, 11.0));
        assert_eq!(segments[0].end, ScreenPoint::new(300.0, 11.0));

        assert_eq!(segments[1].kind, SegmentKind::Major);
        for j in 1..MINOR_DIVISIONS {
            let tick = segments[1 + j];
            assert_eq!(tick.kind, SegmentKind::Minor);
            assert_eq!(tick.start, ScreenPoint::new(11.0 + j as f32 * 10.0, 8.0));
            assert_eq!(tick.end, ScreenPoint::new(11.0 + j as f32 * 10.0, 11.0));
        }
        assert_eq!(segments[11].kind, SegmentKind::Major);
        assert_eq!(segments[11].start.x, 111.0);

        // hCount = 3, so the vertical axis starts after 1 + 4 * 10 segments
        let vertical = &segments[41..];
        assert_eq!(vertical[0].kind, SegmentKind::Boundary);
        assert_eq!(vertical[0].start, ScreenPoint::new(11.0, 11.0));
        assert_eq!(vertical[0].end, ScreenPoint::new(11.0, 200.0));
        assert_eq!(vertical[1].start, ScreenPoint::new(5.0, 11.0));
        assert_eq!(vertical[1].end, ScreenPoint::new(300.0, 11.0));
        assert_eq!(vertical[2].start, ScreenPoint::new(8.0, 12.0));
        assert_eq!(vertical[2].end, ScreenPoint::new(11.0, 12.0));

        let texts: Vec<&str> = geometry.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0", "100", "200", "300", "0", "100", "200"]);
    }

    #[test]
    fn test_labels() {
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(300.0, 200.0), &style());

        let first = &geometry.labels[0];
        assert_eq!(first.position, GridPoint::new(11.0, 0.0));
        assert_eq!(first.anchor, LabelAnchor::TopCenter);
        assert_eq!(first.rotation, 0.0);

        let vertical: Vec<&AxisLabel> = geometry.labels_of(Axis::Vertical).collect();
        assert_eq!(vertical[1].position, GridPoint::new(4.0, 111.0));
        assert_eq!(vertical[1].anchor, LabelAnchor::Center);
        assert_eq!(vertical[1].rotation, -FRAC_PI_2);
    }

    #[test]
    fn test_labels_are_not_transformed() {
        let transform = ViewTransform::from_scale_translation(2.0, 2.0, 50.0, 30.0).unwrap();
        let moved = layout(&transform, ScreenSize::new(300.0, 200.0), &style());
        let still = layout(&ViewTransform::identity(), ScreenSize::new(300.0, 200.0), &style());

        assert_eq!(moved.labels, still.labels);
        assert_eq!(moved.segments[0].start, ScreenPoint::new(72.0, 52.0));
        assert_eq!(moved.segments[0].end, ScreenPoint::new(650.0, 52.0));
    }

    #[test]
    fn test_zero_viewport() {
        for size in [ScreenSize::new(0.0, 0.0), ScreenSize::new(800.0, 0.0), ScreenSize::new(-5.0, 600.0)] {
            let geometry = layout(&ViewTransform::identity(), size, &style());
            assert!(geometry.segments.is_empty());
            assert!(geometry.labels.is_empty());
        }
    }

    #[test]
    fn test_viewport_inside_margin_keeps_boundary() {
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(6.0, 6.0), &style());

        assert_eq!(geometry.segments_of(SegmentKind::Boundary).count(), 2);
        assert_eq!(geometry.segments_of(SegmentKind::Major).count(), 2);
        assert_eq!(geometry.labels.len(), 2);
    }

    #[test]
    fn test_zero_mark_size() {
        let style = AxisStyle::new(100.0, 8.0, 0.0).unwrap();
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(300.0, 200.0), &style);

        assert!(geometry.segments_of(SegmentKind::Minor).all(|s| s.start == s.end));
        assert!(geometry.segments_of(SegmentKind::Major).all(|s| s.start.y == 8.0 || s.start.x == 8.0));
    }

    #[test]
    fn test_major_line_starts_above_band_when_mark_exceeds_font() {
        let style = AxisStyle::new(100.0, 4.0, 6.0).unwrap();
        let geometry = layout(&ViewTransform::identity(), ScreenSize::new(300.0, 200.0), &style);

        let majors = vertical_majors(&geometry);
        assert!(majors.iter().all(|s| s.start.y == -2.0 && s.end.y == 200.0));
    }

    #[test]
    fn test_deterministic() {
        let transform = ViewTransform::from_scale_translation(1.7, 0.9, -33.5, 12.25).unwrap();
        let style = AxisStyle::new(37.5, 9.0, 2.5).unwrap();
        let size = ScreenSize::new(1024.0, 768.0);

        assert_eq!(layout(&transform, size, &style), layout(&transform, size, &style));
    }
}
